//! Pipeline failure types.

use std::fmt;

use crate::raster::{AllocError, ImageError};

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validate,
    Enhance,
    Extract,
    Pixelate,
    Quantize,
    Composite,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Enhance => "enhance",
            Stage::Extract => "extract",
            Stage::Pixelate => "pixelate",
            Stage::Quantize => "quantize",
            Stage::Composite => "composite",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A processing parameter outside its documented range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} = {value} is outside {range}")]
pub struct ParameterError {
    /// Parameter name
    pub field: &'static str,
    /// Offending value, formatted
    pub value: String,
    /// Accepted range, formatted
    pub range: String,
}

/// Why the pipeline did not produce an image.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A [`ProcessingParameters`](crate::ProcessingParameters) field is out of range.
    /// Nothing was processed.
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// The image shape is not supported. Nothing was processed.
    #[error("unsupported image: {0}")]
    UnsupportedImage(#[from] ImageError),

    /// A buffer could not be allocated part way through processing.
    #[error("resources exhausted during {stage}: {source}")]
    ResourceExhausted {
        stage: Stage,
        #[source]
        source: AllocError,
    },
}

impl PipelineError {
    /// Stage the failure originated in.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidParameters(_) | PipelineError::UnsupportedImage(_) => {
                Stage::Validate
            }
            PipelineError::ResourceExhausted { stage, .. } => *stage,
        }
    }

    /// `false` when the failure happened before any pixel was touched, so
    /// the caller's source image is known to be usable as is; `true` when
    /// processing had started.
    pub fn work_started(&self) -> bool {
        self.stage() != Stage::Validate
    }

    pub(crate) fn exhausted(stage: Stage) -> impl FnOnce(AllocError) -> Self {
        move |source| PipelineError::ResourceExhausted { stage, source }
    }
}
