use crate::codec::{self, EncodeOptions, OutputFormat};
use crate::error::{AppError, ConfigError};
use crate::models::{AppConfig, ParameterSet};
use pixel_art::{Pixelizer, ProcessingParameters, RasterImage};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a single file conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Colors actually used
    pub palette_size: usize,
    /// Encoded output size
    pub bytes: usize,
}

/// Outcome of a batch run; failures do not stop the batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConvertReport>,
    pub failed: Vec<(PathBuf, AppError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Decode -> pixelize -> encode, with fixed parameters
///
/// Every call is independent: nothing is cached between conversions, so a
/// single service can be shared across threads.
#[derive(Debug, Clone)]
pub struct ConvertService {
    pixelizer: Pixelizer,
    encode: EncodeOptions,
}

impl ConvertService {
    pub fn new(params: ProcessingParameters, encode: EncodeOptions) -> Self {
        Self {
            pixelizer: Pixelizer::with_parameters(params),
            encode,
        }
    }

    /// Build a service from configuration plus command-line overrides
    pub fn from_config(
        config: &AppConfig,
        preset: Option<&str>,
        overrides: &ParameterSet,
        quality: Option<u8>,
    ) -> Result<Self, ConfigError> {
        let params = config.resolve(preset, overrides)?;
        let encode = config.encode_options(quality, params.background)?;
        Ok(Self::new(params, encode))
    }

    pub fn parameters(&self) -> &ProcessingParameters {
        self.pixelizer.parameters()
    }

    pub fn encode_options(&self) -> &EncodeOptions {
        &self.encode
    }

    /// Run the pipeline on an already decoded image
    pub fn convert_image(&self, image: &RasterImage) -> Result<RasterImage, AppError> {
        Ok(self.pixelizer.process(image)?)
    }

    /// Convert an encoded image into the given output format
    pub fn convert_bytes(&self, input: &[u8], format: OutputFormat) -> Result<Vec<u8>, AppError> {
        let decoded = codec::decode(input)?;
        let output = self.pixelizer.process(&decoded.image)?;
        Ok(codec::encode(&output, format, &self.encode)?)
    }

    /// Convert `input` and write the result to `output`
    ///
    /// The container is picked from `output`'s extension.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<ConvertReport, AppError> {
        let bytes = fs::read(input)?;
        let decoded = codec::decode(&bytes)?;
        let image = &decoded.image;

        let result = self.pixelizer.run(image)?;
        let format = OutputFormat::from_path(output);
        let encoded = codec::encode(&result.image, format, &self.encode)?;
        fs::write(output, &encoded)?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            width = image.width(),
            height = image.height(),
            colors = result.palette.len(),
            bytes = encoded.len(),
            "Converted"
        );

        Ok(ConvertReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: image.width(),
            height: image.height(),
            palette_size: result.palette.len(),
            bytes: encoded.len(),
        })
    }

    /// Output path for `input` inside `out_dir`: same stem, new extension
    pub fn output_path(input: &Path, out_dir: &Path, format: OutputFormat) -> PathBuf {
        let mut name = input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "output".into());
        name.push(".");
        name.push(format.extension());
        out_dir.join(name)
    }

    /// Convert many files in parallel
    ///
    /// One pipeline run per worker; a failed file is recorded and the rest
    /// of the batch continues. Results keep the input order. When several
    /// inputs map to the same output file, the first one in `inputs` writes
    /// it and the others fail with [`AppError::DuplicateOutput`].
    pub fn convert_batch(
        &self,
        inputs: &[PathBuf],
        out_dir: &Path,
        format: OutputFormat,
    ) -> Result<BatchReport, AppError> {
        fs::create_dir_all(out_dir)?;

        let mut claimed: HashMap<PathBuf, usize> = HashMap::new();
        let jobs: Vec<_> = inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let output = Self::output_path(input, out_dir, format);
                let owner = *claimed.entry(output.clone()).or_insert(i);
                let duplicate_of = (owner != i).then(|| inputs[owner].as_path());
                (input, output, duplicate_of)
            })
            .collect();

        let results: Vec<_> = jobs
            .into_par_iter()
            .map(|(input, output, duplicate_of)| {
                let result = match duplicate_of {
                    Some(first) => Err(AppError::DuplicateOutput {
                        output,
                        claimed_by: first.to_path_buf(),
                    }),
                    None => self.convert_file(input, &output),
                };
                (input, result)
            })
            .collect();

        let mut report = BatchReport::default();
        for (input, result) in results {
            match result {
                Ok(converted) => report.converted.push(converted),
                Err(e) => {
                    tracing::warn!(input = %input.display(), %e, "Conversion failed");
                    report.failed.push((input.clone(), e));
                }
            }
        }

        tracing::info!(
            converted = report.converted.len(),
            failed = report.failed.len(),
            "Batch finished"
        );
        Ok(report)
    }
}
