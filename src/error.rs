use pixel_art::{ImageError, ParseColorError, PipelineError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error ({format}): {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Decoded fine, but the pixels cannot be processed (e.g. zero size)
    #[error("Unsupported image: {0}")]
    UnsupportedImage(#[source] ImageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid color {value:?}: {source}")]
    InvalidColor {
        value: String,
        #[source]
        source: ParseColorError,
    },

    #[error("JPEG quality {0} is outside 1..=100")]
    InvalidQuality(u8),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output {} is already written by {}", .output.display(), .claimed_by.display())]
    DuplicateOutput { output: PathBuf, claimed_by: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_art::{ProcessingParameters, RasterImage, Rgb};

    #[test]
    fn test_codec_error_decode() {
        let error = CodecError::Decode("truncated file".to_string());
        assert_eq!(error.to_string(), "Decode error: truncated file");
    }

    #[test]
    fn test_codec_error_encode() {
        let error = CodecError::Encode {
            format: "jpeg",
            message: "buffer too small".to_string(),
        };
        assert_eq!(error.to_string(), "Encode error (jpeg): buffer too small");
    }

    #[test]
    fn test_codec_error_unsupported_image() {
        let error = CodecError::UnsupportedImage(ImageError::ZeroDimension {
            width: 0,
            height: 4,
        });
        assert_eq!(
            error.to_string(),
            "Unsupported image: image has zero dimension: 0x4"
        );
    }

    #[test]
    fn test_app_error_duplicate_output() {
        let error = AppError::DuplicateOutput {
            output: PathBuf::from("out/x.png"),
            claimed_by: PathBuf::from("a/x.png"),
        };
        assert_eq!(
            error.to_string(),
            "Output out/x.png is already written by a/x.png"
        );
    }

    #[test]
    fn test_codec_error_unsupported_format() {
        let error = CodecError::UnsupportedFormat("Grayscale 1-channel".to_string());
        assert_eq!(
            error.to_string(),
            "Unsupported image format: Grayscale 1-channel"
        );
    }

    #[test]
    fn test_config_error_unknown_preset() {
        let error = ConfigError::UnknownPreset("vaporwave".to_string());
        assert_eq!(error.to_string(), "Unknown preset: vaporwave");
    }

    #[test]
    fn test_config_error_invalid_color() {
        let source = "#12".parse::<Rgb>().unwrap_err();
        let error = ConfigError::InvalidColor {
            value: "#12".to_string(),
            source,
        };
        assert!(error.to_string().starts_with("Invalid color \"#12\": "));
    }

    #[test]
    fn test_config_error_invalid_quality() {
        let error = ConfigError::InvalidQuality(0);
        assert_eq!(error.to_string(), "JPEG quality 0 is outside 1..=100");
    }

    #[test]
    fn test_app_error_from_pipeline_error() {
        let image = RasterImage::filled_rgb(2, 2, Rgb::BLACK).unwrap();
        let pipeline_error =
            pixel_art::process(&image, &ProcessingParameters::new().colors(1)).unwrap_err();
        let app_error: AppError = pipeline_error.into();
        match app_error {
            AppError::Pipeline(e) => assert!(!e.work_started()),
            _ => panic!("Expected Pipeline variant"),
        }
    }

    #[test]
    fn test_app_error_from_codec_error() {
        let app_error: AppError = CodecError::Decode("bad".to_string()).into();
        assert_eq!(app_error.to_string(), "Codec error: Decode error: bad");
    }
}
