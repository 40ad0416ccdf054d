use crate::assets::AssetLoader;
use crate::codec::{EncodeOptions, DEFAULT_JPEG_QUALITY};
use crate::error::ConfigError;
use pixel_art::{ProcessingParameters, Rgb};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Parameters applied to every conversion
    #[serde(default)]
    pub defaults: ParameterSet,

    /// Named parameter sets
    #[serde(default)]
    pub presets: BTreeMap<String, ParameterSet>,

    /// Preset used when none is requested
    #[serde(default)]
    pub default_preset: Option<String>,

    /// File output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// A partial set of processing parameters
///
/// Unset fields leave the underlying value alone, so sets can be layered.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParameterSet {
    pub pixel_size: Option<u32>,
    pub colors: Option<u32>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    /// Hex color, e.g. "#ffffff"
    pub background: Option<String>,
    /// Flatten transparency onto `background`
    pub flatten: Option<bool>,
}

/// Configuration for written files
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// JPEG quality (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Re-compress PNG output with oxipng
    #[serde(default = "default_optimize_png")]
    pub optimize_png: bool,
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_optimize_png() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
            optimize_png: default_optimize_png(),
        }
    }
}

impl ParameterSet {
    /// Apply the fields that are set on top of `params`.
    pub fn apply(&self, mut params: ProcessingParameters) -> Result<ProcessingParameters, ConfigError> {
        if let Some(v) = self.pixel_size {
            params.pixel_size = v;
        }
        if let Some(v) = self.colors {
            params.colors = v;
        }
        if let Some(v) = self.contrast {
            params.contrast = v;
        }
        if let Some(v) = self.saturation {
            params.saturation = v;
        }
        if let Some(ref hex) = self.background {
            params.background = parse_color(hex)?;
        }
        if let Some(v) = self.flatten {
            params.composite = v;
        }
        Ok(params)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse a hex color, keeping the offending text in the error
pub fn parse_color(value: &str) -> Result<Rgb, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidColor {
        value: value.to_string(),
        source,
    })
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Unreadable or unparsable files fall back to the built-in defaults.
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        source = %loader.config_source(),
                        presets = config.presets.len(),
                        default_preset = config.default_preset.as_deref().unwrap_or("-"),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolve the effective parameters.
    ///
    /// Built-in defaults, then `defaults`, then the preset (`preset` or
    /// `default_preset`), then `overrides`. A named preset that does not
    /// exist is an error. Ranges are not checked here; the pipeline
    /// validates before it touches any pixel.
    pub fn resolve(
        &self,
        preset: Option<&str>,
        overrides: &ParameterSet,
    ) -> Result<ProcessingParameters, ConfigError> {
        let mut params = self.defaults.apply(ProcessingParameters::default())?;

        if let Some(name) = preset.or(self.default_preset.as_deref()) {
            let set = self
                .presets
                .get(name)
                .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
            tracing::debug!(preset = name, "Applying preset");
            params = set.apply(params)?;
        }

        overrides.apply(params)
    }

    /// Encoder settings, with an optional quality override.
    pub fn encode_options(
        &self,
        quality: Option<u8>,
        background: Rgb,
    ) -> Result<EncodeOptions, ConfigError> {
        let jpeg_quality = quality.unwrap_or(self.output.jpeg_quality);
        if !(1..=100).contains(&jpeg_quality) {
            return Err(ConfigError::InvalidQuality(jpeg_quality));
        }
        Ok(EncodeOptions {
            jpeg_quality,
            optimize_png: self.output.optimize_png,
            background,
        })
    }

    /// Preset names, sorted
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}
