//! Config asset loading with an embedded fallback
//!
//! - If no config path is configured: use the embedded `config.yaml` only
//! - If a path is configured and exists: read it from the filesystem
//! - If a path is configured but missing: fall back to the embedded copy

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Where the active configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
    /// A path was configured but does not exist
    Missing(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Embedded => f.write_str("embedded"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Missing(path) => {
                write!(f, "embedded ({} not found)", path.display())
            }
        }
    }
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from --config or IMG2PIX_CONFIG)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if the user asked for a path.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Configured path, if any
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Describe where [`read_config`](Self::read_config) will read from
    pub fn config_source(&self) -> ConfigSource {
        match self.config_file {
            Some(ref path) if path.exists() => ConfigSource::File(path.clone()),
            Some(ref path) => ConfigSource::Missing(path.clone()),
            None => ConfigSource::Embedded,
        }
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        Self::embedded_config()
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// The embedded default config
    pub fn embedded_config() -> io::Result<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
    }

    /// Write the embedded config to the configured path (init command)
    ///
    /// Uses `./config.yaml` if no path is configured. Existing files are
    /// skipped unless `force` is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("./{CONFIG_NAME}")));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = Self::embedded_config()?;
        fs::write(&path, &*data)?;
        tracing::info!(path = %path.display(), "Wrote default config");
        report.written.push(path.display().to_string());

        Ok(report)
    }
}
