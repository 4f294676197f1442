use std::path::PathBuf;

use thiserror::Error;

use doctext_core::config_file::ConfigFile;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 100;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub temp_dir: PathBuf,
}

impl ServerSettings {
    /// Resolve settings: environment variables > config file > defaults.
    pub fn resolve(config: &ConfigFile) -> Result<Self, SettingsError> {
        Self::resolve_with(config, |key| std::env::var(key).ok())
    }

    /// Same as [`ServerSettings::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        config: &ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let file = config.server.clone().unwrap_or_default();

        let host = env("DOCTEXT_HOST")
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match env("DOCTEXT_PORT") {
            Some(value) => value.parse().map_err(|_| SettingsError::Invalid {
                key: "DOCTEXT_PORT",
                expected: "a port number",
                value,
            })?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let max_upload_mb = match env("DOCTEXT_MAX_UPLOAD_MB") {
            Some(value) => value.parse().map_err(|_| SettingsError::Invalid {
                key: "DOCTEXT_MAX_UPLOAD_MB",
                expected: "a whole number of megabytes",
                value,
            })?,
            None => file.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB),
        };

        let temp_dir = env("DOCTEXT_TEMP_DIR")
            .or(file.temp_dir)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        Ok(Self {
            host,
            port,
            max_upload_bytes: usize::try_from(max_upload_mb.saturating_mul(1024 * 1024))
                .unwrap_or(usize::MAX),
            temp_dir,
        })
    }
}
