//! Configuration loading: file, then environment, then defaults.

use std::env;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::schema::SynapseConfig;

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The named file could not be read.
    #[error("failed to read config file {path}: {reason}")]
    Read {
        /// Path of the file that failed.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The file was read but is not valid TOML for the schema.
    #[error("failed to parse config file {path}: {reason}")]
    Parse {
        /// Path of the file that failed.
        path: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

/// File consulted when no explicit path is supplied.
pub const DEFAULT_CONFIG_FILE: &str = "synapse.toml";

/// Environment variable overriding the worker endpoint.
pub const ENDPOINT_ENV: &str = "SYNAPSE_ENDPOINT";
/// Environment variable overriding the access passphrase.
pub const PASSPHRASE_ENV: &str = "SYNAPSE_PASSPHRASE";
/// Environment variable overriding the internal dataset source.
pub const INTERNAL_DATA_ENV: &str = "SYNAPSE_INTERNAL_DATA";
/// Environment variable overriding the external dataset source.
pub const EXTERNAL_DATA_ENV: &str = "SYNAPSE_EXTERNAL_DATA";

/// Loads configuration for one session.
///
/// An explicit `path` must exist; without one, [`DEFAULT_CONFIG_FILE`] is
/// used when present and silently skipped otherwise. Environment overrides
/// apply on top of whatever the file provided.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] if an explicitly named file cannot be
/// read, or [`ConfigError::Parse`] if any consulted file is not valid for
/// the schema.
pub fn load(path: Option<&Path>) -> ConfigResult<SynapseConfig> {
    let mut config = match path {
        Some(path) => from_file(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                from_file(fallback)?
            } else {
                debug!("no config file found, using defaults");
                SynapseConfig::default()
            }
        }
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn from_file(path: &Path) -> ConfigResult<SynapseConfig> {
    let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    let config = toml::from_str(&contents).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })?;

    debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

fn apply_env_overrides(config: &mut SynapseConfig) {
    if let Ok(endpoint) = env::var(ENDPOINT_ENV) {
        config.endpoint = endpoint;
    }
    if let Ok(passphrase) = env::var(PASSPHRASE_ENV) {
        config.passphrase = passphrase;
    }
    if let Ok(internal) = env::var(INTERNAL_DATA_ENV) {
        config.internal_data = internal;
    }
    if let Ok(external) = env::var(EXTERNAL_DATA_ENV) {
        config.external_data = external;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_file_is_required_to_exist() {
        let err = load(Some(Path::new("no/such/synapse.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "passphrase = \"hypothesis\"").unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.passphrase, "hypothesis");
        assert_eq!(config.endpoint, crate::schema::DEFAULT_ENDPOINT);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = [not toml").unwrap();

        let err = load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
