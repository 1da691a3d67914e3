//! Configuration management for the Synapse chat client.
//!
//! Precedence, lowest to highest: compiled-in defaults, the TOML config
//! file, then `SYNAPSE_*` environment variables.

#![warn(missing_docs, clippy::pedantic)]

mod loader;
mod schema;

/// Loader entry point and its error surface.
pub use loader::{
    ConfigError, ConfigResult, DEFAULT_CONFIG_FILE, ENDPOINT_ENV, EXTERNAL_DATA_ENV,
    INTERNAL_DATA_ENV, PASSPHRASE_ENV, load,
};
/// Typed configuration schema and its defaults.
pub use schema::{
    DEFAULT_ENDPOINT, DEFAULT_EXTERNAL_DATA, DEFAULT_INTERNAL_DATA, DEFAULT_PASSPHRASE,
    SynapseConfig,
};
