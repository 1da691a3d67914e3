//! Strongly typed configuration schema.

use std::time::Duration;

use serde::Deserialize;

use synapse_primitives::DatasetSource;

/// Default relay worker endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://gemini-ai-chat.alirezahekmati80.workers.dev";

/// Default access passphrase.
///
/// The gate is a convenience latch, not an access-control mechanism: the
/// passphrase ships inside the client and is visible to anyone who looks.
pub const DEFAULT_PASSPHRASE: &str = "admin";

/// Default source of the in-house equipment dataset.
pub const DEFAULT_INTERNAL_DATA: &str = "Lab_equipments.json";

/// Default source of the other-institutions equipment dataset.
pub const DEFAULT_EXTERNAL_DATA: &str = "lab_out.json";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Settings for one chat session.
///
/// Every field has a compiled-in default, so an empty file (or no file at
/// all) yields a working configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SynapseConfig {
    /// Relay worker URL generation requests are posted to.
    pub endpoint: String,
    /// Shared secret unlocking the interactive surface.
    pub passphrase: String,
    /// Path or URL of the in-house equipment document.
    pub internal_data: String,
    /// Path or URL of the other-institutions equipment document.
    pub external_data: String,
    /// Seconds to wait for one generation request before giving up.
    pub request_timeout_secs: u64,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            passphrase: DEFAULT_PASSPHRASE.to_owned(),
            internal_data: DEFAULT_INTERNAL_DATA.to_owned(),
            external_data: DEFAULT_EXTERNAL_DATA.to_owned(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SynapseConfig {
    /// Classified source of the in-house dataset.
    #[must_use]
    pub fn internal_source(&self) -> DatasetSource {
        DatasetSource::parse(&self.internal_data)
    }

    /// Classified source of the other-institutions dataset.
    #[must_use]
    pub fn external_source(&self) -> DatasetSource {
        DatasetSource::parse(&self.external_data)
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_field() {
        let config: SynapseConfig = toml::from_str("").unwrap();
        assert_eq!(config, SynapseConfig::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.passphrase, DEFAULT_PASSPHRASE);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: SynapseConfig =
            toml::from_str("endpoint = \"http://localhost:8787\"\nrequest_timeout_secs = 5\n")
                .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8787");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.internal_data, DEFAULT_INTERNAL_DATA);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = toml::from_str::<SynapseConfig>("passwrod = \"oops\"");
        assert!(result.is_err());
    }

    #[test]
    fn sources_classify_paths_and_urls() {
        let config: SynapseConfig =
            toml::from_str("internal_data = \"https://lab.example/equipment.json\"").unwrap();
        assert!(matches!(config.internal_source(), DatasetSource::Url(_)));
        assert!(matches!(config.external_source(), DatasetSource::Path(_)));
    }
}
