//! Equipment dataset types and the session readiness state.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DataError, DataResult};

/// Label of the in-house equipment dataset, as referenced in prompts.
pub const INTERNAL_DATASET_LABEL: &str = "Lab_equipments.json";

/// Label of the other-institutions equipment dataset, as referenced in
/// prompts.
pub const EXTERNAL_DATASET_LABEL: &str = "lab_out.json";

/// Where a dataset document is read from at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatasetSource {
    /// Fetched over HTTP(S) with a read-only GET.
    Url(String),
    /// Read from the local filesystem.
    Path(PathBuf),
}

impl DatasetSource {
    /// Classifies a configuration string as a URL or a filesystem path.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let trimmed = spec.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

impl Display for DatasetSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One parsed equipment document, held read-only for the session lifetime.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Dataset {
    label: String,
    value: Value,
}

impl Dataset {
    /// Wraps an already-parsed JSON document under the supplied label.
    #[must_use]
    pub fn new(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }

    /// Parses raw bytes into a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] if the bytes are not valid JSON.
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8]) -> DataResult<Self> {
        let label = label.into();
        let value = serde_json::from_slice(bytes)
            .map_err(|err| DataError::parse(label.clone(), err.to_string()))?;
        Ok(Self { label, value })
    }

    /// Returns the label the dataset is referred to by in prompts.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the underlying JSON document.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Renders the document as pretty-printed, round-trippable JSON.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.value)
            .unwrap_or_else(|_| self.value.to_string())
    }
}

/// The pair of datasets every prompt is grounded on.
///
/// A value of this type only exists once both documents loaded
/// successfully, so holding one *is* the readiness proof: the prompt
/// composer takes `&EquipmentData` and can therefore never run against
/// missing data.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct EquipmentData {
    internal: Dataset,
    external: Dataset,
}

impl EquipmentData {
    /// Pairs the in-house and external equipment documents.
    #[must_use]
    pub const fn new(internal: Dataset, external: Dataset) -> Self {
        Self { internal, external }
    }

    /// Returns the in-house equipment dataset.
    #[must_use]
    pub const fn internal(&self) -> &Dataset {
        &self.internal
    }

    /// Returns the other-institutions equipment dataset.
    #[must_use]
    pub const fn external(&self) -> &Dataset {
        &self.external
    }
}

/// Lifecycle of the interactive surface.
///
/// Replaces the ready-boolean-plus-two-nullable-slots shape with a single
/// state: the surface is enabled only in `Ready`, and `Failed` is terminal
/// for the session.
#[derive(Clone, Debug)]
pub enum Readiness {
    /// Startup data has not been requested or has not arrived yet.
    NotReady,
    /// Both datasets loaded; requests may be composed.
    Ready(EquipmentData),
    /// A startup load failed; the surface stays disabled.
    Failed(String),
}

impl Readiness {
    /// Returns the loaded data when the session is ready.
    #[must_use]
    pub const fn data(&self) -> Option<&EquipmentData> {
        match self {
            Self::Ready(data) => Some(data),
            Self::NotReady | Self::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_classifies_urls_and_paths() {
        assert_eq!(
            DatasetSource::parse("https://lab.example/equipment.json"),
            DatasetSource::Url("https://lab.example/equipment.json".to_owned())
        );
        assert_eq!(
            DatasetSource::parse("data/Lab_equipments.json"),
            DatasetSource::Path(PathBuf::from("data/Lab_equipments.json"))
        );
    }

    #[test]
    fn from_bytes_rejects_invalid_json() {
        let err = Dataset::from_bytes("Lab_equipments.json", b"not json").unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
        assert!(err.to_string().contains("Lab_equipments.json"));
    }

    #[test]
    fn pretty_json_round_trips() {
        let value = json!({"Equipment_Name": "Thermocycler", "Quantity": 2});
        let dataset = Dataset::new("Lab_equipments.json", value.clone());
        let rendered = dataset.to_pretty_json();
        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn readiness_exposes_data_only_when_ready() {
        let data = EquipmentData::new(
            Dataset::new("Lab_equipments.json", json!([])),
            Dataset::new("lab_out.json", json!([])),
        );
        assert!(Readiness::Ready(data).data().is_some());
        assert!(Readiness::NotReady.data().is_none());
        assert!(Readiness::Failed("boom".to_owned()).data().is_none());
    }
}
