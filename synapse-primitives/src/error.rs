//! Shared error definitions for startup data loading.

use thiserror::Error;

/// Result alias for dataset loading operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while loading the startup equipment documents.
///
/// Any of these is fatal to session readiness: the interactive surface is
/// never enabled over partial data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The document could not be fetched or read.
    #[error("failed to load {dataset}: {reason}")]
    Load {
        /// Label of the dataset that failed.
        dataset: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// The document was retrieved but is not valid JSON.
    #[error("failed to parse {dataset}: {reason}")]
    Parse {
        /// Label of the dataset that failed.
        dataset: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

impl DataError {
    /// Convenience constructor for fetch and read failures.
    #[must_use]
    pub fn load(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for parse failures.
    #[must_use]
    pub fn parse(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }
}
