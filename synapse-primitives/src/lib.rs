//! Core shared types for the Synapse protocol planner.

#![warn(missing_docs, clippy::pedantic)]

mod dataset;
mod error;
mod message;

/// Equipment dataset types and the session readiness state.
pub use dataset::{
    Dataset, DatasetSource, EXTERNAL_DATASET_LABEL, EquipmentData, INTERNAL_DATASET_LABEL,
    Readiness,
};
/// Error type and result alias for startup data loading.
pub use error::{DataError, DataResult};
/// Conversation roles and transcript entries.
pub use message::{ChatMessage, ChatRole};
