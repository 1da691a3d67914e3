//! Prompt composition for the Synapse protocol planner.
//!
//! The composer merges the fixed instruction template with the two loaded
//! equipment datasets and the current experiment description into the single
//! text payload sent to the generation endpoint.

#![warn(missing_docs, clippy::pedantic)]

mod composer;
mod instructions;

/// Prompt composer and its error surface.
pub use composer::{ComposeError, ComposeResult, PromptComposer};
/// The fixed protocol-generator instruction template.
pub use instructions::PROTOCOL_INSTRUCTIONS;
