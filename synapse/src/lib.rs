//! Synapse protocol planner SDK facade.
//!
//! Bundles the library crates behind feature flags so embedders can pull in
//! only the pieces they need; the `synapse-chat` binary consumes the member
//! crates directly.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use synapse_primitives as primitives;

/// Generation adapter, response interpretation, and dataset loading
/// (enabled by the `adapters` feature).
#[cfg(feature = "adapters")]
pub use synapse_adapters as adapters;

/// Prompt composition (enabled by the `prompts` feature).
#[cfg(feature = "prompts")]
pub use synapse_prompts as prompts;

/// Configuration management (enabled by the `config` feature).
#[cfg(feature = "config")]
pub use synapse_config as config;
