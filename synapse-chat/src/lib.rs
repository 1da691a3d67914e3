//! Terminal chat client for the Synapse protocol planner.
//!
//! Wires the passphrase gate, the startup data load, and the interactive
//! loop together over the library crates.

#![warn(missing_docs, clippy::pedantic)]

mod gate;
mod render;
mod session;

/// The shared-secret gate in front of the interactive surface.
pub use gate::AccessGate;
/// Terminal rendering of transcript entries.
pub use render::{render_fatal, render_message, style_markdown};
/// The interactive chat session.
pub use session::{ChatSession, READY_GREETING};
