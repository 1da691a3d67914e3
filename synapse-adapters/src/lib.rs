//! Outbound adapters for the Synapse protocol planner.
//!
//! [`worker`] posts composed prompts to the relay worker fronting the
//! generation endpoint, [`response`] interprets the multi-shape answers it
//! relays, and [`datasets`] performs the concurrent startup load of the two
//! equipment documents. Everything shares the trait-based seam defined in
//! [`traits`].

#![warn(missing_docs, clippy::pedantic)]

pub mod datasets;
pub mod response;
pub mod traits;
pub mod worker;

mod http_client;
