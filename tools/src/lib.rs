//! Configuration and tooling for launching merge testnets.
mod config;
pub mod dry_run;
mod summary;

#[cfg(test)]
mod tests;

pub use config::{decode_json, encode_json, NetworkConfig, DEFAULT_NETWORK_ID};
pub use summary::{summarize, ParticipantSummary};
