//! Identifiers of the supported client implementations.
use std::{fmt, str::FromStr};

/// Error returned when a client type or log level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{name}'")]
pub struct ParseClientTypeError {
    kind: &'static str,
    name: String,
}

/// Execution layer client implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElClientType {
    /// go-ethereum.
    Geth,
    /// Nethermind.
    Nethermind,
    /// Hyperledger Besu.
    Besu,
    /// Erigon.
    Erigon,
}

impl ElClientType {
    /// All supported EL client types.
    pub const ALL: [Self; 4] = [Self::Geth, Self::Nethermind, Self::Besu, Self::Erigon];

    /// Name used in configuration files and service labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Geth => "geth",
            Self::Nethermind => "nethermind",
            Self::Besu => "besu",
            Self::Erigon => "erigon",
        }
    }
}

/// Consensus layer client implementation (beacon node + validator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClClientType {
    /// Lighthouse.
    Lighthouse,
    /// Lodestar.
    Lodestar,
    /// Nimbus.
    Nimbus,
    /// Prysm.
    Prysm,
    /// Teku.
    Teku,
}

impl ClClientType {
    /// All supported CL client types.
    pub const ALL: [Self; 5] = [
        Self::Lighthouse,
        Self::Lodestar,
        Self::Nimbus,
        Self::Prysm,
        Self::Teku,
    ];

    /// Name used in configuration files and service labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lighthouse => "lighthouse",
            Self::Lodestar => "lodestar",
            Self::Nimbus => "nimbus",
            Self::Prysm => "prysm",
            Self::Teku => "teku",
        }
    }
}

/// Verbosity the launched clients should log with.
/// Launchers translate it into the client specific flag.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Default verbosity.
    #[default]
    Info,
    /// Debug output.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// All log levels, from the least to the most verbose.
    pub const ALL: [Self; 5] = [
        Self::Error,
        Self::Warn,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

macro_rules! impl_name_conversions {
    ($t:ty, $kind:literal) => {
        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $t {
            type Err = ParseClientTypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$t>::ALL
                    .into_iter()
                    .find(|v| v.name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseClientTypeError {
                        kind: $kind,
                        name: s.to_owned(),
                    })
            }
        }
    };
}

impl_name_conversions!(ElClientType, "EL client type");
impl_name_conversions!(ClClientType, "CL client type");
impl_name_conversions!(LogLevel, "log level");
