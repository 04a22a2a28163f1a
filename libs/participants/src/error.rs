use std::fmt::{self, Write as _};

use crate::ServiceId;

/// Layer of a participant's node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Execution layer.
    Execution,
    /// Consensus layer.
    Consensus,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Execution => "EL",
            Self::Consensus => "CL",
        })
    }
}

/// Errors returned when launching participants.
/// None of them are retried and already launched participants are not torn down.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// There are fewer validator keystore assignments than participants to launch.
    #[error("{keystores} validator keystore assignment(s) provided for {participants} participant(s)")]
    NotEnoughKeystores {
        /// Number of participants that need an assignment.
        participants: usize,
        /// Number of assignments provided.
        keystores: usize,
    },
    /// No launcher is registered for the requested client type.
    #[error("no {layer} client launcher defined for {layer} client type '{client_type}' (participant {index})")]
    UnknownClientType {
        /// Index of the participant.
        index: usize,
        /// Layer of the client.
        layer: Layer,
        /// Name of the requested client type.
        client_type: String,
    },
    /// A launcher failed to start a client.
    #[error("an error occurred launching {layer} client '{service_id}' for participant {index}")]
    LaunchFailure {
        /// Index of the participant.
        index: usize,
        /// Layer of the client.
        layer: Layer,
        /// Service that failed to launch.
        service_id: ServiceId,
        /// Error reported by the launcher.
        #[source]
        source: anyhow::Error,
    },
}

impl LaunchError {
    /// Error message followed by the messages of all its causes, separated by ": ".
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let _ = write!(report, ": {err}");
            cause = std::error::Error::source(err);
        }
        report
    }

    /// Index of the participant the error concerns, if it concerns a single one.
    pub fn participant_index(&self) -> Option<usize> {
        match self {
            Self::NotEnoughKeystores { .. } => None,
            Self::UnknownClientType { index, .. } | Self::LaunchFailure { index, .. } => {
                Some(*index)
            }
        }
    }

    /// Layer the error concerns, if it concerns a single one.
    pub fn layer(&self) -> Option<Layer> {
        match self {
            Self::NotEnoughKeystores { .. } => None,
            Self::UnknownClientType { layer, .. } | Self::LaunchFailure { layer, .. } => {
                Some(*layer)
            }
        }
    }
}
