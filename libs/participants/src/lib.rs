//! Launch orchestration for a network of testnet participants.
//!
//! Every participant is a pair of nodes: an execution layer (EL) client and a
//! consensus layer (CL) client, the latter running both a beacon node and a validator.
//! The first participant is the bootnode of both layers, every other participant is
//! pointed at it for peer discovery. Starting a concrete client is delegated to
//! pluggable launchers, selected per participant from caller-supplied registries.
mod client;
mod context;
mod error;
mod keystores;
mod launcher;
mod network;
mod participant;
mod registry;
pub mod testonly;

pub use crate::{
    client::{ClClientType, ElClientType, LogLevel, ParseClientTypeError},
    context::{ClClientContext, ElClientContext, EnclaveContext, ServiceId},
    error::{LaunchError, Layer},
    keystores::NodeKeystoreDirpaths,
    launcher::{ClClientLauncher, ElClientLauncher},
    network::{launch_participant_network, ParticipantNetwork, BOOT_PARTICIPANT_INDEX},
    participant::{Participant, ParticipantSpec},
    registry::{ClLauncherRegistry, ElLauncherRegistry, LauncherRegistry},
};
