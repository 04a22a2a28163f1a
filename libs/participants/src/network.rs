//! Launching of the participants, either all at once or one at a time.
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    ClClientType, ClLauncherRegistry, ElClientType, ElLauncherRegistry, EnclaveContext,
    LaunchError, Layer, LogLevel, NodeKeystoreDirpaths, Participant, ParticipantSpec, ServiceId,
};

/// Index of the participant whose clients are the bootnodes of the network.
pub const BOOT_PARTICIPANT_INDEX: usize = 0;

/// Everything a launch needs apart from the participant itself.
struct Launch<'a> {
    enclave: &'a EnclaveContext,
    network_id: &'a str,
    el_launchers: &'a ElLauncherRegistry,
    cl_launchers: &'a ClLauncherRegistry,
    keystores: &'a [NodeKeystoreDirpaths],
    log_level: LogLevel,
}

impl Launch<'_> {
    /// Launches the participant following the already `launched` ones.
    ///
    /// The new participant gets index `launched.len()`. If `launched` is empty it becomes
    /// the bootnode of both layers, otherwise it is pointed at the clients of the
    /// participant at [`BOOT_PARTICIPANT_INDEX`].
    async fn next(
        &self,
        launched: &[Participant],
        spec: ParticipantSpec,
    ) -> Result<Participant, LaunchError> {
        let index = launched.len();
        let ParticipantSpec {
            el_client_type,
            cl_client_type,
        } = spec;

        let el_launcher = self.el_launchers.get(&el_client_type).ok_or_else(|| {
            LaunchError::UnknownClientType {
                index,
                layer: Layer::Execution,
                client_type: el_client_type.to_string(),
            }
        })?;
        let cl_launcher = self.cl_launchers.get(&cl_client_type).ok_or_else(|| {
            LaunchError::UnknownClientType {
                index,
                layer: Layer::Consensus,
                client_type: cl_client_type.to_string(),
            }
        })?;
        let keystores = self
            .keystores
            .get(index)
            .ok_or(LaunchError::NotEnoughKeystores {
                participants: index + 1,
                keystores: self.keystores.len(),
            })?;

        // `None` iff the new participant is the boot participant.
        let boot = launched.get(BOOT_PARTICIPANT_INDEX);
        tracing::info!(
            index,
            el = %el_client_type,
            cl = %cl_client_type,
            bootnode = boot.is_none(),
            "Launching participant"
        );

        let el_service_id = ServiceId::el_client(index);
        tracing::debug!(service_id = %el_service_id, "Launching EL client");
        let el_client_context = el_launcher
            .launch(
                self.enclave,
                &el_service_id,
                self.log_level,
                self.network_id,
                boot.map(Participant::el_client_context),
            )
            .await
            .map_err(|source| LaunchError::LaunchFailure {
                index,
                layer: Layer::Execution,
                service_id: el_service_id,
                source,
            })?;
        let el_client_context = Arc::new(el_client_context);

        let cl_service_id = ServiceId::cl_client(index);
        tracing::debug!(service_id = %cl_service_id, "Launching CL client");
        let cl_client_context = cl_launcher
            .launch(
                self.enclave,
                &cl_service_id,
                self.log_level,
                boot.map(Participant::cl_client_context),
                &el_client_context,
                keystores,
            )
            .await
            .map_err(|source| LaunchError::LaunchFailure {
                index,
                layer: Layer::Consensus,
                service_id: cl_service_id,
                source,
            })?;

        tracing::info!(index, "Participant launched");
        Ok(Participant::new(
            el_client_type,
            cl_client_type,
            el_client_context,
            Arc::new(cl_client_context),
        ))
    }
}

/// Launches a participant for every entry of `specs`, in order, and returns them in the same order.
///
/// The participant at [`BOOT_PARTICIPANT_INDEX`] is launched first and serves as the
/// bootnode of both layers for all the others. `keystores[i]` is handed to the CL client
/// of participant `i`.
///
/// Launching stops at the first error. Participants launched up to that point are
/// neither returned nor torn down; cleaning up the enclave is left to the caller.
pub async fn launch_participant_network(
    enclave: &EnclaveContext,
    network_id: &str,
    el_launchers: &ElLauncherRegistry,
    cl_launchers: &ClLauncherRegistry,
    specs: &[ParticipantSpec],
    keystores: &[NodeKeystoreDirpaths],
    log_level: LogLevel,
) -> Result<Vec<Participant>, LaunchError> {
    if keystores.len() < specs.len() {
        return Err(LaunchError::NotEnoughKeystores {
            participants: specs.len(),
            keystores: keystores.len(),
        });
    }
    let launch = Launch {
        enclave,
        network_id,
        el_launchers,
        cl_launchers,
        keystores,
        log_level,
    };
    let mut participants = Vec::with_capacity(specs.len());
    for spec in specs {
        let participant = launch.next(&participants, *spec).await.inspect_err(|err| {
            tracing::warn!("Launching participant network failed: {}", err.report());
        })?;
        participants.push(participant);
    }
    Ok(participants)
}

/// A running network which participants are added to one at a time.
///
/// Concurrent calls to [`Self::add_participant()`] are serialized, so every
/// participant gets a distinct index and the first one added becomes the bootnode.
#[derive(Debug)]
pub struct ParticipantNetwork {
    enclave: EnclaveContext,
    network_id: String,
    keystores: Vec<NodeKeystoreDirpaths>,
    el_launchers: ElLauncherRegistry,
    cl_launchers: ClLauncherRegistry,
    participants: Mutex<Vec<Participant>>,
}

impl ParticipantNetwork {
    /// Constructs a network without participants.
    /// `keystores[i]` will be handed to the CL client of the `i`-th added participant.
    pub fn new(
        enclave: EnclaveContext,
        network_id: String,
        keystores: Vec<NodeKeystoreDirpaths>,
        el_launchers: ElLauncherRegistry,
        cl_launchers: ClLauncherRegistry,
    ) -> Self {
        Self {
            enclave,
            network_id,
            keystores,
            el_launchers,
            cl_launchers,
            participants: Mutex::new(vec![]),
        }
    }

    /// Enclave the participants are launched in.
    pub fn enclave(&self) -> &EnclaveContext {
        &self.enclave
    }

    /// Identifier of the network.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Launches a new participant and appends it to the network.
    ///
    /// The lock on the participants is held for the whole launch. On error the network
    /// is left as it was before the call.
    pub async fn add_participant(
        &self,
        el_client_type: ElClientType,
        cl_client_type: ClClientType,
        log_level: LogLevel,
    ) -> Result<Participant, LaunchError> {
        let mut participants = self.participants.lock().await;
        let launch = Launch {
            enclave: &self.enclave,
            network_id: &self.network_id,
            el_launchers: &self.el_launchers,
            cl_launchers: &self.cl_launchers,
            keystores: &self.keystores,
            log_level,
        };
        let spec = ParticipantSpec {
            el_client_type,
            cl_client_type,
        };
        let participant = launch
            .next(&participants, spec)
            .await
            .inspect_err(|err| {
                tracing::warn!("Adding participant failed: {}", err.report());
            })?;
        participants.push(participant.clone());
        Ok(participant)
    }

    /// Snapshot of the participants, in the order they were added.
    pub async fn participants(&self) -> Vec<Participant> {
        self.participants.lock().await.clone()
    }

    /// Number of participants.
    pub async fn len(&self) -> usize {
        self.participants.lock().await.len()
    }

    /// Consumes the network, returning its participants.
    pub fn into_participants(self) -> Vec<Participant> {
        self.participants.into_inner()
    }
}
