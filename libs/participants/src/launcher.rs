use std::{fmt, sync::Arc};

use crate::{
    ClClientContext, ElClientContext, EnclaveContext, LogLevel, NodeKeystoreDirpaths, ServiceId,
};

/// Starts EL clients of a single client type.
///
/// Implementations provision a service on the orchestration platform and return once
/// the client is reachable. They are called at most once per participant.
#[async_trait::async_trait]
pub trait ElClientLauncher: 'static + fmt::Debug + Send + Sync {
    /// Launches an EL client as service `service_id`.
    ///
    /// `bootnode` is `None` if the launched client is the EL bootnode itself,
    /// otherwise it is the context of the bootnode the client should discover peers through.
    async fn launch(
        &self,
        enclave: &EnclaveContext,
        service_id: &ServiceId,
        log_level: LogLevel,
        network_id: &str,
        bootnode: Option<&Arc<ElClientContext>>,
    ) -> anyhow::Result<ElClientContext>;
}

/// Starts CL clients (a beacon node together with a validator) of a single client type.
#[async_trait::async_trait]
pub trait ClClientLauncher: 'static + fmt::Debug + Send + Sync {
    /// Launches a CL client as service `service_id`.
    ///
    /// `bootnode` is `None` if the launched client is the CL bootnode itself.
    /// `el_client` is the EL client of the same participant, which the beacon node
    /// drives through the engine API. `keystores` holds the validator keys to run with.
    async fn launch(
        &self,
        enclave: &EnclaveContext,
        service_id: &ServiceId,
        log_level: LogLevel,
        bootnode: Option<&Arc<ClClientContext>>,
        el_client: &Arc<ElClientContext>,
        keystores: &NodeKeystoreDirpaths,
    ) -> anyhow::Result<ClClientContext>;
}
