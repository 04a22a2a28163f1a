//! Test-only launchers which record their calls instead of starting anything.
use std::{
    io::IsTerminal as _,
    net::{IpAddr, Ipv4Addr},
    path::Path,
    sync::{Arc, Mutex},
};

use rand::{
    distributions::{Distribution, Standard},
    seq::SliceRandom as _,
    Rng,
};

use crate::{
    ClClientContext, ClClientLauncher, ClClientType, ClLauncherRegistry, ElClientContext,
    ElClientLauncher, ElClientType, ElLauncherRegistry, EnclaveContext, LogLevel,
    NodeKeystoreDirpaths, ParticipantSpec, ServiceId,
};

impl Distribution<ParticipantSpec> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticipantSpec {
        ParticipantSpec {
            el_client_type: *ElClientType::ALL.choose(rng).unwrap(),
            cl_client_type: *ClClientType::ALL.choose(rng).unwrap(),
        }
    }
}

/// Installs a tracing subscriber writing to the test output.
/// Filtering is controlled by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .with_ansi(std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal())
        .with_line_number(true)
        .try_init();
}

/// Enclave used by tests.
pub fn enclave() -> EnclaveContext {
    EnclaveContext {
        enclave_id: "test-enclave".to_owned(),
        data_dirpath: "/test-enclave".into(),
    }
}

/// Keystore assignments for `n` nodes.
pub fn keystores(n: usize) -> Vec<NodeKeystoreDirpaths> {
    (0..n)
        .map(|i| NodeKeystoreDirpaths::under(Path::new(&format!("/keystores/node-{i}"))))
        .collect()
}

/// Recorded call to [`ElClientLauncher::launch()`].
#[derive(Debug, Clone)]
pub struct ElLaunch {
    /// Launched client type.
    pub client_type: ElClientType,
    /// Requested service.
    pub service_id: ServiceId,
    /// Requested log level.
    pub log_level: LogLevel,
    /// Network identifier.
    pub network_id: String,
    /// Bootnode the client was pointed at.
    pub bootnode: Option<Arc<ElClientContext>>,
}

/// Recorded call to [`ClClientLauncher::launch()`].
#[derive(Debug, Clone)]
pub struct ClLaunch {
    /// Launched client type.
    pub client_type: ClClientType,
    /// Requested service.
    pub service_id: ServiceId,
    /// Requested log level.
    pub log_level: LogLevel,
    /// Bootnode the client was pointed at.
    pub bootnode: Option<Arc<ClClientContext>>,
    /// EL client the beacon node was paired with.
    pub el_client: Arc<ElClientContext>,
    /// Validator keys the client was launched with.
    pub keystores: NodeKeystoreDirpaths,
}

/// Recorded launcher call.
#[derive(Debug, Clone)]
pub enum LaunchCall {
    /// EL client launch.
    El(ElLaunch),
    /// CL client launch.
    Cl(ClLaunch),
}

impl LaunchCall {
    /// Service requested by the call.
    pub fn service_id(&self) -> &ServiceId {
        match self {
            Self::El(call) => &call.service_id,
            Self::Cl(call) => &call.service_id,
        }
    }
}

#[derive(Debug, Default)]
struct CallLogInner {
    calls: Vec<LaunchCall>,
    fail_on: Vec<ServiceId>,
}

/// Calls made to the test launchers, shared between all the launchers of a test.
#[derive(Debug, Default, Clone)]
pub struct CallLog(Arc<Mutex<CallLogInner>>);

impl CallLog {
    /// Makes the launch of `service_id` fail (after it gets recorded).
    pub fn fail_on(&self, service_id: ServiceId) {
        self.0.lock().unwrap().fail_on.push(service_id);
    }

    /// All calls in the order they were made.
    pub fn calls(&self) -> Vec<LaunchCall> {
        self.0.lock().unwrap().calls.clone()
    }

    /// EL launches in the order they were made.
    pub fn el_launches(&self) -> Vec<ElLaunch> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                LaunchCall::El(call) => Some(call),
                LaunchCall::Cl(_) => None,
            })
            .collect()
    }

    /// CL launches in the order they were made.
    pub fn cl_launches(&self) -> Vec<ClLaunch> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                LaunchCall::Cl(call) => Some(call),
                LaunchCall::El(_) => None,
            })
            .collect()
    }

    /// Records `call` and fails if its service was marked to fail.
    fn record(&self, call: LaunchCall) -> anyhow::Result<usize> {
        let mut this = self.0.lock().unwrap();
        let service_id = call.service_id().clone();
        this.calls.push(call);
        anyhow::ensure!(
            !this.fail_on.contains(&service_id),
            "service '{service_id}' failed to start"
        );
        Ok(this.calls.len())
    }
}

fn ip_addr(seq: usize) -> IpAddr {
    Ipv4Addr::new(172, 16, (seq / 256) as u8, (seq % 256) as u8).into()
}

/// EL launcher recording its calls in a [`CallLog`].
#[derive(Debug)]
pub struct TestElLauncher {
    client_type: ElClientType,
    log: CallLog,
}

impl TestElLauncher {
    /// Constructs a launcher of `client_type` clients.
    pub fn new(client_type: ElClientType, log: CallLog) -> Self {
        Self { client_type, log }
    }
}

#[async_trait::async_trait]
impl ElClientLauncher for TestElLauncher {
    async fn launch(
        &self,
        _enclave: &EnclaveContext,
        service_id: &ServiceId,
        log_level: LogLevel,
        network_id: &str,
        bootnode: Option<&Arc<ElClientContext>>,
    ) -> anyhow::Result<ElClientContext> {
        // Give concurrent callers a chance to interleave.
        tokio::task::yield_now().await;
        let seq = self.log.record(LaunchCall::El(ElLaunch {
            client_type: self.client_type,
            service_id: service_id.clone(),
            log_level,
            network_id: network_id.to_owned(),
            bootnode: bootnode.cloned(),
        }))?;
        let ip_addr = ip_addr(seq);
        Ok(ElClientContext {
            client_name: self.client_type.to_string(),
            ip_addr,
            rpc_port: 8545,
            ws_port: 8546,
            engine_rpc_port: 8551,
            enode: format!("enode://{service_id}@{ip_addr}:30303"),
        })
    }
}

/// CL launcher recording its calls in a [`CallLog`].
#[derive(Debug)]
pub struct TestClLauncher {
    client_type: ClClientType,
    log: CallLog,
}

impl TestClLauncher {
    /// Constructs a launcher of `client_type` clients.
    pub fn new(client_type: ClClientType, log: CallLog) -> Self {
        Self { client_type, log }
    }
}

#[async_trait::async_trait]
impl ClClientLauncher for TestClLauncher {
    async fn launch(
        &self,
        _enclave: &EnclaveContext,
        service_id: &ServiceId,
        log_level: LogLevel,
        bootnode: Option<&Arc<ClClientContext>>,
        el_client: &Arc<ElClientContext>,
        keystores: &NodeKeystoreDirpaths,
    ) -> anyhow::Result<ClClientContext> {
        tokio::task::yield_now().await;
        let seq = self.log.record(LaunchCall::Cl(ClLaunch {
            client_type: self.client_type,
            service_id: service_id.clone(),
            log_level,
            bootnode: bootnode.cloned(),
            el_client: el_client.clone(),
            keystores: keystores.clone(),
        }))?;
        Ok(ClClientContext {
            client_name: self.client_type.to_string(),
            ip_addr: ip_addr(seq),
            http_port: 4000,
            enr: format!("enr:-{service_id}"),
        })
    }
}

/// Registries with a recording launcher for every EL client type in `el`
/// and every CL client type in `cl`.
pub fn registries(
    log: &CallLog,
    el: &[ElClientType],
    cl: &[ClClientType],
) -> (ElLauncherRegistry, ClLauncherRegistry) {
    let el_launchers = el
        .iter()
        .map(|t| {
            let launcher: Arc<dyn ElClientLauncher> = Arc::new(TestElLauncher::new(*t, log.clone()));
            (*t, launcher)
        })
        .collect();
    let cl_launchers = cl
        .iter()
        .map(|t| {
            let launcher: Arc<dyn ClClientLauncher> = Arc::new(TestClLauncher::new(*t, log.clone()));
            (*t, launcher)
        })
        .collect();
    (el_launchers, cl_launchers)
}

/// Registries with a recording launcher for every supported client type.
pub fn full_registries(log: &CallLog) -> (ElLauncherRegistry, ClLauncherRegistry) {
    registries(log, &ElClientType::ALL, &ClClientType::ALL)
}
