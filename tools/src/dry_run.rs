//! Launchers which only allocate addresses and identities for the clients, without
//! starting anything. Used to check a configuration and preview the resulting network.
use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use merge_testnet_participants::{
    ClClientContext, ClClientLauncher, ClClientType, ClLauncherRegistry, ElClientContext,
    ElClientLauncher, ElClientType, ElLauncherRegistry, EnclaveContext, LogLevel,
    NodeKeystoreDirpaths, ServiceId,
};

const EL_RPC_PORT: u16 = 8545;
const EL_WS_PORT: u16 = 8546;
const EL_ENGINE_RPC_PORT: u16 = 8551;
const EL_DISCOVERY_PORT: u16 = 30303;
const CL_DISCOVERY_PORT: u16 = 9000;

/// Hands out consecutive addresses of the 172.16.0.0/16 enclave subnet.
#[derive(Debug)]
pub struct AddressAllocator(AtomicU32);

impl Default for AddressAllocator {
    fn default() -> Self {
        // .0.0 and .0.1 are reserved for the network and its gateway.
        Self(AtomicU32::new(2))
    }
}

impl AddressAllocator {
    fn next(&self) -> anyhow::Result<Ipv4Addr> {
        let n = self.0.fetch_add(1, Ordering::Relaxed);
        anyhow::ensure!(n < 1 << 16, "enclave subnet exhausted");
        Ok(Ipv4Addr::from(u32::from(Ipv4Addr::new(172, 16, 0, 0)) | n))
    }
}

/// Pretends to launch EL clients of a single type.
#[derive(Debug)]
pub struct DryRunElLauncher {
    client_type: ElClientType,
    addrs: Arc<AddressAllocator>,
}

#[async_trait::async_trait]
impl ElClientLauncher for DryRunElLauncher {
    async fn launch(
        &self,
        enclave: &EnclaveContext,
        service_id: &ServiceId,
        log_level: LogLevel,
        network_id: &str,
        bootnode: Option<&Arc<ElClientContext>>,
    ) -> anyhow::Result<ElClientContext> {
        let ip = self.addrs.next()?;
        let enode = format!("enode://{:0>128x}@{ip}:{EL_DISCOVERY_PORT}", u32::from(ip));
        let ip_addr = IpAddr::V4(ip);
        tracing::info!(
            enclave = %enclave.enclave_id,
            %service_id,
            client = %self.client_type,
            %log_level,
            network_id,
            bootnode = bootnode.map(|b| b.enode.as_str()),
            %ip_addr,
            "Dry run: EL client"
        );
        Ok(ElClientContext {
            client_name: self.client_type.to_string(),
            ip_addr,
            rpc_port: EL_RPC_PORT,
            ws_port: EL_WS_PORT,
            engine_rpc_port: EL_ENGINE_RPC_PORT,
            enode,
        })
    }
}

/// Pretends to launch CL clients of a single type.
#[derive(Debug)]
pub struct DryRunClLauncher {
    client_type: ClClientType,
    addrs: Arc<AddressAllocator>,
}

impl DryRunClLauncher {
    fn http_port(&self) -> u16 {
        match self.client_type {
            ClClientType::Prysm => 3500,
            ClClientType::Lighthouse
            | ClClientType::Lodestar
            | ClClientType::Nimbus
            | ClClientType::Teku => 4000,
        }
    }
}

#[async_trait::async_trait]
impl ClClientLauncher for DryRunClLauncher {
    async fn launch(
        &self,
        enclave: &EnclaveContext,
        service_id: &ServiceId,
        log_level: LogLevel,
        bootnode: Option<&Arc<ClClientContext>>,
        el_client: &Arc<ElClientContext>,
        keystores: &NodeKeystoreDirpaths,
    ) -> anyhow::Result<ClClientContext> {
        let ip_addr = IpAddr::V4(self.addrs.next()?);
        tracing::info!(
            enclave = %enclave.enclave_id,
            %service_id,
            client = %self.client_type,
            %log_level,
            bootnode = bootnode.map(|b| b.enr.as_str()),
            engine = %el_client.engine_rpc_url(),
            keys = %keystores.raw_keys_dirpath.display(),
            %ip_addr,
            "Dry run: CL client"
        );
        Ok(ClClientContext {
            client_name: self.client_type.to_string(),
            ip_addr,
            http_port: self.http_port(),
            enr: format!("enr:-dry-run-{service_id}@{ip_addr}:{CL_DISCOVERY_PORT}"),
        })
    }
}

/// Registries with a dry run launcher for every supported client type.
/// All the launchers allocate addresses from `addrs`.
pub fn registries(addrs: Arc<AddressAllocator>) -> (ElLauncherRegistry, ClLauncherRegistry) {
    let el_launchers = ElClientType::ALL
        .into_iter()
        .map(|client_type| {
            let launcher: Arc<dyn ElClientLauncher> = Arc::new(DryRunElLauncher {
                client_type,
                addrs: addrs.clone(),
            });
            (client_type, launcher)
        })
        .collect();
    let cl_launchers = ClClientType::ALL
        .into_iter()
        .map(|client_type| {
            let launcher: Arc<dyn ClClientLauncher> = Arc::new(DryRunClLauncher {
                client_type,
                addrs: addrs.clone(),
            });
            (client_type, launcher)
        })
        .collect();
    (el_launchers, cl_launchers)
}
