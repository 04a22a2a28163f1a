//! Handles describing the environment and the launched clients.
use std::{fmt, net::IpAddr, path::PathBuf};

/// Opaque handle of the isolated environment (enclave) in which services are started.
/// The orchestrator passes it through to every launcher unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclaveContext {
    /// Identifier of the enclave on the orchestration platform.
    pub enclave_id: String,
    /// Directory shared with the services of this enclave.
    pub data_dirpath: PathBuf,
}

/// Name of a service started on the orchestration platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceId(pub String);

impl ServiceId {
    const EL_CLIENT_PREFIX: &'static str = "el-client-";
    const CL_CLIENT_PREFIX: &'static str = "cl-client-";

    /// Service of the EL client of the participant at `index`.
    pub fn el_client(index: usize) -> Self {
        Self(format!("{}{index}", Self::EL_CLIENT_PREFIX))
    }

    /// Service of the CL client of the participant at `index`.
    pub fn cl_client(index: usize) -> Self {
        Self(format!("{}{index}", Self::CL_CLIENT_PREFIX))
    }

    /// Service name as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connection details of a running EL client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElClientContext {
    /// Name of the client implementation, as reported by the launcher.
    pub client_name: String,
    /// Address of the client inside the enclave.
    pub ip_addr: IpAddr,
    /// JSON-RPC port.
    pub rpc_port: u16,
    /// WebSocket JSON-RPC port.
    pub ws_port: u16,
    /// Authenticated engine API port, used by the paired CL client.
    pub engine_rpc_port: u16,
    /// Enode of the client; other EL clients use it for discovery.
    pub enode: String,
}

impl ElClientContext {
    /// URL of the JSON-RPC endpoint.
    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}", self.ip_addr, self.rpc_port)
    }

    /// URL of the WebSocket endpoint.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}", self.ip_addr, self.ws_port)
    }

    /// URL of the engine API endpoint.
    pub fn engine_rpc_url(&self) -> String {
        format!("http://{}:{}", self.ip_addr, self.engine_rpc_port)
    }
}

/// Connection details of a running CL client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClClientContext {
    /// Name of the client implementation, as reported by the launcher.
    pub client_name: String,
    /// Address of the beacon node inside the enclave.
    pub ip_addr: IpAddr,
    /// Beacon API port.
    pub http_port: u16,
    /// ENR of the beacon node; other beacon nodes use it for discovery.
    pub enr: String,
}

impl ClClientContext {
    /// URL of the beacon API.
    pub fn http_url(&self) -> String {
        format!("http://{}:{}", self.ip_addr, self.http_port)
    }
}
