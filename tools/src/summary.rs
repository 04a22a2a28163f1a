use merge_testnet_participants::{
    ClClientType, ElClientType, Participant, ServiceId, BOOT_PARTICIPANT_INDEX,
};

/// Endpoints of a launched participant, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParticipantSummary {
    /// Position of the participant in launch order.
    pub index: usize,
    /// Whether the participant's clients are the bootnodes of the network.
    pub bootnode: bool,
    /// EL client implementation.
    pub el_client_type: ElClientType,
    /// EL service name.
    pub el_service_id: String,
    /// EL JSON-RPC endpoint.
    pub el_rpc_url: String,
    /// EL WebSocket endpoint.
    pub el_ws_url: String,
    /// EL engine API endpoint.
    pub el_engine_rpc_url: String,
    /// EL enode.
    pub enode: String,
    /// CL client implementation.
    pub cl_client_type: ClClientType,
    /// CL service name.
    pub cl_service_id: String,
    /// Beacon API endpoint.
    pub cl_http_url: String,
    /// Beacon node ENR.
    pub enr: String,
}

/// Summarizes `participants`, which are expected to be in launch order.
pub fn summarize(participants: &[Participant]) -> Vec<ParticipantSummary> {
    participants
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let el = p.el_client_context();
            let cl = p.cl_client_context();
            ParticipantSummary {
                index,
                bootnode: index == BOOT_PARTICIPANT_INDEX,
                el_client_type: p.el_client_type(),
                el_service_id: ServiceId::el_client(index).0,
                el_rpc_url: el.rpc_url(),
                el_ws_url: el.ws_url(),
                el_engine_rpc_url: el.engine_rpc_url(),
                enode: el.enode.clone(),
                cl_client_type: p.cl_client_type(),
                cl_service_id: ServiceId::cl_client(index).0,
                cl_http_url: cl.http_url(),
                enr: cl.enr.clone(),
            }
        })
        .collect()
}
