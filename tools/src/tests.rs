use std::{collections::HashSet, path::Path, sync::Arc};

use assert_matches::assert_matches;
use merge_testnet_participants::{
    launch_participant_network, testonly, ClClientType, ElClientType, LaunchError, LogLevel,
    ParticipantSpec,
};
use tempfile::TempDir;

use crate::{decode_json, dry_run, encode_json, summarize, NetworkConfig, DEFAULT_NETWORK_ID};

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("network.json");
    let mut cfg = NetworkConfig::default_for(7);
    cfg.log_level = LogLevel::Trace;
    cfg.write_to_file(&path).unwrap();
    assert_eq!(cfg, NetworkConfig::read(&path).unwrap());

    // Invalid configs are rejected on read, with the path in the error.
    NetworkConfig::default_for(0).write_to_file(&path).unwrap();
    let err = NetworkConfig::read(&path).unwrap_err();
    assert!(format!("{err:#}").contains("network.json"), "{err:#}");
}

#[test]
fn test_decode_minimal_config() {
    let cfg: NetworkConfig = decode_json(
        r#"{
            "prelaunch_data_dirpath": "/prelaunch",
            "participants": [
                { "el_client_type": "geth", "cl_client_type": "lighthouse" },
                { "el_client_type": "nethermind", "cl_client_type": "teku" }
            ]
        }"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.network_id, DEFAULT_NETWORK_ID);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(
        cfg.participants[1],
        ParticipantSpec {
            el_client_type: ElClientType::Nethermind,
            cl_client_type: ClClientType::Teku,
        }
    );
    assert_eq!(
        cfg.keystores()[1].prysm_dirpath,
        Path::new("/prelaunch/node-1-keystores/prysm")
    );
}

#[test]
fn test_reject_bad_configs() {
    // Unknown client type.
    assert!(decode_json::<NetworkConfig>(
        r#"{"prelaunch_data_dirpath": "/p", "participants": [{"el_client_type": "reth", "cl_client_type": "teku"}]}"#
    )
    .is_err());
    // Unknown field.
    assert!(decode_json::<NetworkConfig>(
        r#"{"prelaunch_data_dirpath": "/p", "participants": [], "bootnode": 1}"#
    )
    .is_err());

    let mut cfg = NetworkConfig::default_for(0);
    assert!(cfg.validate().is_err());
    cfg = NetworkConfig::default_for(1);
    cfg.network_id = "mainnet".to_owned();
    assert!(cfg.validate().is_err());
}

#[test]
fn test_default_config_uses_all_clients() {
    let cfg = NetworkConfig::default_for(5);
    let el: HashSet<_> = cfg.participants.iter().map(|p| p.el_client_type).collect();
    let cl: HashSet<_> = cfg.participants.iter().map(|p| p.cl_client_type).collect();
    assert_eq!(el.len(), ElClientType::ALL.len());
    assert_eq!(cl.len(), ClClientType::ALL.len());
}

#[tokio::test]
async fn test_dry_run_network() {
    testonly::init_tracing();
    let cfg = NetworkConfig::default_for(4);
    let (el_launchers, cl_launchers) = dry_run::registries(Arc::default());
    let participants = launch_participant_network(
        &testonly::enclave(),
        &cfg.network_id,
        &el_launchers,
        &cl_launchers,
        &cfg.participants,
        &cfg.keystores(),
        cfg.log_level,
    )
    .await
    .unwrap();

    let summary = summarize(&participants);
    assert_eq!(summary.len(), 4);
    assert!(summary[0].bootnode);
    assert!(summary[1..].iter().all(|p| !p.bootnode));
    assert_eq!(summary[3].el_service_id, "el-client-3");
    assert_eq!(summary[3].cl_service_id, "cl-client-3");
    assert_eq!(summary[3].cl_client_type, ClClientType::Prysm);
    assert!(summary[3].cl_http_url.ends_with(":3500"), "{}", summary[3].cl_http_url);
    assert_eq!(
        summary[0].el_ws_url,
        format!("ws://{}:8546", participants[0].el_client_context().ip_addr)
    );

    // Every client got its own address.
    let addrs: HashSet<_> = participants
        .iter()
        .flat_map(|p| [p.el_client_context().ip_addr, p.cl_client_context().ip_addr])
        .collect();
    assert_eq!(addrs.len(), 8);
    assert!(encode_json(&summary).contains("\"el_client_type\": \"geth\""));
}

#[tokio::test]
async fn test_dry_run_needs_keystores() {
    let cfg = NetworkConfig::default_for(3);
    let (el_launchers, cl_launchers) = dry_run::registries(Arc::default());
    let err = launch_participant_network(
        &testonly::enclave(),
        &cfg.network_id,
        &el_launchers,
        &cl_launchers,
        &cfg.participants,
        &cfg.keystores()[..2],
        cfg.log_level,
    )
    .await
    .unwrap_err();
    assert_matches!(err, LaunchError::NotEnoughKeystores { .. });
}
