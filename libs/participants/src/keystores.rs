use std::path::{Path, PathBuf};

/// Directories holding the validator keys assigned to a single node,
/// in each of the formats expected by the supported CL clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeKeystoreDirpaths {
    /// EIP-2335 keystores.
    pub raw_keys_dirpath: PathBuf,
    /// Passwords of the EIP-2335 keystores.
    pub raw_secrets_dirpath: PathBuf,
    /// Keys in the layout expected by Nimbus.
    pub nimbus_keys_dirpath: PathBuf,
    /// Prysm wallet directory.
    pub prysm_dirpath: PathBuf,
    /// Keys in the layout expected by Teku.
    pub teku_keys_dirpath: PathBuf,
    /// Passwords in the layout expected by Teku.
    pub teku_secrets_dirpath: PathBuf,
}

impl NodeKeystoreDirpaths {
    /// Conventional layout of the keystore directories under `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            raw_keys_dirpath: root.join("keys"),
            raw_secrets_dirpath: root.join("secrets"),
            nimbus_keys_dirpath: root.join("nimbus-keys"),
            prysm_dirpath: root.join("prysm"),
            teku_keys_dirpath: root.join("teku-keys"),
            teku_secrets_dirpath: root.join("teku-secrets"),
        }
    }
}
