//! Network configuration.
use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use merge_testnet_participants::{
    ClClientType, ElClientType, LogLevel, NodeKeystoreDirpaths, ParticipantSpec,
};
use serde_json::{ser::Formatter, Serializer};

/// Network id used when none is configured.
pub const DEFAULT_NETWORK_ID: &str = "3151908";

/// Decodes a value from json.
pub fn decode_json<T: serde::de::DeserializeOwned>(json: &str) -> anyhow::Result<T> {
    let mut d = serde_json::Deserializer::from_str(json);
    let p = T::deserialize(&mut d)?;
    d.end()?;
    Ok(p)
}

/// Encodes a value to pretty-printed json.
pub fn encode_json<T: serde::ser::Serialize>(x: &T) -> String {
    let s = Serializer::pretty(vec![]);
    encode_with_serializer(x, s)
}

pub(crate) fn encode_with_serializer<T: serde::ser::Serialize, F: Formatter>(
    x: &T,
    mut serializer: Serializer<Vec<u8>, F>,
) -> String {
    T::serialize(x, &mut serializer).unwrap();
    String::from_utf8(serializer.into_inner()).unwrap()
}

fn default_network_id() -> String {
    DEFAULT_NETWORK_ID.to_owned()
}

/// Configuration of a testnet: which participants to launch and how.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Network id passed to the EL clients.
    #[serde(default = "default_network_id")]
    pub network_id: String,
    /// Log level of the launched clients.
    #[serde(default)]
    pub log_level: LogLevel,
    /// Directory with the genesis and validator keys generated for the network.
    pub prelaunch_data_dirpath: PathBuf,
    /// Participants, in launch order. The first one is the bootnode.
    pub participants: Vec<ParticipantSpec>,
}

impl NetworkConfig {
    /// Configuration of `participants` participants, cycling through all supported clients.
    pub fn default_for(participants: usize) -> Self {
        Self {
            network_id: default_network_id(),
            log_level: LogLevel::default(),
            prelaunch_data_dirpath: PathBuf::from("prelaunch-data"),
            participants: (0..participants)
                .map(|i| ParticipantSpec {
                    el_client_type: ElClientType::ALL[i % ElClientType::ALL.len()],
                    cl_client_type: ClClientType::ALL[i % ClClientType::ALL.len()],
                })
                .collect(),
        }
    }

    /// Reads and validates the configuration from a JSON file.
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        (|| {
            let json = fs::read_to_string(path).context("failed reading file")?;
            let cfg: Self = decode_json(&json).context("failed decoding JSON")?;
            cfg.validate()?;
            anyhow::Ok(cfg)
        })()
        .with_context(|| path.display().to_string())
    }

    /// Writes the configuration to a JSON file.
    pub fn write_to_file(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, encode_json(self)).context("fs::write()")
    }

    /// Checks that the configuration describes a launchable network.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.network_id.is_empty(), "network_id is empty");
        self.network_id
            .parse::<u64>()
            .with_context(|| format!("network_id '{}' is not a number", self.network_id))?;
        anyhow::ensure!(
            !self.participants.is_empty(),
            "at least 1 participant has to be specified"
        );
        Ok(())
    }

    /// Validator keystore directories of every participant, in launch order.
    pub fn keystores(&self) -> Vec<NodeKeystoreDirpaths> {
        (0..self.participants.len())
            .map(|i| {
                NodeKeystoreDirpaths::under(
                    &self
                        .prelaunch_data_dirpath
                        .join(format!("node-{i}-keystores")),
                )
            })
            .collect()
    }
}
