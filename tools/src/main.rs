//! Command line tool for preparing and previewing merge testnets.
use std::{io::IsTerminal as _, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use merge_testnet_participants::{launch_participant_network, EnclaveContext, LogLevel};
use merge_testnet_tools::{dry_run, encode_json, summarize, NetworkConfig};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{prelude::*, Registry};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "testnet")]
struct Cli {
    /// Verbosity of this tool's own logs.
    #[arg(long, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Write a network config with the given number of participants.
    GenerateConfig {
        /// Number of participants.
        #[arg(long)]
        participants: usize,
        /// Path of the config file to write.
        #[arg(long, default_value = "network.json")]
        output: PathBuf,
    },
    /// Launch the network described by a config against dry run launchers
    /// and print the resulting participants.
    Plan {
        /// Path to a JSON file with the network config.
        #[arg(long, default_value = "network.json")]
        config: PathBuf,
        /// Identifier of the enclave to plan the network in.
        #[arg(long, default_value = "testnet")]
        enclave_id: String,
    },
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

fn generate_config(participants: usize, output: PathBuf) -> anyhow::Result<()> {
    anyhow::ensure!(participants > 0, "at least 1 participant has to be specified");
    let cfg = NetworkConfig::default_for(participants);
    cfg.write_to_file(&output)
        .with_context(|| output.display().to_string())?;
    tracing::info!(participants, output = %output.display(), "Config written");
    Ok(())
}

async fn plan(config: PathBuf, enclave_id: String) -> anyhow::Result<()> {
    let cfg = NetworkConfig::read(&config)?;
    let enclave = EnclaveContext {
        enclave_id,
        data_dirpath: cfg.prelaunch_data_dirpath.clone(),
    };
    let (el_launchers, cl_launchers) = dry_run::registries(Arc::default());
    let participants = launch_participant_network(
        &enclave,
        &cfg.network_id,
        &el_launchers,
        &cl_launchers,
        &cfg.participants,
        &cfg.keystores(),
        cfg.log_level,
    )
    .await
    .context("launch_participant_network()")?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", encode_json(&summarize(&participants)));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli { log_level, command } = Cli::parse();

    // Logs go to stderr, so that the output of the subcommands can be piped.
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal())
        .with_file(false)
        .with_line_number(false)
        .with_filter(level_filter(log_level));
    Registry::default()
        .with(stderr_log)
        .try_init()
        .context("failed to install the tracing subscriber")?;

    match command {
        Command::GenerateConfig {
            participants,
            output,
        } => generate_config(participants, output),
        Command::Plan { config, enclave_id } => plan(config, enclave_id).await,
    }
}
