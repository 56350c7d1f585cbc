// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Capability Configuration CLI
//!
//! Builds method policies and registration records for a capability and
//! patches the configuration files of a DON's worker nodes.

use anyhow::Result;
use chaincap_telemetry::{init_tracing_with, LogFormat};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod util;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "chaincap",
    version,
    about = "Capability policy and per-chain node configuration tool.",
    long_about = "chaincap builds the remote-call method policies a chain capability is registered with, and splices per-chain forwarder settings into each worker node's configuration."
)]
struct Cli {
    /// Log output format (logs go to stderr).
    #[clap(long, global = true, value_enum, default_value = "json")]
    log_format: LogFormatArg,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Json,
    Text,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Text => LogFormat::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the method policies for a given fault tolerance.
    Policies(policies::PoliciesArgs),

    /// Print the registration records for a deployment.
    Register(register::RegisterArgs),

    /// Render the capability job config for one node on one chain.
    JobConfig(job_config::JobConfigArgs),

    /// Patch the node configuration files of a deployment's worker nodes.
    Patch(patch::PatchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_with(cli.log_format.into())?;

    match cli.command {
        Commands::Policies(args) => policies::run(args),
        Commands::Register(args) => register::run(args),
        Commands::JobConfig(args) => job_config::run(args),
        Commands::Patch(args) => patch::run(args),
    }
}
