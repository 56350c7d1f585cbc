// Path: crates/cli/src/commands/job_config.rs

use crate::util::load_deployment;
use anyhow::{Context, Result};
use chaincap_api::defaults::CapabilityDefaultConfig;
use chaincap_engine::sources::{AddressBook, ChainSelectors, LayeredDefaults};
use chaincap_engine::ChainConfigAssembler;
use chaincap_types::chain::{ConfigMapping, EvmAddress};
use chaincap_types::config::{CapabilityConfigs, DeploymentConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct JobConfigArgs {
    /// Path to the deployment description.
    #[clap(long)]
    pub deployment: PathBuf,

    /// Native chain id to render the config for.
    #[clap(long)]
    pub chain_id: u64,

    /// The node's account address on that chain.
    #[clap(long)]
    pub node_address: String,
}

pub fn run(args: JobConfigArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}

fn render(args: &JobConfigArgs) -> Result<String> {
    let deployment = load_deployment(&args.deployment)?;
    let node_address: EvmAddress = args
        .node_address
        .parse()
        .with_context(|| format!("invalid node address '{}'", args.node_address))?;

    let configs = deployment.capability_defaults.clone().unwrap_or_default();
    let merged = capability_config(&configs, &deployment, args.chain_id)?;

    let selectors = ChainSelectors::builtin();
    let book = AddressBook::from_entries(&deployment.address_book);
    let assembler = ChainConfigAssembler::new(&deployment.capability, &selectors, &book);
    Ok(assembler.render_job_config(args.chain_id, &node_address, &merged)?)
}

/// The capability's layered defaults for the chain; empty when none exist.
fn capability_config(
    configs: &CapabilityConfigs,
    deployment: &DeploymentConfig,
    chain_id: u64,
) -> Result<ConfigMapping> {
    let defaults = LayeredDefaults::new(configs).with_node_set(&deployment.node_set.chain_capabilities);
    Ok(defaults
        .resolve_for_chain(&deployment.capability, chain_id)?
        .unwrap_or_default())
}
