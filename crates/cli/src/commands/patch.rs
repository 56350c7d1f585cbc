// Path: crates/cli/src/commands/patch.rs

use crate::util::load_deployment;
use anyhow::{Context, Result};
use chaincap_engine::sources::{AddressBook, ChainSelectors, TomlDocumentCodec};
use chaincap_engine::{transform_node_configs, NodeConfigInput};
use clap::Parser;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct PatchArgs {
    /// Path to the deployment description.
    #[clap(long)]
    pub deployment: PathBuf,

    /// Directory holding `node-<index>.toml` for each node of the node set.
    #[clap(long)]
    pub configs_dir: PathBuf,

    /// Where to write patched configs; defaults to `--configs-dir`.
    #[clap(long)]
    pub out_dir: Option<PathBuf>,
}

fn node_config_path(dir: &Path, node_index: usize) -> PathBuf {
    dir.join(format!("node-{node_index}.toml"))
}

pub fn run(args: PatchArgs) -> Result<()> {
    let deployment = load_deployment(&args.deployment)?;

    // One slot per node; slots without a file stay empty and are only an
    // error if a worker points at them.
    let mut existing = Vec::with_capacity(deployment.node_set.nodes.len());
    let mut absent = BTreeSet::new();
    for node_index in 0..deployment.node_set.nodes.len() {
        let path = node_config_path(&args.configs_dir, node_index);
        if path.exists() {
            existing.push(
                fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
            );
        } else {
            absent.insert(node_index);
            existing.push(String::new());
        }
    }
    if deployment.node_set.chain_capability(&deployment.capability).is_some() {
        for worker in deployment.node_set.workers() {
            if let Some(node_index) = worker.node_index()? {
                if absent.contains(&node_index) {
                    anyhow::bail!(
                        "no config for worker node index {node_index}: {} does not exist",
                        node_config_path(&args.configs_dir, node_index).display()
                    );
                }
            }
        }
    }

    let selectors = ChainSelectors::builtin();
    let book = AddressBook::from_entries(&deployment.address_book);
    let input = NodeConfigInput {
        capability: &deployment.capability,
        node_set: Some(&deployment.node_set),
        capability_configs: deployment.capability_defaults.as_ref(),
        selectors: &selectors,
        addresses: &book,
        codec: &TomlDocumentCodec,
    };
    let patched = transform_node_configs(&input, existing.clone())?;

    let out_dir = args.out_dir.as_deref().unwrap_or(&args.configs_dir);
    fs::create_dir_all(out_dir)?;
    let mut written = 0usize;
    for (node_index, (before, after)) in existing.iter().zip(&patched).enumerate() {
        if before == after && out_dir == args.configs_dir.as_path() {
            continue;
        }
        if after.is_empty() {
            continue;
        }
        let path = node_config_path(out_dir, node_index);
        fs::write(&path, after).with_context(|| format!("failed to write {}", path.display()))?;
        written += 1;
    }
    tracing::info!(
        target: "chaincap::cli",
        capability = %deployment.capability,
        written,
        out_dir = %out_dir.display(),
        "node configs written"
    );
    Ok(())
}
