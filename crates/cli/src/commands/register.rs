// Path: crates/cli/src/commands/register.rs

use crate::util::{load_deployment, to_json};
use anyhow::Result;
use chaincap_engine::sources::ChainSelectors;
use chaincap_engine::{register_capability, MethodPolicyBuilder};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// Path to the deployment description.
    #[clap(long)]
    pub deployment: PathBuf,
}

pub fn run(args: RegisterArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}

fn render(args: &RegisterArgs) -> Result<String> {
    let deployment = load_deployment(&args.deployment)?;
    let builder = MethodPolicyBuilder::new(deployment.policy.clone())?;
    let registrations = register_capability(
        &deployment.capability,
        Some(&deployment.node_set),
        &builder,
        &ChainSelectors::builtin(),
    )?;
    to_json(&registrations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn registers_each_enabled_chain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployment.toml");
        fs::write(
            &path,
            r#"
            [node_set]
            name = "workflow"
            nodes = [{ labels = [] }, { labels = [] }, { labels = [] }, { labels = [] }]

            [node_set.chain_capabilities.evm]
            enabled_chains = [1337]
            "#,
        )
        .unwrap();

        let out = render(&RegisterArgs { deployment: path }).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["labelled_name"], "evm:ChainSelector:3379446385462418246");
        assert_eq!(json[0]["version"], "1.0.0");
    }
}
