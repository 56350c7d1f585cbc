// Path: crates/cli/src/commands/policies.rs

use crate::util::{read_toml, to_json};
use anyhow::Result;
use chaincap_engine::MethodPolicyBuilder;
use chaincap_types::config::PolicyParams;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct PoliciesArgs {
    /// Number of faulty nodes the DON tolerates.
    #[clap(long)]
    pub faulty: u32,

    /// Optional TOML file with policy parameters; defaults apply otherwise.
    #[clap(long)]
    pub params: Option<PathBuf>,
}

pub fn run(args: PoliciesArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}

fn render(args: &PoliciesArgs) -> Result<String> {
    let params = match &args.params {
        Some(path) => read_toml::<PolicyParams>(path)?,
        None => PolicyParams::default(),
    };
    let policies = MethodPolicyBuilder::new(params)?.build(args.faulty)?;
    to_json(&policies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn prints_every_method() {
        let out = render(&PoliciesArgs {
            faulty: 2,
            params: None,
        })
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 9);
        assert_eq!(json["LogTrigger"]["config"]["min_responses_to_aggregate"], 3);
        assert_eq!(json["WriteReport"]["config"]["delta_stage"], 1_500);
    }

    #[test]
    fn params_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.toml");
        fs::write(&path, "block_time_ms = 2000\nmax_batch_size = 50\n").unwrap();
        let out = render(&PoliciesArgs {
            faulty: 0,
            params: Some(path),
        })
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["WriteReport"]["config"]["delta_stage"], 3_000);
        assert_eq!(json["LogTrigger"]["config"]["max_batch_size"], 50);
    }
}
