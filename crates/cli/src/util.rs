// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use chaincap_types::config::DeploymentConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads and parses a TOML file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Loads and validates a deployment description.
pub fn load_deployment(path: &Path) -> Result<DeploymentConfig> {
    let deployment: DeploymentConfig = read_toml(path)?;
    deployment
        .validate()
        .with_context(|| format!("invalid deployment {}", path.display()))?;
    Ok(deployment)
}

/// Renders a value as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
