// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the capability configuration engine.
use crate::chain::ConfigMapping;
use crate::error::PolicyError;
use crate::topology::NodeSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// The default name of the EVM chain capability.
pub const EVM_CAPABILITY: &str = "evm";

/// Tunable timing and limit parameters used to build method policies.
///
/// All durations are expressed in milliseconds in the serialized form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PolicyParams {
    /// Query-style methods that receive the shared read policy.
    #[serde(default = "default_read_actions")]
    pub read_actions: Vec<String>,
    /// Name of the report delivery method.
    #[serde(default = "default_write_method")]
    pub write_method: String,
    /// Name of the log trigger method.
    #[serde(default = "default_trigger_method")]
    pub trigger_method: String,
    /// Timeout shared by read and write requests.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Parallelism cap shared by read and write requests.
    #[serde(default = "default_max_parallel_requests")]
    pub max_parallel_requests: u32,
    /// Nominal block time of the destination chains.
    #[serde(default = "default_block_time_ms")]
    pub block_time_ms: u64,
    /// Safety margin added to the block time to form the write delta stage.
    #[serde(default = "default_delta_stage_margin_ms")]
    pub delta_stage_margin_ms: u64,
    /// Log trigger registration refresh interval.
    #[serde(default = "default_registration_refresh_ms")]
    pub registration_refresh_ms: u64,
    /// Log trigger registration expiry.
    #[serde(default = "default_registration_expiry_ms")]
    pub registration_expiry_ms: u64,
    /// Maximum number of trigger events per batch.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: u32,
    /// Trigger batch collection period.
    #[serde(default = "default_batch_collection_period_ms")]
    pub batch_collection_period_ms: u64,
}

fn default_read_actions() -> Vec<String> {
    [
        "CallContract",
        "FilterLogs",
        "BalanceAt",
        "EstimateGas",
        "GetTransactionByHash",
        "GetTransactionReceipt",
        "HeaderByNumber",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_write_method() -> String {
    "WriteReport".to_string()
}
fn default_trigger_method() -> String {
    "LogTrigger".to_string()
}
fn default_request_timeout_ms() -> u64 {
    30_000
}
fn default_max_parallel_requests() -> u32 {
    10
}
fn default_block_time_ms() -> u64 {
    500
}
fn default_delta_stage_margin_ms() -> u64 {
    1_000
}
fn default_registration_refresh_ms() -> u64 {
    20_000
}
fn default_registration_expiry_ms() -> u64 {
    60_000
}
fn default_max_batch_size() -> u32 {
    25
}
fn default_batch_collection_period_ms() -> u64 {
    200
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            read_actions: default_read_actions(),
            write_method: default_write_method(),
            trigger_method: default_trigger_method(),
            request_timeout_ms: default_request_timeout_ms(),
            max_parallel_requests: default_max_parallel_requests(),
            block_time_ms: default_block_time_ms(),
            delta_stage_margin_ms: default_delta_stage_margin_ms(),
            registration_refresh_ms: default_registration_refresh_ms(),
            registration_expiry_ms: default_registration_expiry_ms(),
            max_batch_size: default_max_batch_size(),
            batch_collection_period_ms: default_batch_collection_period_ms(),
        }
    }
}

impl PolicyParams {
    /// The shared request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Block time plus the safety margin.
    pub fn delta_stage(&self) -> Duration {
        Duration::from_millis(self.block_time_ms) + Duration::from_millis(self.delta_stage_margin_ms)
    }

    /// The trigger registration refresh interval.
    pub fn registration_refresh(&self) -> Duration {
        Duration::from_millis(self.registration_refresh_ms)
    }

    /// The trigger registration expiry.
    pub fn registration_expiry(&self) -> Duration {
        Duration::from_millis(self.registration_expiry_ms)
    }

    /// Trigger messages outlive one full missed refresh cycle.
    pub fn message_expiry(&self) -> Duration {
        self.registration_expiry().saturating_mul(2)
    }

    /// The trigger batch collection period.
    pub fn batch_collection_period(&self) -> Duration {
        Duration::from_millis(self.batch_collection_period_ms)
    }

    /// Validates the parameters for semantic correctness.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.request_timeout_ms == 0 {
            return Err(PolicyError::InvalidParams(
                "'request_timeout_ms' must be greater than 0".into(),
            ));
        }
        if self.max_parallel_requests == 0 {
            return Err(PolicyError::InvalidParams(
                "'max_parallel_requests' must be greater than 0".into(),
            ));
        }
        if self.registration_expiry_ms <= self.registration_refresh_ms {
            return Err(PolicyError::InvalidParams(format!(
                "'registration_expiry_ms' ({}) must exceed 'registration_refresh_ms' ({})",
                self.registration_expiry_ms, self.registration_refresh_ms
            )));
        }
        if self.max_batch_size == 0 {
            return Err(PolicyError::InvalidParams(
                "'max_batch_size' must be greater than 0".into(),
            ));
        }
        let mut names: Vec<&str> = self.read_actions.iter().map(String::as_str).collect();
        names.push(&self.write_method);
        names.push(&self.trigger_method);
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(PolicyError::InvalidParams("method names must not be empty".into()));
        }
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        if names.len() != total {
            return Err(PolicyError::InvalidParams("method names must be unique".into()));
        }
        Ok(())
    }
}

/// Static defaults for one capability, with optional per-chain overrides.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CapabilityDefaults {
    /// Capability-wide option values.
    #[serde(default)]
    pub config: ConfigMapping,
    /// Per-chain option overrides keyed by decimal chain id.
    #[serde(default)]
    pub chain_overrides: BTreeMap<String, ConfigMapping>,
}

/// Defaults for every capability, keyed by capability name.
pub type CapabilityConfigs = BTreeMap<String, CapabilityDefaults>;

/// One deployed contract recorded in the address book.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AddressBookEntry {
    /// The chain selector the contract lives on.
    #[serde(with = "crate::codec::decimal_u64")]
    pub chain_selector: u64,
    /// The contract type (e.g. `KeystoneForwarder`).
    pub contract_type: String,
    /// The contract address as hex.
    pub address: String,
}

/// Everything needed to configure one capability for one DON (`deployment.toml`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeploymentConfig {
    /// The capability being configured.
    #[serde(default = "default_capability")]
    pub capability: String,
    /// The DON's node set.
    pub node_set: NodeSet,
    /// Deployed contracts.
    #[serde(default)]
    pub address_book: Vec<AddressBookEntry>,
    /// Capability defaults; required for node config transformation.
    #[serde(default)]
    pub capability_defaults: Option<CapabilityConfigs>,
    /// Policy parameters.
    #[serde(default)]
    pub policy: PolicyParams,
}

fn default_capability() -> String {
    EVM_CAPABILITY.to_string()
}

impl DeploymentConfig {
    /// Validates the configuration for semantic correctness.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.capability.trim().is_empty() {
            return Err(PolicyError::InvalidParams("'capability' must not be empty".into()));
        }
        self.policy.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let params: PolicyParams = toml::from_str("block_time_ms = 2000").unwrap();
        assert_eq!(params.block_time_ms, 2000);
        assert_eq!(params.read_actions.len(), 7);
        assert_eq!(params.delta_stage(), Duration::from_millis(3000));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn default_write_delta_is_one_and_a_half_seconds() {
        assert_eq!(PolicyParams::default().delta_stage(), Duration::from_millis(1500));
        assert_eq!(
            PolicyParams::default().message_expiry(),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn validate_rejects_inconsistent_params() {
        let mut params = PolicyParams {
            registration_expiry_ms: 20_000,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PolicyParams {
            max_batch_size: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        params = PolicyParams::default();
        params.read_actions.push("WriteReport".into());
        assert!(matches!(
            params.validate(),
            Err(PolicyError::InvalidParams(msg)) if msg.contains("unique")
        ));
    }

    #[test]
    fn deployment_config_parses_from_toml() {
        let cfg: DeploymentConfig = toml::from_str(
            r#"
            [node_set]
            name = "workflow"

            [[node_set.nodes]]
            labels = [{ key = "type", value = "worker" }, { key = "node_index", value = "1" }]

            [node_set.chain_capabilities.evm]
            enabled_chains = [1337]

            [[address_book]]
            chain_selector = "3379446385462418246"
            contract_type = "KeystoneForwarder"
            address = "0x0000000000000000000000000000000000000001"

            [capability_defaults.evm.config]
            GasLimitDefault = 400000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.capability, EVM_CAPABILITY);
        assert_eq!(cfg.node_set.nodes.len(), 1);
        assert_eq!(cfg.address_book.len(), 1);
        assert!(cfg.capability_defaults.unwrap().contains_key("evm"));
        assert_eq!(cfg.policy, PolicyParams::default());
    }
}
