// Path: crates/types/src/document.rs
//! The structured configuration document owned by one node.
//!
//! Only the fields the engine touches are typed. Everything else is kept in
//! `extra` tables so it round-trips through decode/encode unmodified.

use crate::codec::decimal_u64;
use serde::{Deserialize, Serialize};

/// A node's full configuration document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeConfigDocument {
    /// Per-chain EVM entries, in declaration order.
    #[serde(rename = "EVM", default, skip_serializing_if = "Vec::is_empty")]
    pub evm: Vec<EvmChainEntry>,
    /// Every other top-level field.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// One `[[EVM]]` entry of a node document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmChainEntry {
    /// The native chain id, written as a quoted decimal string.
    #[serde(rename = "ChainID", with = "decimal_u64")]
    pub chain_id: u64,
    /// Transmission settings for workflow writes.
    #[serde(rename = "Workflow", default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowSection>,
    /// Transaction manager settings.
    #[serde(
        rename = "Transactions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transactions: Option<TransactionsSection>,
    /// Every other field of the entry.
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl EvmChainEntry {
    /// Creates an entry carrying only a chain id.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            workflow: None,
            transactions: None,
            extra: toml::Table::new(),
        }
    }
}

/// The `EVM.Workflow` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowSection {
    /// The account workflow reports are sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    /// The forwarder contract reports are sent to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarder_address: Option<String>,
    /// Default gas limit for report transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit_default: Option<u64>,
    /// The transaction state at which a write is considered accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_acceptance_state: Option<u8>,
    /// Poll period for pending transactions (e.g. `2s`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_period: Option<String>,
    /// Acceptance timeout for pending transactions (e.g. `30s`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_timeout: Option<String>,
    /// Every other field of the section.
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// The `EVM.Transactions` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionsSection {
    /// Whether transmissions are routed through forwarder contracts.
    #[serde(
        rename = "ForwardersEnabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forwarders_enabled: Option<bool>,
    /// Every other field of the section.
    #[serde(flatten)]
    pub extra: toml::Table,
}
