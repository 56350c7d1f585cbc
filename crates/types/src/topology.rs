// Path: crates/types/src/topology.rs
//! Descriptions of a DON's node set as handed to the engine.

use crate::chain::ConfigMapping;
use crate::error::TopologyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label key carrying a node's role.
pub const NODE_TYPE_KEY: &str = "type";
/// Label value for nodes that run workflows and host capabilities.
pub const WORKER_NODE: &str = "worker";
/// Label value for the bootstrap node.
pub const BOOTSTRAP_NODE: &str = "bootstrap";
/// Label key carrying a node's position in the DON's config list.
pub const NODE_INDEX_KEY: &str = "node_index";
/// Label key carrying the node's human readable name.
pub const NODE_NAME_KEY: &str = "name";

/// Returns the label key under which a node records its account for a chain.
pub fn address_key_for_selector(chain_selector: u64) -> String {
    format!("{chain_selector}_public_address")
}

/// A key/value fact attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label key.
    pub key: String,
    /// The label value.
    pub value: String,
}

impl Label {
    /// Creates a new label.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The metadata known about one node of a DON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// The node's labels, in declaration order.
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl NodeMetadata {
    /// Returns the value of the first label with `key`.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.key == key)
            .map(|l| l.value.as_str())
    }

    /// Returns true if the node is labelled as a worker.
    pub fn is_worker(&self) -> bool {
        self.label(NODE_TYPE_KEY) == Some(WORKER_NODE)
    }

    /// Returns the node's index label, if any.
    pub fn node_index(&self) -> Result<Option<usize>, TopologyError> {
        match self.label(NODE_INDEX_KEY) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|_| TopologyError::InvalidNodeIndex {
                    key: NODE_INDEX_KEY.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    /// A short identifier for log and error messages.
    pub fn display_name(&self) -> String {
        self.label(NODE_NAME_KEY)
            .or_else(|| self.label(NODE_INDEX_KEY))
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

/// Per-capability chain enablement for a node set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChainCapabilityConfig {
    /// Chain ids the capability runs on, in resolution order.
    #[serde(default)]
    pub enabled_chains: Vec<u64>,
    /// Node-set-level option overrides keyed by decimal chain id.
    #[serde(default)]
    pub chain_overrides: BTreeMap<String, ConfigMapping>,
}

impl ChainCapabilityConfig {
    /// Returns the node-set-level overrides for `chain_id`, if any.
    pub fn overrides_for(&self, chain_id: u64) -> Option<&ConfigMapping> {
        self.chain_overrides.get(&chain_id.to_string())
    }
}

/// A named set of nodes together with the chain capabilities they host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSet {
    /// The node set name.
    pub name: String,
    /// Every node of the set, bootstrap and workers alike.
    #[serde(default)]
    pub nodes: Vec<NodeMetadata>,
    /// Chain capabilities keyed by capability name.
    #[serde(default)]
    pub chain_capabilities: BTreeMap<String, ChainCapabilityConfig>,
}

impl NodeSet {
    /// The maximum number of simultaneously faulty nodes the set tolerates,
    /// `(n - 1) / 3` for `n` nodes.
    pub fn max_faulty_nodes(&self) -> Result<u32, TopologyError> {
        let total = self.nodes.len();
        if total == 0 {
            return Err(TopologyError::FaultTolerance {
                node_set: self.name.clone(),
                reason: "total nodes must be greater than 0".to_string(),
            });
        }
        u32::try_from((total - 1) / 3).map_err(|e| TopologyError::FaultTolerance {
            node_set: self.name.clone(),
            reason: e.to_string(),
        })
    }

    /// Returns the chain enablement for `capability`, if configured.
    pub fn chain_capability(&self, capability: &str) -> Option<&ChainCapabilityConfig> {
        self.chain_capabilities.get(capability)
    }

    /// Returns the worker nodes in declaration order.
    pub fn workers(&self) -> impl Iterator<Item = &NodeMetadata> {
        self.nodes.iter().filter(|n| n.is_worker())
    }
}
