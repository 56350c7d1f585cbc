// Path: crates/engine/src/sources/defaults.rs
//! Layered resolution of capability defaults for a single chain.

use crate::merge::apply_runtime_values;
use chaincap_api::defaults::CapabilityDefaultConfig;
use chaincap_types::chain::ConfigMapping;
use chaincap_types::config::CapabilityConfigs;
use chaincap_types::error::ChainResolutionError;
use chaincap_types::topology::ChainCapabilityConfig;
use std::collections::BTreeMap;

/// Resolves a capability's option mapping for one chain.
///
/// Three layers are applied in order, later layers winning per key:
/// 1. the capability-wide defaults,
/// 2. the capability's own per-chain overrides,
/// 3. the node set's per-chain overrides for that capability.
///
/// When node set chain capabilities are attached, the chain must be enabled
/// for the capability.
#[derive(Debug, Clone, Copy)]
pub struct LayeredDefaults<'a> {
    configs: &'a CapabilityConfigs,
    node_set: Option<&'a BTreeMap<String, ChainCapabilityConfig>>,
}

impl<'a> LayeredDefaults<'a> {
    pub fn new(configs: &'a CapabilityConfigs) -> Self {
        Self {
            configs,
            node_set: None,
        }
    }

    /// Attaches the node set's chain capability table.
    pub fn with_node_set(mut self, chain_capabilities: &'a BTreeMap<String, ChainCapabilityConfig>) -> Self {
        self.node_set = Some(chain_capabilities);
        self
    }
}

impl CapabilityDefaultConfig for LayeredDefaults<'_> {
    fn resolve_for_chain(
        &self,
        capability: &str,
        chain_id: u64,
    ) -> Result<Option<ConfigMapping>, ChainResolutionError> {
        let Some(defaults) = self.configs.get(capability) else {
            return Ok(None);
        };

        let mut resolved = defaults.config.clone();
        if let Some(chain) = defaults.chain_overrides.get(&chain_id.to_string()) {
            resolved = apply_runtime_values(&resolved, chain);
        }

        if let Some(table) = self.node_set {
            let enablement = table.get(capability).ok_or_else(|| ChainResolutionError::DefaultConfig {
                capability: capability.to_string(),
                chain_id,
                reason: "capability is not enabled for the node set".to_string(),
            })?;
            if !enablement.enabled_chains.contains(&chain_id) {
                return Err(ChainResolutionError::DefaultConfig {
                    capability: capability.to_string(),
                    chain_id,
                    reason: "chain is not enabled for the capability".to_string(),
                });
            }
            if let Some(node_set_overrides) = enablement.overrides_for(chain_id) {
                resolved = apply_runtime_values(&resolved, node_set_overrides);
            }
        }

        Ok(Some(resolved))
    }
}
