// Path: crates/engine/src/assembler.rs
//! Resolution of the per-chain configuration fragment for a node.
//!
//! Each step is fail-fast and only reads from its collaborators: the chain
//! selector table, the address registry, the node's own facts and the
//! capability defaults.

use crate::merge::RuntimeValues;
use crate::template::JOB_CONFIG_TEMPLATE;
use chaincap_api::defaults::CapabilityDefaultConfig;
use chaincap_api::identity::NodeFacts;
use chaincap_api::registry::{AddressRegistry, ChainSelectorTable};
use chaincap_types::chain::{
    ChainConfigFragment, ConfigMapping, ConfigOption, EvmAddress, EVM_NETWORK_FAMILY,
    FORWARDER_CONTRACT_TYPE,
};
use chaincap_types::error::{ChainResolutionError, EngineError};
use chaincap_types::prelude::OptionExt;

/// Assembles [`ChainConfigFragment`]s for one capability.
#[derive(Clone, Copy)]
pub struct ChainConfigAssembler<'a> {
    capability: &'a str,
    selectors: &'a dyn ChainSelectorTable,
    addresses: &'a dyn AddressRegistry,
}

impl<'a> ChainConfigAssembler<'a> {
    /// Creates an assembler reading through the given selector table and
    /// address registry.
    pub fn new(
        capability: &'a str,
        selectors: &'a dyn ChainSelectorTable,
        addresses: &'a dyn AddressRegistry,
    ) -> Self {
        Self {
            capability,
            selectors,
            addresses,
        }
    }

    /// Maps a native chain id to its selector.
    pub fn chain_selector(&self, chain_id: u64) -> Result<u64, ChainResolutionError> {
        self.selectors
            .lookup(chain_id)
            .required_with(|| ChainResolutionError::UnknownChain {
                capability: self.capability.to_string(),
                chain_id,
            })
    }

    /// Looks up the forwarder contract deployed on the chain.
    pub fn forwarder_address(
        &self,
        chain_id: u64,
        chain_selector: u64,
    ) -> Result<EvmAddress, ChainResolutionError> {
        let raw = self
            .addresses
            .lookup(chain_selector, FORWARDER_CONTRACT_TYPE)
            .required_with(|| ChainResolutionError::ForwarderNotFound {
                capability: self.capability.to_string(),
                chain_id,
                chain_selector,
            })?;
        let address = raw
            .parse::<EvmAddress>()
            .map_err(|source| ChainResolutionError::InvalidAddress {
                role: "forwarder",
                chain_selector,
                source,
            })?;
        tracing::debug!(
            target: "chaincap::assembler",
            capability = self.capability,
            chain_id,
            forwarder = %address,
            "found forwarder contract"
        );
        Ok(address)
    }

    /// Resolves the node's account on the chain. Absent and empty values are
    /// both treated as missing.
    pub fn node_address(
        &self,
        node: &dyn NodeFacts,
        chain_selector: u64,
    ) -> Result<EvmAddress, ChainResolutionError> {
        let missing = |reason: &str| ChainResolutionError::NodeAddressMissing {
            capability: self.capability.to_string(),
            node: node.node_name(),
            chain_selector,
            reason: reason.to_string(),
        };
        let raw = node
            .address_for(chain_selector)
            .required_with(|| missing("no address label for the chain"))?;
        if raw.trim().is_empty() {
            return Err(missing("address label value is empty"));
        }
        raw.parse::<EvmAddress>()
            .map_err(|source| ChainResolutionError::InvalidAddress {
                role: "node",
                chain_selector,
                source,
            })
    }

    /// Resolves the fragment for `node` on `chain_id`.
    ///
    /// When `defaults` yields a mapping for this capability, the node's
    /// account and the forwarder are layered over it as `FromAddress` and
    /// `ForwarderAddress`. Otherwise the workflow overrides stay empty.
    pub fn resolve_chain_fragment(
        &self,
        node: &dyn NodeFacts,
        chain_id: u64,
        defaults: Option<&dyn CapabilityDefaultConfig>,
    ) -> Result<ChainConfigFragment, ChainResolutionError> {
        let chain_selector = self.chain_selector(chain_id)?;
        let forwarder_address = self.forwarder_address(chain_id, chain_selector)?;
        let from_address = self.node_address(node, chain_selector)?;

        let resolved = match defaults {
            Some(source) => source.resolve_for_chain(self.capability, chain_id)?,
            None => None,
        };
        let workflow_overrides = match resolved {
            Some(merged) => RuntimeValues::new()
                .with_str(ConfigOption::FromAddress, from_address.to_hex())
                .with_str(ConfigOption::ForwarderAddress, forwarder_address.to_hex())
                .apply_to(&merged),
            None => ConfigMapping::new(),
        };

        Ok(ChainConfigFragment {
            chain_id,
            chain_selector,
            from_address,
            forwarder_address,
            workflow_overrides,
        })
    }

    /// Resolves fragments for every chain in `chain_ids`, in order, stopping
    /// at the first failure.
    pub fn resolve_node_fragments(
        &self,
        node: &dyn NodeFacts,
        chain_ids: &[u64],
        defaults: Option<&dyn CapabilityDefaultConfig>,
    ) -> Result<Vec<ChainConfigFragment>, ChainResolutionError> {
        chain_ids
            .iter()
            .map(|&chain_id| self.resolve_chain_fragment(node, chain_id, defaults))
            .collect()
    }

    /// Renders the capability job config for a node on one chain.
    ///
    /// `merged` is the capability's resolved configuration for the chain; it
    /// must supply every template key that is not discovered here.
    pub fn render_job_config(
        &self,
        chain_id: u64,
        node_address: &EvmAddress,
        merged: &ConfigMapping,
    ) -> Result<String, EngineError> {
        let chain_selector = self.chain_selector(chain_id)?;
        let forwarder = self.forwarder_address(chain_id, chain_selector)?;
        let values = RuntimeValues::new()
            .with_u64(ConfigOption::ChainId, chain_id)
            .with_str(ConfigOption::NetworkFamily, EVM_NETWORK_FAMILY)
            .with_str(ConfigOption::CreForwarderAddress, forwarder.to_hex())
            .with_str(ConfigOption::NodeAddress, node_address.to_hex())
            .apply_to(merged);
        Ok(JOB_CONFIG_TEMPLATE.render(self.capability, &values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{AddressBook, ChainSelectors, LayeredDefaults};
    use chaincap_types::config::CapabilityConfigs;
    use chaincap_types::error::{AddressError, TemplateError};
    use chaincap_types::topology::{address_key_for_selector, Label, NodeMetadata};

    const DEVNET: u64 = 1337;
    const DEVNET_SELECTOR: u64 = 3379446385462418246;
    const FORWARDER: &str = "0x00000000000000000000000000000000000000f1";
    const NODE: &str = "0x00000000000000000000000000000000000000a1";

    fn book() -> AddressBook {
        let mut book = AddressBook::default();
        book.insert(DEVNET_SELECTOR, FORWARDER_CONTRACT_TYPE, FORWARDER);
        book
    }

    fn node(address: &str) -> NodeMetadata {
        NodeMetadata {
            labels: vec![
                Label::new("name", "worker-0"),
                Label::new(address_key_for_selector(DEVNET_SELECTOR), address),
            ],
        }
    }

    fn configs() -> CapabilityConfigs {
        toml::from_str("[evm.config]\nGasLimitDefault = 400000\nFromAddress = 'ignored'").unwrap()
    }

    #[test]
    fn fragment_without_defaults_has_empty_overrides() {
        let (selectors, book) = (ChainSelectors::builtin(), book());
        let assembler = ChainConfigAssembler::new("evm", &selectors, &book);
        let fragment = assembler
            .resolve_chain_fragment(&node(NODE), DEVNET, None)
            .unwrap();
        assert_eq!(fragment.chain_selector, DEVNET_SELECTOR);
        assert_eq!(fragment.forwarder_address.to_hex(), FORWARDER);
        assert_eq!(fragment.from_address.to_hex(), NODE);
        assert!(fragment.workflow_overrides.is_empty());
    }

    #[test]
    fn runtime_addresses_override_defaults() {
        let (selectors, book, configs) = (ChainSelectors::builtin(), book(), configs());
        let defaults = LayeredDefaults::new(&configs);
        let assembler = ChainConfigAssembler::new("evm", &selectors, &book);
        let fragment = assembler
            .resolve_chain_fragment(&node(NODE), DEVNET, Some(&defaults))
            .unwrap();
        let overrides = &fragment.workflow_overrides;
        assert_eq!(overrides["FromAddress"], toml::Value::String(NODE.into()));
        assert_eq!(overrides["ForwarderAddress"], toml::Value::String(FORWARDER.into()));
        assert_eq!(overrides["GasLimitDefault"], toml::Value::Integer(400_000));
    }

    #[test]
    fn unknown_chain_fails_first() {
        let (selectors, book) = (ChainSelectors::builtin(), AddressBook::default());
        let assembler = ChainConfigAssembler::new("evm", &selectors, &book);
        assert_eq!(
            assembler.resolve_chain_fragment(&node(NODE), 999999, None),
            Err(ChainResolutionError::UnknownChain {
                capability: "evm".into(),
                chain_id: 999999
            })
        );
    }

    #[test]
    fn missing_forwarder_is_reported_with_selector() {
        let (selectors, book) = (ChainSelectors::builtin(), AddressBook::default());
        let assembler = ChainConfigAssembler::new("evm", &selectors, &book);
        assert_eq!(
            assembler.resolve_chain_fragment(&node(NODE), DEVNET, None),
            Err(ChainResolutionError::ForwarderNotFound {
                capability: "evm".into(),
                chain_id: DEVNET,
                chain_selector: DEVNET_SELECTOR,
            })
        );
    }

    #[test]
    fn empty_or_absent_node_address_is_missing() {
        let (selectors, book) = (ChainSelectors::builtin(), book());
        let assembler = ChainConfigAssembler::new("evm", &selectors, &book);

        let err = assembler
            .resolve_chain_fragment(&node(""), DEVNET, None)
            .unwrap_err();
        assert!(matches!(err, ChainResolutionError::NodeAddressMissing { ref capability, ref node, .. } if capability == "evm" && node == "worker-0"));

        let err = assembler
            .resolve_chain_fragment(&NodeMetadata::default(), DEVNET, None)
            .unwrap_err();
        assert!(matches!(err, ChainResolutionError::NodeAddressMissing { .. }));

        let err = assembler
            .resolve_chain_fragment(&node("0x12"), DEVNET, None)
            .unwrap_err();
        assert!(matches!(
            err,
            ChainResolutionError::InvalidAddress {
                role: "node",
                source: AddressError::Malformed { .. },
                ..
            }
        ));
    }

    #[test]
    fn job_config_needs_capability_supplied_keys() {
        let (selectors, book) = (ChainSelectors::builtin(), book());
        let assembler = ChainConfigAssembler::new("evm", &selectors, &book);
        let node_address: EvmAddress = NODE.parse().unwrap();

        let err = assembler
            .render_job_config(DEVNET, &node_address, &ConfigMapping::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::Template(TemplateError::Render { .. })));

        let merged: ConfigMapping =
            toml::from_str("LogTriggerPollInterval = 1500000000\nReceiverGasMinimum = 500").unwrap();
        let rendered = assembler
            .render_job_config(DEVNET, &node_address, &merged)
            .unwrap();
        assert!(rendered.contains(r#""chainId":1337"#));
        assert!(rendered.contains(&format!(r#""creForwarderAddress":"{FORWARDER}""#)));
        assert!(rendered.contains(&format!(r#""nodeAddress":"{NODE}""#)));
    }
}
