// Path: crates/engine/src/transform.rs
//! The per-node driver: resolve fragments, patch the document, re-encode.

use crate::assembler::ChainConfigAssembler;
use crate::patcher::DocumentPatcher;
use crate::sources::LayeredDefaults;
use chaincap_api::codec::DocumentCodec;
use chaincap_api::defaults::CapabilityDefaultConfig;
use chaincap_api::registry::{AddressRegistry, ChainSelectorTable};
use chaincap_telemetry::ScopeTimer;
use chaincap_types::config::CapabilityConfigs;
use chaincap_types::error::{EngineError, TopologyError};
use chaincap_types::prelude::OptionExt;
use chaincap_types::topology::{NodeMetadata, NodeSet, NODE_INDEX_KEY};
use rayon::prelude::*;

/// Everything [`transform_node_configs`] reads.
#[derive(Clone, Copy)]
pub struct NodeConfigInput<'a> {
    pub capability: &'a str,
    pub node_set: Option<&'a NodeSet>,
    pub capability_configs: Option<&'a CapabilityConfigs>,
    pub selectors: &'a dyn ChainSelectorTable,
    pub addresses: &'a dyn AddressRegistry,
    pub codec: &'a dyn DocumentCodec,
}

/// The shared, read-only state of one transformation run.
struct NodeStep<'a> {
    capability: &'a str,
    chains: &'a [u64],
    assembler: ChainConfigAssembler<'a>,
    patcher: DocumentPatcher<'a>,
    defaults: &'a dyn CapabilityDefaultConfig,
    codec: &'a dyn DocumentCodec,
}

impl NodeStep<'_> {
    fn run(&self, node: &NodeMetadata, node_index: usize, current: &str) -> Result<String, EngineError> {
        let fragments = self
            .assembler
            .resolve_node_fragments(node, self.chains, Some(self.defaults))?;
        let document = self.codec.decode(current)?;
        let document = self.patcher.patch(&document, node_index, &fragments)?;
        let encoded = self.codec.encode(&document)?;
        tracing::info!(
            target: "chaincap::transform",
            capability = self.capability,
            node_index,
            chains = fragments.len(),
            "patched node config"
        );
        Ok(encoded)
    }
}

/// Rewrites the configs of every worker node so the capability can transmit
/// through the forwarder contracts of its enabled chains.
///
/// `existing` is indexed by each worker's `node_index` label. Workers are
/// processed in parallel; each result is written back to its own slot, so
/// the output does not depend on scheduling. On error nothing is returned.
pub fn transform_node_configs(
    input: &NodeConfigInput<'_>,
    mut existing: Vec<String>,
) -> Result<Vec<String>, EngineError> {
    let _timer = ScopeTimer::new("transform_node_configs");
    let node_set = input.node_set.required(EngineError::MissingNodeSet)?;
    let Some(enablement) = node_set.chain_capability(input.capability) else {
        tracing::debug!(
            target: "chaincap::transform",
            capability = input.capability,
            node_set = %node_set.name,
            "capability not hosted by node set, configs unchanged"
        );
        return Ok(existing);
    };
    let configs = input
        .capability_configs
        .required_with(|| EngineError::MissingCapabilityDefaults {
            capability: input.capability.to_string(),
        })?;

    let workers = indexed_workers(node_set)?;
    let defaults = LayeredDefaults::new(configs).with_node_set(&node_set.chain_capabilities);
    let step = NodeStep {
        capability: input.capability,
        chains: &enablement.enabled_chains,
        assembler: ChainConfigAssembler::new(input.capability, input.selectors, input.addresses),
        patcher: DocumentPatcher::new(input.capability),
        defaults: &defaults,
        codec: input.codec,
    };

    let patched = workers
        .par_iter()
        .map(|&(node_index, node)| {
            existing
                .get(node_index)
                .required(EngineError::MissingNodeConfig { node_index })
                .and_then(|current| step.run(node, node_index, current))
                .map(|encoded| (node_index, encoded))
                .map_err(|e| e.for_node(input.capability, node_index))
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    for (node_index, config) in patched {
        if let Some(slot) = existing.get_mut(node_index) {
            *slot = config;
        }
    }
    Ok(existing)
}

/// Pairs every worker node with its `node_index` label.
fn indexed_workers(node_set: &NodeSet) -> Result<Vec<(usize, &NodeMetadata)>, TopologyError> {
    node_set
        .workers()
        .map(|node| {
            node.node_index()?
                .map(|index| (index, node))
                .required_with(|| TopologyError::MissingNodeIndex {
                    node: node.display_name(),
                    key: NODE_INDEX_KEY.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{AddressBook, ChainSelectors, TomlDocumentCodec};
    use chaincap_types::chain::FORWARDER_CONTRACT_TYPE;
    use chaincap_types::error::{ChainResolutionError, DocumentError, TemplateError};
    use chaincap_types::topology::{
        address_key_for_selector, ChainCapabilityConfig, Label, NODE_TYPE_KEY, WORKER_NODE,
    };

    const SELECTOR: u64 = 3379446385462418246;

    fn worker(index: &str) -> NodeMetadata {
        NodeMetadata {
            labels: vec![
                Label::new(NODE_TYPE_KEY, WORKER_NODE),
                Label::new(NODE_INDEX_KEY, index),
                Label::new(
                    address_key_for_selector(SELECTOR),
                    "0x00000000000000000000000000000000000000a1",
                ),
            ],
        }
    }

    fn node_set(nodes: Vec<NodeMetadata>) -> NodeSet {
        let mut set = NodeSet {
            name: "workflow".into(),
            nodes,
            ..Default::default()
        };
        set.chain_capabilities.insert(
            "evm".into(),
            ChainCapabilityConfig {
                enabled_chains: vec![1337],
                ..Default::default()
            },
        );
        set
    }

    fn book() -> AddressBook {
        let mut book = AddressBook::default();
        book.insert(
            SELECTOR,
            FORWARDER_CONTRACT_TYPE,
            "0x00000000000000000000000000000000000000f1",
        );
        book
    }

    struct Fixture {
        set: NodeSet,
        configs: CapabilityConfigs,
        selectors: ChainSelectors,
        book: AddressBook,
    }

    impl Fixture {
        fn new(nodes: Vec<NodeMetadata>) -> Self {
            Self {
                set: node_set(nodes),
                configs: toml::from_str(
                    r#"
                    [evm.config]
                    GasLimitDefault = 400000
                    TxAcceptanceState = 3
                    PollPeriod = '2s'
                    AcceptanceTimeout = '30s'
                    "#,
                )
                .unwrap(),
                selectors: ChainSelectors::builtin(),
                book: book(),
            }
        }

        fn input(&self) -> NodeConfigInput<'_> {
            NodeConfigInput {
                capability: "evm",
                node_set: Some(&self.set),
                capability_configs: Some(&self.configs),
                selectors: &self.selectors,
                addresses: &self.book,
                codec: &TomlDocumentCodec,
            }
        }
    }

    const NODE_CONFIG: &str = "[[EVM]]\nChainID = '1337'\n";

    #[test]
    fn bootstrap_slot_is_left_alone() {
        let fixture = Fixture::new(vec![NodeMetadata::default(), worker("1")]);
        let out = transform_node_configs(
            &fixture.input(),
            vec!["bootstrap".into(), NODE_CONFIG.into()],
        )
        .unwrap();
        assert_eq!(out[0], "bootstrap");
        let doc = TomlDocumentCodec.decode(&out[1]).unwrap();
        let workflow = doc.evm[0].workflow.as_ref().unwrap();
        assert_eq!(
            workflow.forwarder_address.as_deref(),
            Some("0x00000000000000000000000000000000000000f1")
        );
        assert_eq!(
            doc.evm[0].transactions.as_ref().unwrap().forwarders_enabled,
            Some(true)
        );
    }

    #[test]
    fn node_set_without_capability_is_a_no_op() {
        let mut fixture = Fixture::new(vec![worker("0")]);
        fixture.set.chain_capabilities.clear();
        let out = transform_node_configs(&fixture.input(), vec!["untouched".into()]).unwrap();
        assert_eq!(out, vec!["untouched".to_string()]);
    }

    #[test]
    fn capability_defaults_are_required() {
        let fixture = Fixture::new(vec![worker("0")]);
        let input = NodeConfigInput {
            capability_configs: None,
            ..fixture.input()
        };
        assert_eq!(
            transform_node_configs(&input, vec![NODE_CONFIG.into()]),
            Err(EngineError::MissingCapabilityDefaults {
                capability: "evm".into()
            })
        );
    }

    #[test]
    fn capability_without_default_values_fails_to_render_workflow() {
        let mut fixture = Fixture::new(vec![worker("0")]);
        fixture.configs = CapabilityConfigs::new();
        let err = transform_node_configs(&fixture.input(), vec![NODE_CONFIG.into()]).unwrap_err();
        assert!(matches!(
            err.root(),
            EngineError::Document(DocumentError::Workflow {
                chain_id: 1337,
                node_index: 0,
                source: TemplateError::Render { .. }
            })
        ));
    }

    #[test]
    fn missing_config_slot_is_reported_per_node() {
        let fixture = Fixture::new(vec![worker("3")]);
        let err = transform_node_configs(&fixture.input(), vec![NODE_CONFIG.into()]).unwrap_err();
        assert_eq!(err.root(), &EngineError::MissingNodeConfig { node_index: 3 });
    }

    #[test]
    fn worker_without_index_label_is_rejected() {
        let mut node = worker("0");
        node.labels.retain(|l| l.key != NODE_INDEX_KEY);
        let fixture = Fixture::new(vec![node]);
        assert!(matches!(
            transform_node_configs(&fixture.input(), vec![NODE_CONFIG.into()]),
            Err(EngineError::Topology(TopologyError::MissingNodeIndex { .. }))
        ));
    }

    #[test]
    fn failures_carry_the_node_index() {
        let mut fixture = Fixture::new(vec![worker("0")]);
        fixture.book = AddressBook::default();
        let err = transform_node_configs(&fixture.input(), vec![NODE_CONFIG.into()]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Node { ref capability, node_index: 0, .. } if capability == "evm"
        ));
        assert!(matches!(
            err.root(),
            EngineError::Chain(ChainResolutionError::ForwarderNotFound { .. })
        ));

        let fixture = Fixture::new(vec![worker("0")]);
        let err = transform_node_configs(&fixture.input(), vec!["[[EVM]]\nChainID = '2337'\n".into()])
            .unwrap_err();
        assert!(matches!(
            err.root(),
            EngineError::Document(DocumentError::ChainEntryNotFound { chain_id: 1337, node_index: 0 })
        ));
    }
}
