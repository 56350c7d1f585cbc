// Path: crates/engine/src/patcher.rs
//! Splicing of resolved chain fragments into a node's configuration document.

use crate::template::WORKFLOW_TEMPLATE;
use chaincap_types::chain::ChainConfigFragment;
use chaincap_types::config::EVM_CAPABILITY;
use chaincap_types::document::{NodeConfigDocument, TransactionsSection, WorkflowSection};
use chaincap_types::error::DocumentError;
use std::collections::BTreeMap;

/// Position of every chain entry in a document, keyed by chain id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainEntryIndex {
    positions: BTreeMap<u64, usize>,
}

impl ChainEntryIndex {
    /// Indexes `document`, rejecting chain ids that appear more than once.
    pub fn build(document: &NodeConfigDocument, node_index: usize) -> Result<Self, DocumentError> {
        let mut positions = BTreeMap::new();
        for (position, entry) in document.evm.iter().enumerate() {
            if positions.insert(entry.chain_id, position).is_some() {
                return Err(DocumentError::DuplicateChainEntry {
                    chain_id: entry.chain_id,
                    node_index,
                });
            }
        }
        Ok(Self { positions })
    }

    /// Returns where the entry for `chain_id` sits, if present.
    pub fn position(&self, chain_id: u64) -> Option<usize> {
        self.positions.get(&chain_id).copied()
    }
}

/// A planned change to one chain entry.
struct EntryPatch {
    position: usize,
    workflow: WorkflowSection,
}

/// Applies chain fragments to node documents for one capability.
#[derive(Debug, Clone, Copy)]
pub struct DocumentPatcher<'a> {
    capability: &'a str,
}

impl<'a> DocumentPatcher<'a> {
    /// Creates a patcher whose template errors name `capability`.
    pub fn new(capability: &'a str) -> Self {
        Self { capability }
    }

    /// Returns a copy of `document` with every fragment applied.
    ///
    /// For each fragment the matching chain entry gets a freshly rendered
    /// `Workflow` section and has forwarders enabled. A fragment whose
    /// workflow values do not cover the template fails with
    /// [`DocumentError::Workflow`]. All fragments are matched and rendered
    /// before the copy is made, so on error the caller is left with the
    /// untouched input.
    pub fn patch(
        &self,
        document: &NodeConfigDocument,
        node_index: usize,
        fragments: &[ChainConfigFragment],
    ) -> Result<NodeConfigDocument, DocumentError> {
        if document.evm.len() < fragments.len() {
            return Err(DocumentError::InsufficientChainEntries {
                node_index,
                expected: fragments.len(),
                found: document.evm.len(),
            });
        }
        let index = ChainEntryIndex::build(document, node_index)?;

        let plan = fragments
            .iter()
            .map(|fragment| {
                let position = index.position(fragment.chain_id).ok_or(
                    DocumentError::ChainEntryNotFound {
                        chain_id: fragment.chain_id,
                        node_index,
                    },
                )?;
                let workflow = self.render_workflow(fragment, node_index)?;
                Ok(EntryPatch { position, workflow })
            })
            .collect::<Result<Vec<_>, DocumentError>>()?;

        let mut patched = document.clone();
        for step in plan {
            if let Some(entry) = patched.evm.get_mut(step.position) {
                entry.workflow = Some(step.workflow);
                entry
                    .transactions
                    .get_or_insert_with(TransactionsSection::default)
                    .forwarders_enabled = Some(true);
            }
        }
        Ok(patched)
    }

    fn render_workflow(
        &self,
        fragment: &ChainConfigFragment,
        node_index: usize,
    ) -> Result<WorkflowSection, DocumentError> {
        let rendered = WORKFLOW_TEMPLATE
            .render(self.capability, &fragment.workflow_overrides)
            .map_err(|source| DocumentError::Workflow {
                chain_id: fragment.chain_id,
                node_index,
                source,
            })?;
        toml::from_str(&rendered).map_err(|e| DocumentError::WorkflowDecode {
            chain_id: fragment.chain_id,
            node_index,
            reason: e.to_string(),
        })
    }
}

/// Applies `fragments` to `document` for the EVM capability.
pub fn patch_document(
    document: &NodeConfigDocument,
    node_index: usize,
    fragments: &[ChainConfigFragment],
) -> Result<NodeConfigDocument, DocumentError> {
    DocumentPatcher::new(EVM_CAPABILITY).patch(document, node_index, fragments)
}
