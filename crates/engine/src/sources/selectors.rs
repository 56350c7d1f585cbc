// Path: crates/engine/src/sources/selectors.rs
//! A static chain id to chain selector table.

use chaincap_api::registry::ChainSelectorTable;
use std::collections::BTreeMap;

/// `(chain id, selector)` pairs for well-known EVM networks and local devnets.
const WELL_KNOWN_CHAINS: [(u64, u64); 10] = [
    (1, 5009297550715157269),
    (10, 3734403246176062136),
    (56, 11344663589394136015),
    (137, 4051577828743386545),
    (1337, 3379446385462418246),
    (2337, 12922642891491394802),
    (8453, 15971525489660198786),
    (42161, 4949039107694359620),
    (43113, 14767482510784806043),
    (11155111, 16015286601757825753),
];

/// An in-memory [`ChainSelectorTable`]. `Default` is empty; use
/// [`ChainSelectors::builtin`] for the well-known networks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainSelectors {
    by_chain_id: BTreeMap<u64, u64>,
}

impl ChainSelectors {
    /// A table pre-populated with the well-known networks.
    pub fn builtin() -> Self {
        Self {
            by_chain_id: WELL_KNOWN_CHAINS.into_iter().collect(),
        }
    }

    /// Adds or replaces one mapping.
    pub fn with_chain(mut self, chain_id: u64, chain_selector: u64) -> Self {
        self.by_chain_id.insert(chain_id, chain_selector);
        self
    }
}

impl ChainSelectorTable for ChainSelectors {
    fn lookup(&self, chain_id: u64) -> Option<u64> {
        self.by_chain_id.get(&chain_id).copied()
    }
}
