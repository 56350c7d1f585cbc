// Path: crates/api/src/identity/mod.rs

//! Defines the `NodeFacts` trait for decoupled node identity lookups.

use chaincap_types::topology::{address_key_for_selector, NodeMetadata};

/// Facts known about a single node.
///
/// Node metadata is commonly published as key/value labels; this trait hides
/// that encoding so the engine asks typed questions instead of scanning labels.
pub trait NodeFacts: Send + Sync {
    /// Returns the node's account address on the chain identified by
    /// `chain_selector`, exactly as recorded (possibly empty).
    fn address_for(&self, chain_selector: u64) -> Option<String>;

    /// A short identifier used in log and error messages.
    fn node_name(&self) -> String;
}

impl NodeFacts for NodeMetadata {
    fn address_for(&self, chain_selector: u64) -> Option<String> {
        self.label(&address_key_for_selector(chain_selector))
            .map(str::to_string)
    }

    fn node_name(&self) -> String {
        self.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaincap_types::topology::Label;

    #[test]
    fn labels_are_read_by_selector_key() {
        let node = NodeMetadata {
            labels: vec![
                Label::new("name", "worker-1"),
                Label::new(address_key_for_selector(42), "0xabc"),
                Label::new(address_key_for_selector(43), ""),
            ],
        };
        assert_eq!(node.address_for(42).as_deref(), Some("0xabc"));
        assert_eq!(node.address_for(43).as_deref(), Some(""));
        assert_eq!(node.address_for(44), None);
        assert_eq!(node.node_name(), "worker-1");
    }
}
