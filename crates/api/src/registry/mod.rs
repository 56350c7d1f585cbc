// Path: crates/api/src/registry/mod.rs

//! Read-only lookups against chain-level registries.

/// A read-only view of deployed contract addresses.
///
/// Implemented by whatever owns the deployment's address book. The engine
/// never writes through this trait.
pub trait AddressRegistry: Send + Sync {
    /// Returns the address of the contract of `contract_type` deployed on the
    /// chain identified by `chain_selector`, or `None` if there is none.
    fn lookup(&self, chain_selector: u64, contract_type: &str) -> Option<String>;
}

/// A static mapping from native chain id to canonical chain selector.
pub trait ChainSelectorTable: Send + Sync {
    /// Returns the selector for `chain_id`, or `None` for an unregistered chain.
    fn lookup(&self, chain_id: u64) -> Option<u64>;
}
