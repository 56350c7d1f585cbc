// Path: crates/api/src/defaults/mod.rs

//! Defines the `CapabilityDefaultConfig` trait.

use chaincap_types::chain::ConfigMapping;
use chaincap_types::error::ChainResolutionError;

/// Static, operator-authored defaults for capabilities.
pub trait CapabilityDefaultConfig: Send + Sync {
    /// Resolves the option mapping for `capability` on `chain_id`.
    ///
    /// Returns `Ok(None)` when no defaults exist for the capability at all,
    /// which callers treat as "no workflow-level settings". Chain-specific
    /// entries take precedence over capability-wide ones.
    fn resolve_for_chain(
        &self,
        capability: &str,
        chain_id: u64,
    ) -> Result<Option<ConfigMapping>, ChainResolutionError>;
}
