// Path: crates/engine/src/registration.rs
//! Capability registration records, one per enabled chain.

use crate::policy::MethodPolicyBuilder;
use chaincap_api::registry::ChainSelectorTable;
use chaincap_types::error::{ChainResolutionError, EngineError};
use chaincap_types::policy::MethodPolicies;
use chaincap_types::prelude::OptionExt;
use chaincap_types::topology::NodeSet;
use serde::{Deserialize, Serialize};

/// The version every chain-scoped capability is registered under.
pub const REGISTRATION_VERSION: &str = "1.0.0";

/// A capability as it is registered for one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRegistration {
    /// `<capability>:ChainSelector:<selector>`.
    pub labelled_name: String,
    /// Always [`REGISTRATION_VERSION`].
    pub version: String,
    /// Remote-call policies keyed by method name.
    pub method_configs: MethodPolicies,
}

/// Returns the registry name of `capability` on the chain with `chain_selector`.
pub fn labelled_name(capability: &str, chain_selector: u64) -> String {
    format!("{capability}:ChainSelector:{chain_selector}")
}

/// Builds the registration records for `capability` across the node set's
/// enabled chains, in declaration order.
///
/// A node set that does not host the capability registers nothing. Any
/// unknown chain or unresolvable topology fails the whole registration.
pub fn register_capability(
    capability: &str,
    node_set: Option<&NodeSet>,
    builder: &MethodPolicyBuilder,
    selectors: &dyn ChainSelectorTable,
) -> Result<Vec<CapabilityRegistration>, EngineError> {
    let node_set = node_set.required(EngineError::MissingNodeSet)?;
    let Some(enablement) = node_set.chain_capability(capability) else {
        return Ok(Vec::new());
    };

    let mut registrations = Vec::with_capacity(enablement.enabled_chains.len());
    for &chain_id in &enablement.enabled_chains {
        let chain_selector = selectors
            .lookup(chain_id)
            .required_with(|| ChainResolutionError::UnknownChain {
                capability: capability.to_string(),
                chain_id,
            })?;
        let method_configs = builder.build_for_node_set(capability, node_set)?;
        registrations.push(CapabilityRegistration {
            labelled_name: labelled_name(capability, chain_selector),
            version: REGISTRATION_VERSION.to_string(),
            method_configs,
        });
    }
    tracing::info!(
        target: "chaincap::registration",
        capability,
        node_set = %node_set.name,
        chains = registrations.len(),
        "built capability registrations"
    );
    Ok(registrations)
}
