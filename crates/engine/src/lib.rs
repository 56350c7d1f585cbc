// Path: crates/engine/src/lib.rs
//! # Capability Configuration Engine Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free code. Every fallible path returns a typed error.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]
//! # Capability Configuration Engine
//!
//! Builds the method policies a capability is registered with, resolves the
//! per-chain configuration fragment of every worker node and splices those
//! fragments into the node's configuration document.
//!
//! All operations are synchronous and read-only against the collaborators
//! defined in `chaincap-api`; they only produce new values.

pub mod assembler;
pub mod merge;
pub mod patcher;
pub mod policy;
pub mod registration;
pub mod sources;
pub mod template;
pub mod transform;

pub use assembler::ChainConfigAssembler;
pub use merge::{apply_runtime_values, RuntimeValues};
pub use patcher::{patch_document, DocumentPatcher};
pub use policy::MethodPolicyBuilder;
pub use registration::{register_capability, CapabilityRegistration};
pub use template::{render_template, validate_template_substitution, ConfigTemplate};
pub use transform::{transform_node_configs, NodeConfigInput};
