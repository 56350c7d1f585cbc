// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Capability Configuration Types
//!
//! This crate is the foundational library for the capability configuration
//! workspace, containing the remote-call policy model, the per-chain fragment
//! and node document structures, topology descriptions, and the error types
//! shared by every other crate.
//!
//! ## Architectural Role
//!
//! As the base crate, `chaincap-types` has minimal dependencies and is itself
//! a dependency for the `api`, `engine` and `cli` crates. Keeping data
//! definitions here prevents circular dependencies between the collaborator
//! traits and the engine that consumes them.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::EngineError> = std::result::Result<T, E>;

/// Chain identities, EVM addresses, fragments and the typed option keys.
pub mod chain;
/// Serde helpers for durations and chain identifiers.
pub mod codec;
/// Policy parameters and deployment input structures.
pub mod config;
/// The structured per-node configuration document.
pub mod document;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Remote-call policies attached to capability methods.
pub mod policy;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
/// Node set, node label and capability-enablement descriptions.
pub mod topology;
