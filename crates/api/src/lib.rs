// Path: crates/api/src/lib.rs

//! # Capability Configuration API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # Capability Configuration API
//!
//! Traits for every store the engine reads from. The engine only ever reads
//! through these seams; implementations own the data and may be backed by an
//! address book, a label store or a static table.

/// Defines `DocumentCodec` for (de)serializing node config documents.
pub mod codec;
/// Defines `CapabilityDefaultConfig` for static capability defaults.
pub mod defaults;
/// Defines `NodeFacts` for per-node account lookups.
pub mod identity;
/// Defines `AddressRegistry` and `ChainSelectorTable`.
pub mod registry;

/// A curated set of the most commonly used traits.
pub mod prelude {
    pub use crate::codec::DocumentCodec;
    pub use crate::defaults::CapabilityDefaultConfig;
    pub use crate::identity::NodeFacts;
    pub use crate::registry::{AddressRegistry, ChainSelectorTable};
}
