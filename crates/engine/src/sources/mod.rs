// Path: crates/engine/src/sources/mod.rs
//! In-memory implementations of the collaborator traits in `chaincap-api`.

pub mod address_book;
pub mod defaults;
pub mod selectors;
pub mod toml_codec;

pub use address_book::AddressBook;
pub use defaults::LayeredDefaults;
pub use selectors::ChainSelectors;
pub use toml_codec::TomlDocumentCodec;
