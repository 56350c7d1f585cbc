// Path: crates/api/src/codec/mod.rs

//! Defines the `DocumentCodec` trait.

use chaincap_types::document::NodeConfigDocument;
use chaincap_types::error::DocumentError;

/// Converts between a node's serialized configuration and its structured form.
///
/// The serialization format is opaque to the engine; patching only ever sees
/// the decoded [`NodeConfigDocument`].
pub trait DocumentCodec: Send + Sync {
    /// Decodes a serialized document.
    fn decode(&self, raw: &str) -> Result<NodeConfigDocument, DocumentError>;

    /// Encodes a document for persistence by the caller.
    fn encode(&self, document: &NodeConfigDocument) -> Result<String, DocumentError>;
}
