// Path: crates/engine/src/sources/toml_codec.rs
// Path: crates/engine/src/sources/toml_codec.rs
//! TOML encoding of node configuration documents.

use chaincap_api::codec::DocumentCodec;
use chaincap_types::document::NodeConfigDocument;
use chaincap_types::error::DocumentError;

/// Reads and writes node configuration documents as TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlDocumentCodec;

impl DocumentCodec for TomlDocumentCodec {
    fn decode(&self, raw: &str) -> Result<NodeConfigDocument, DocumentError> {
        toml::from_str(raw).map_err(|e| DocumentError::Decode(e.to_string()))
    }

    fn encode(&self, document: &NodeConfigDocument) -> Result<String, DocumentError> {
        toml::to_string(document).map_err(|e| DocumentError::Encode(e.to_string()))
    }
}
