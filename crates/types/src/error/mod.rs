// Path: crates/types/src/error/mod.rs
//! Core error types for capability configuration.
//!
//! Every error in this workspace is deterministic: it stems from a mismatch
//! between the deployment facts and the configuration being produced, never
//! from a transient failure. None of them is retried by the engine.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while rendering a configuration template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template text itself is malformed.
    #[error("[{context}] failed to parse template: {reason}")]
    Parse {
        /// The capability and template the failure belongs to.
        context: String,
        /// The parser's description of the problem.
        reason: String,
    },
    /// A placeholder referenced a value that was not supplied.
    #[error("[{context}] failed to render template: {reason}")]
    Render {
        /// The capability and template the failure belongs to.
        context: String,
        /// The renderer's description of the problem.
        reason: String,
    },
    /// The rendered text still contains placeholder syntax.
    #[error("[{context}] template substitution incomplete: unresolved marker '{marker}' found in rendered output")]
    UnresolvedPlaceholder {
        /// The capability and template the failure belongs to.
        context: String,
        /// The residual marker that was found.
        marker: String,
    },
}

impl ErrorCode for TemplateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "TEMPLATE_PARSE_ERROR",
            Self::Render { .. } => "TEMPLATE_RENDER_ERROR",
            Self::UnresolvedPlaceholder { .. } => "TEMPLATE_UNRESOLVED_PLACEHOLDER",
        }
    }
}

/// Errors from parsing an EVM account or contract address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The value was empty.
    #[error("address value is empty")]
    Empty,
    /// The value is not a `0x`-prefixed, 20-byte hex string.
    #[error("malformed address '{value}': {reason}")]
    Malformed {
        /// The offending input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ErrorCode for AddressError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "ADDRESS_EMPTY",
            Self::Malformed { .. } => "ADDRESS_MALFORMED",
        }
    }
}

/// Errors about the shape of the node set or node metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The fault tolerance of the node set could not be computed.
    #[error("cannot compute fault tolerance for node set '{node_set}': {reason}")]
    FaultTolerance {
        /// The name of the node set.
        node_set: String,
        /// Why the computation failed.
        reason: String,
    },
    /// A node's index label is not a non-negative integer.
    #[error("node label '{key}' has invalid index value '{value}'")]
    InvalidNodeIndex {
        /// The label key that was read.
        key: String,
        /// The label value that failed to parse.
        value: String,
    },
    /// A worker node carries no index label.
    #[error("node '{node}' has no '{key}' label")]
    MissingNodeIndex {
        /// A human readable node identifier.
        node: String,
        /// The label key that was expected.
        key: String,
    },
}

impl ErrorCode for TopologyError {
    fn code(&self) -> &'static str {
        match self {
            Self::FaultTolerance { .. } => "TOPOLOGY_FAULT_TOLERANCE",
            Self::InvalidNodeIndex { .. } => "TOPOLOGY_INVALID_NODE_INDEX",
            Self::MissingNodeIndex { .. } => "TOPOLOGY_MISSING_NODE_INDEX",
        }
    }
}

/// Errors raised while building capability method policies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The network topology needed for quorum thresholds was unavailable.
    #[error("failed to resolve topology for capability '{capability}': {source}")]
    TopologyResolution {
        /// The capability being registered.
        capability: String,
        /// The underlying topology failure.
        #[source]
        source: TopologyError,
    },
    /// The supplied policy parameters are internally inconsistent.
    #[error("invalid policy parameters: {0}")]
    InvalidParams(String),
    /// A built policy failed its own invariant check.
    #[error("policy for method '{method}' violates invariant: {reason}")]
    InvariantViolated {
        /// The method whose policy is invalid.
        method: String,
        /// The violated invariant.
        reason: String,
    },
}

impl ErrorCode for PolicyError {
    fn code(&self) -> &'static str {
        match self {
            Self::TopologyResolution { .. } => "POLICY_TOPOLOGY_RESOLUTION",
            Self::InvalidParams(_) => "POLICY_INVALID_PARAMS",
            Self::InvariantViolated { .. } => "POLICY_INVARIANT_VIOLATED",
        }
    }
}

/// Errors raised while resolving a node's configuration for one chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainResolutionError {
    /// The chain id is not present in the chain selector table.
    #[error("[{capability}] chain selector not found for chain id {chain_id}")]
    UnknownChain {
        /// The capability being configured.
        capability: String,
        /// The native chain id.
        chain_id: u64,
    },
    /// No forwarder contract is registered for the chain.
    #[error("[{capability}] failed to find forwarder address for chain {chain_id} (selector {chain_selector})")]
    ForwarderNotFound {
        /// The capability being configured.
        capability: String,
        /// The native chain id.
        chain_id: u64,
        /// The chain selector used for the lookup.
        chain_selector: u64,
    },
    /// The node has no account address for the chain, or it is empty.
    #[error("[{capability}] node '{node}' has no account address for chain selector {chain_selector}: {reason}")]
    NodeAddressMissing {
        /// The capability being configured.
        capability: String,
        /// A human readable node identifier.
        node: String,
        /// The chain selector used for the lookup.
        chain_selector: u64,
        /// Whether the label was absent or empty.
        reason: String,
    },
    /// A discovered address could not be parsed.
    #[error("invalid {role} address for chain selector {chain_selector}: {source}")]
    InvalidAddress {
        /// Which address was being resolved (e.g. "forwarder").
        role: &'static str,
        /// The chain selector the address belongs to.
        chain_selector: u64,
        /// The parse failure.
        #[source]
        source: AddressError,
    },
    /// The default capability configuration could not be resolved.
    #[error("failed to resolve '{capability}' default config for chain {chain_id}: {reason}")]
    DefaultConfig {
        /// The capability being configured.
        capability: String,
        /// The native chain id.
        chain_id: u64,
        /// Why resolution failed.
        reason: String,
    },
}

impl ErrorCode for ChainResolutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownChain { .. } => "CHAIN_UNKNOWN",
            Self::ForwarderNotFound { .. } => "CHAIN_FORWARDER_NOT_FOUND",
            Self::NodeAddressMissing { .. } => "CHAIN_NODE_ADDRESS_MISSING",
            Self::InvalidAddress { .. } => "CHAIN_INVALID_ADDRESS",
            Self::DefaultConfig { .. } => "CHAIN_DEFAULT_CONFIG",
        }
    }
}

/// Errors about the node configuration document and its chain entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document has fewer chain entries than fragments to apply.
    #[error("not enough EVM chains configured in node index {node_index}: expected at least {expected}, found {found}")]
    InsufficientChainEntries {
        /// The node whose document was being patched.
        node_index: usize,
        /// The number of fragments supplied.
        expected: usize,
        /// The number of chain entries in the document.
        found: usize,
    },
    /// No chain entry matches a fragment's chain id.
    #[error("failed to find EVM chain with id {chain_id} in the config of node index {node_index}")]
    ChainEntryNotFound {
        /// The chain id of the unmatched fragment.
        chain_id: u64,
        /// The node whose document was being patched.
        node_index: usize,
    },
    /// Two chain entries in one document share a chain id.
    #[error("EVM chain with id {chain_id} appears more than once in the config of node index {node_index}")]
    DuplicateChainEntry {
        /// The duplicated chain id.
        chain_id: u64,
        /// The node whose document was being patched.
        node_index: usize,
    },
    /// Rendering the workflow section failed.
    #[error("failed to build workflow config for chain {chain_id} of node index {node_index}: {source}")]
    Workflow {
        /// The chain whose workflow section failed.
        chain_id: u64,
        /// The node whose document was being patched.
        node_index: usize,
        /// The template failure.
        #[source]
        source: TemplateError,
    },
    /// The rendered workflow section is not a valid workflow table.
    #[error("failed to decode workflow config for chain {chain_id} of node index {node_index}: {reason}")]
    WorkflowDecode {
        /// The chain whose workflow section failed.
        chain_id: u64,
        /// The node whose document was being patched.
        node_index: usize,
        /// The decoder's description of the problem.
        reason: String,
    },
    /// The serialized document could not be decoded.
    #[error("failed to decode node config document: {0}")]
    Decode(String),
    /// The document could not be serialized.
    #[error("failed to encode node config document: {0}")]
    Encode(String),
}

impl ErrorCode for DocumentError {
    fn code(&self) -> &'static str {
        match self {
            Self::InsufficientChainEntries { .. } => "DOCUMENT_INSUFFICIENT_CHAIN_ENTRIES",
            Self::ChainEntryNotFound { .. } => "DOCUMENT_CHAIN_ENTRY_NOT_FOUND",
            Self::DuplicateChainEntry { .. } => "DOCUMENT_DUPLICATE_CHAIN_ENTRY",
            Self::Workflow { .. } => "DOCUMENT_WORKFLOW_RENDER",
            Self::WorkflowDecode { .. } => "DOCUMENT_WORKFLOW_DECODE",
            Self::Decode(_) => "DOCUMENT_DECODE_ERROR",
            Self::Encode(_) => "DOCUMENT_ENCODE_ERROR",
        }
    }
}

/// The top-level error for every engine entry point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A template could not be rendered or validated.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
    /// Method policies could not be built.
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
    /// A chain could not be resolved for a node.
    #[error("Chain resolution error: {0}")]
    Chain(#[from] ChainResolutionError),
    /// The node document did not match the topology.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    /// The node set or node metadata is malformed.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
    /// The caller did not supply a node set.
    #[error("node set input is missing")]
    MissingNodeSet,
    /// Capability defaults are required but absent.
    #[error("capability defaults are required to configure capability '{capability}' but none were provided")]
    MissingCapabilityDefaults {
        /// The capability being configured.
        capability: String,
    },
    /// No existing config was supplied for a worker node.
    #[error("missing config for node index {node_index}")]
    MissingNodeConfig {
        /// The node index taken from the node's labels.
        node_index: usize,
    },
    /// An error scoped to a single node.
    #[error("[{capability}] node index {node_index}: {source}")]
    Node {
        /// The capability being configured.
        capability: String,
        /// The node index taken from the node's labels.
        node_index: usize,
        /// The wrapped failure.
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Wraps this error with the capability and node it belongs to.
    pub fn for_node(self, capability: &str, node_index: usize) -> Self {
        match self {
            already @ Self::Node { .. } => already,
            other => Self::Node {
                capability: capability.to_string(),
                node_index,
                source: Box::new(other),
            },
        }
    }

    /// Returns the innermost error, looking through node scoping.
    pub fn root(&self) -> &EngineError {
        match self {
            Self::Node { source, .. } => source.root(),
            other => other,
        }
    }
}

impl ErrorCode for EngineError {
    fn code(&self) -> &'static str {
        match self {
            Self::Template(e) => e.code(),
            Self::Policy(e) => e.code(),
            Self::Chain(e) => e.code(),
            Self::Document(e) => e.code(),
            Self::Topology(e) => e.code(),
            Self::MissingNodeSet => "ENGINE_MISSING_NODE_SET",
            Self::MissingCapabilityDefaults { .. } => "ENGINE_MISSING_CAPABILITY_DEFAULTS",
            Self::MissingNodeConfig { .. } => "ENGINE_MISSING_NODE_CONFIG",
            Self::Node { source, .. } => source.code(),
        }
    }
}
