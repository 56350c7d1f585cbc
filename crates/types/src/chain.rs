// Path: crates/types/src/chain.rs
//! Chain-scoped configuration values: addresses, option keys and fragments.

use crate::error::AddressError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A mapping from option name to a resolved configuration value.
///
/// Values are TOML values because capability defaults are authored in TOML;
/// nested tables are permitted but are only ever replaced wholesale.
pub type ConfigMapping = BTreeMap<String, toml::Value>;

/// The contract type under which forwarder contracts are recorded in the address registry.
pub const FORWARDER_CONTRACT_TYPE: &str = "KeystoneForwarder";

/// The network family reported in capability job configs.
pub const EVM_NETWORK_FAMILY: &str = "evm";

/// A 20-byte EVM account or contract address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EvmAddress(pub [u8; 20]);

impl EvmAddress {
    /// The length of an address in bytes.
    pub const LEN: usize = 20;

    /// Returns the `0x`-prefixed lower-case hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for EvmAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != Self::LEN * 2 {
            return Err(AddressError::Malformed {
                value: s.to_string(),
                reason: format!("expected 40 hex digits, got {}", digits.len()),
            });
        }
        let mut out = [0u8; 20];
        hex::decode_to_slice(digits, &mut out).map_err(|e| AddressError::Malformed {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(out))
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EvmAddress({})", self.to_hex())
    }
}

impl Serialize for EvmAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EvmAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The option keys the engine itself writes into templates.
///
/// Capability defaults may carry additional, free-form keys; these are the
/// ones whose values are discovered at deployment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigOption {
    /// The native chain id.
    ChainId,
    /// The network family, always `evm` here.
    NetworkFamily,
    /// How often the log trigger polls the chain.
    LogTriggerPollInterval,
    /// The forwarder address as seen by the capability job.
    CreForwarderAddress,
    /// The minimum gas the receiver must be given.
    ReceiverGasMinimum,
    /// The node's own account address, as seen by the capability job.
    NodeAddress,
    /// The account the node transmits from.
    FromAddress,
    /// The forwarder contract the node transmits to.
    ForwarderAddress,
    /// Default gas limit for workflow transactions.
    GasLimitDefault,
    /// The transaction state at which a workflow write is accepted.
    TxAcceptanceState,
    /// How often pending workflow transactions are polled.
    PollPeriod,
    /// How long a workflow transaction may stay unaccepted.
    AcceptanceTimeout,
}

impl ConfigOption {
    /// Returns the key used in templates and mappings.
    pub fn key(self) -> &'static str {
        match self {
            Self::ChainId => "ChainID",
            Self::NetworkFamily => "NetworkFamily",
            Self::LogTriggerPollInterval => "LogTriggerPollInterval",
            Self::CreForwarderAddress => "CreForwarderAddress",
            Self::ReceiverGasMinimum => "ReceiverGasMinimum",
            Self::NodeAddress => "NodeAddress",
            Self::FromAddress => "FromAddress",
            Self::ForwarderAddress => "ForwarderAddress",
            Self::GasLimitDefault => "GasLimitDefault",
            Self::TxAcceptanceState => "TxAcceptanceState",
            Self::PollPeriod => "PollPeriod",
            Self::AcceptanceTimeout => "AcceptanceTimeout",
        }
    }
}

impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The resolved, ready-to-splice configuration slice for one chain on one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfigFragment {
    /// The native chain id.
    pub chain_id: u64,
    /// The canonical chain selector derived from `chain_id`.
    pub chain_selector: u64,
    /// The node's account on this chain.
    pub from_address: EvmAddress,
    /// The forwarder contract on this chain.
    pub forwarder_address: EvmAddress,
    /// Workflow option values; empty when the capability has no defaults.
    #[serde(default)]
    pub workflow_overrides: ConfigMapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parses_with_and_without_prefix() {
        let a: EvmAddress = "0x00000000000000000000000000000000000000aB".parse().unwrap();
        let b: EvmAddress = "00000000000000000000000000000000000000ab".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0x00000000000000000000000000000000000000ab");
    }

    #[test]
    fn address_rejects_empty_and_short() {
        assert_eq!("  ".parse::<EvmAddress>(), Err(AddressError::Empty));
        assert!(matches!(
            "0x1234".parse::<EvmAddress>(),
            Err(AddressError::Malformed { .. })
        ));
        assert!(matches!(
            "0xzz00000000000000000000000000000000000000".parse::<EvmAddress>(),
            Err(AddressError::Malformed { .. })
        ));
    }

    #[test]
    fn option_keys_match_template_names() {
        assert_eq!(ConfigOption::ChainId.key(), "ChainID");
        assert_eq!(ConfigOption::FromAddress.to_string(), "FromAddress");
    }
}
