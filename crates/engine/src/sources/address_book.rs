// Path: crates/engine/src/sources/address_book.rs
//! An [`AddressRegistry`] over the deployment's address book entries.

use chaincap_api::registry::AddressRegistry;
use chaincap_types::config::AddressBookEntry;
use std::collections::BTreeMap;

/// Deployed contract addresses keyed by chain selector and contract type.
///
/// When the same contract type is recorded twice for a chain, the later entry
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contracts: BTreeMap<(u64, String), String>,
}

impl AddressBook {
    pub fn from_entries(entries: &[AddressBookEntry]) -> Self {
        let mut book = Self::default();
        for entry in entries {
            book.insert(entry.chain_selector, &entry.contract_type, &entry.address);
        }
        book
    }

    pub fn insert(&mut self, chain_selector: u64, contract_type: &str, address: &str) {
        self.contracts
            .insert((chain_selector, contract_type.to_string()), address.to_string());
    }
}

impl AddressRegistry for AddressBook {
    fn lookup(&self, chain_selector: u64, contract_type: &str) -> Option<String> {
        self.contracts
            .get(&(chain_selector, contract_type.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaincap_types::chain::FORWARDER_CONTRACT_TYPE;

    #[test]
    fn lookups_match_selector_and_type() {
        let book = AddressBook::from_entries(&[
            AddressBookEntry {
                chain_selector: 7,
                contract_type: FORWARDER_CONTRACT_TYPE.into(),
                address: "0x01".into(),
            },
            AddressBookEntry {
                chain_selector: 7,
                contract_type: "OCR3Capability".into(),
                address: "0x02".into(),
            },
        ]);
        assert_eq!(book.lookup(7, FORWARDER_CONTRACT_TYPE).as_deref(), Some("0x01"));
        assert_eq!(book.lookup(8, FORWARDER_CONTRACT_TYPE), None);
    }
}
