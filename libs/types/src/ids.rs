//! Unique identifier types for custody entities
//!
//! Receipt identifiers are plain unsigned integers handed out by the receipt
//! ledger's monotonic counter; account and contract identities are opaque
//! address strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a receipt token
///
/// Receipt ids are allocated by the receipt ledger as a monotonically
/// increasing counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(u64);

impl ReceiptId {
    /// Create a ReceiptId from a raw counter value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner counter value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ReceiptId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Account identity (caller, recipient, or the custody account itself)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create a new Address from a string identity
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Get the address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Asset contract identity
///
/// Names the external contract an asset lives in; the asset reference adds
/// the kind and, where applicable, the item or class id within the contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractAddress(String);

impl ContractAddress {
    /// Create a new ContractAddress from a string identity
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Get the contract address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContractAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_id_ordering() {
        assert!(ReceiptId::new(0) < ReceiptId::new(1));
        assert_eq!(ReceiptId::new(7).value(), 7);
    }

    #[test]
    fn test_receipt_id_display() {
        assert_eq!(ReceiptId::new(42).to_string(), "42");
    }

    #[test]
    fn test_receipt_id_serialization() {
        let id = ReceiptId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");

        let deserialized: ReceiptId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_address_creation() {
        let addr = Address::new("alice");
        assert_eq!(addr.as_str(), "alice");
        assert_eq!(addr.to_string(), "alice");
    }

    #[test]
    fn test_address_from_str() {
        let addr: Address = "bob".into();
        assert_eq!(addr, Address::new("bob"));
    }

    #[test]
    fn test_contract_address_serialization() {
        let contract = ContractAddress::new("0xtokenA");
        let json = serde_json::to_string(&contract).unwrap();
        assert_eq!(json, "\"0xtokenA\"");

        let deserialized: ContractAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(contract, deserialized);
    }
}
