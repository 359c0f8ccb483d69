//! Asset references and entries
//!
//! An asset reference names one transferable thing in the outside world: a
//! fungible balance, a one-of-a-kind item, or an item class within a
//! multi-item contract. References are immutable once constructed. An asset
//! entry pairs a reference with a quantity and carries the kind-specific
//! quantity rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AssetError;
use crate::ids::ContractAddress;

/// The three asset transfer conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Interchangeable units identified only by contract and amount
    Fungible,
    /// One-of-a-kind item identified by contract and item id
    Unique,
    /// Item class within a multi-item contract, fungible within the class
    Batch,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Fungible => write!(f, "fungible"),
            AssetKind::Unique => write!(f, "unique"),
            AssetKind::Batch => write!(f, "batch"),
        }
    }
}

/// Reference to a single transferable asset
///
/// Identity is carried in the variant: unique items fold the contract and
/// item id into the reference itself, batch classes fold in the class id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetRef {
    Fungible {
        contract: ContractAddress,
    },
    Unique {
        contract: ContractAddress,
        item_id: u64,
    },
    Batch {
        contract: ContractAddress,
        class_id: u64,
    },
}

impl AssetRef {
    /// The contract this asset lives in
    pub fn contract(&self) -> &ContractAddress {
        match self {
            AssetRef::Fungible { contract } => contract,
            AssetRef::Unique { contract, .. } => contract,
            AssetRef::Batch { contract, .. } => contract,
        }
    }

    /// The transfer convention for this asset
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetRef::Fungible { .. } => AssetKind::Fungible,
            AssetRef::Unique { .. } => AssetKind::Unique,
            AssetRef::Batch { .. } => AssetKind::Batch,
        }
    }
}

/// One line of a bundle manifest: an asset reference plus a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub asset: AssetRef,
    pub quantity: Decimal,
}

impl AssetEntry {
    /// Create an entry from a reference and quantity (not yet validated)
    pub fn new(asset: AssetRef, quantity: Decimal) -> Self {
        Self { asset, quantity }
    }

    /// Fungible entry: `quantity` units of `contract`
    pub fn fungible(contract: impl Into<ContractAddress>, quantity: Decimal) -> Self {
        Self::new(AssetRef::Fungible { contract: contract.into() }, quantity)
    }

    /// Unique entry: the single item `item_id` of `contract`
    pub fn unique(contract: impl Into<ContractAddress>, item_id: u64) -> Self {
        Self::new(
            AssetRef::Unique { contract: contract.into(), item_id },
            Decimal::ONE,
        )
    }

    /// Batch entry: `quantity` units of class `class_id` within `contract`
    pub fn batch(contract: impl Into<ContractAddress>, class_id: u64, quantity: Decimal) -> Self {
        Self::new(
            AssetRef::Batch { contract: contract.into(), class_id },
            quantity,
        )
    }

    /// Validate the kind-specific quantity rules.
    ///
    /// Quantities must be positive whole numbers of units for every kind;
    /// unique items must move as exactly one unit.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.quantity <= Decimal::ZERO || self.quantity.fract() != Decimal::ZERO {
            return Err(AssetError::InvalidAmount);
        }
        if self.asset.kind() == AssetKind::Unique && self.quantity != Decimal::ONE {
            return Err(AssetError::InvalidQuantity {
                quantity: self.quantity.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_ref_contract_accessor() {
        let token = AssetRef::Fungible {
            contract: ContractAddress::new("tokenA"),
        };
        assert_eq!(token.contract().as_str(), "tokenA");
        assert_eq!(token.kind(), AssetKind::Fungible);

        let item = AssetRef::Unique {
            contract: ContractAddress::new("nftB"),
            item_id: 7,
        };
        assert_eq!(item.contract().as_str(), "nftB");
        assert_eq!(item.kind(), AssetKind::Unique);
    }

    #[test]
    fn test_fungible_entry_valid() {
        let entry = AssetEntry::fungible("tokenA", Decimal::from(100));
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let entry = AssetEntry::fungible("tokenA", Decimal::ZERO);
        assert_eq!(entry.validate(), Err(AssetError::InvalidAmount));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let entry = AssetEntry::fungible("tokenA", Decimal::from(-5));
        assert_eq!(entry.validate(), Err(AssetError::InvalidAmount));
    }

    #[test]
    fn test_fractional_quantity_rejected() {
        let entry = AssetEntry::fungible("tokenA", Decimal::new(15, 1)); // 1.5
        assert_eq!(entry.validate(), Err(AssetError::InvalidAmount));
    }

    #[test]
    fn test_unique_entry_is_one_unit() {
        let entry = AssetEntry::unique("nftB", 7);
        assert_eq!(entry.quantity, Decimal::ONE);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_unique_quantity_other_than_one_rejected() {
        let entry = AssetEntry::new(
            AssetRef::Unique {
                contract: ContractAddress::new("nftB"),
                item_id: 7,
            },
            Decimal::from(2),
        );
        assert!(matches!(
            entry.validate(),
            Err(AssetError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_batch_entry_valid() {
        let entry = AssetEntry::batch("gameC", 3, Decimal::from(50));
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_entry_serialization() {
        let entry = AssetEntry::batch("gameC", 3, Decimal::from(50));
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: AssetEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }

    mod fuzz {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Validation accepts exactly the positive whole-number quantities.
            #[test]
            fn fuzz_fungible_validation(units in -1_000_000i64..=1_000_000i64) {
                let entry = AssetEntry::fungible("tokenA", Decimal::from(units));
                prop_assert_eq!(entry.validate().is_ok(), units > 0);
            }

            /// Unique entries only ever validate at quantity one.
            #[test]
            fn fuzz_unique_validation(units in 0u64..=1_000u64) {
                let entry = AssetEntry::new(
                    AssetRef::Unique {
                        contract: ContractAddress::new("nftB"),
                        item_id: 1,
                    },
                    Decimal::from(units),
                );
                prop_assert_eq!(entry.validate().is_ok(), units == 1);
            }
        }
    }
}
