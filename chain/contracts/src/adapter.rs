//! Asset transfer adapter
//!
//! Dispatches a single asset move through the convention appropriate to the
//! asset's kind. The adapter validates the entry, then issues exactly one
//! transport call; it never retries — any transfer failure aborts the
//! enclosing custody operation.

use rust_decimal::Decimal;
use types::asset::{AssetEntry, AssetRef};
use types::ids::Address;

use crate::errors::TransferError;

/// The externally-supplied asset world.
///
/// Implementations move `quantity` units of `asset` from one account to
/// another, or reject the move. Implementations may be adversarial —
/// rejecting mid-sequence, misreporting, or attempting to re-enter the
/// controller — so callers must not trust a transfer before it returns `Ok`.
pub trait AssetTransport {
    fn transfer(
        &mut self,
        asset: &AssetRef,
        quantity: Decimal,
        from: &Address,
        to: &Address,
    ) -> Result<(), TransferError>;
}

/// Adapter binding transfers to the custody account.
#[derive(Debug, Clone)]
pub struct TransferAdapter {
    custody_account: Address,
}

impl TransferAdapter {
    /// Create an adapter moving assets in and out of `custody_account`.
    pub fn new(custody_account: Address) -> Self {
        Self { custody_account }
    }

    /// The account holding all custodied assets.
    pub fn custody_account(&self) -> &Address {
        &self.custody_account
    }

    /// Move one entry from `from` into custody.
    pub fn move_in(
        &self,
        transport: &mut dyn AssetTransport,
        entry: &AssetEntry,
        from: &Address,
    ) -> Result<(), TransferError> {
        entry.validate()?;
        transport.transfer(&entry.asset, entry.quantity, from, &self.custody_account)
    }

    /// Move one entry out of custody to `to`.
    pub fn move_out(
        &self,
        transport: &mut dyn AssetTransport,
        entry: &AssetEntry,
        to: &Address,
    ) -> Result<(), TransferError> {
        entry.validate()?;
        transport.transfer(&entry.asset, entry.quantity, &self.custody_account, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::errors::AssetError;

    /// Transport recording every call it receives.
    struct RecordingTransport {
        calls: Vec<(AssetRef, Decimal, Address, Address)>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl AssetTransport for RecordingTransport {
        fn transfer(
            &mut self,
            asset: &AssetRef,
            quantity: Decimal,
            from: &Address,
            to: &Address,
        ) -> Result<(), TransferError> {
            self.calls
                .push((asset.clone(), quantity, from.clone(), to.clone()));
            Ok(())
        }
    }

    fn adapter() -> TransferAdapter {
        TransferAdapter::new(Address::new("custody"))
    }

    #[test]
    fn test_move_in_issues_single_transfer_to_custody() {
        let adapter = adapter();
        let mut transport = RecordingTransport::new();
        let entry = AssetEntry::fungible("tokenA", Decimal::from(100));

        adapter
            .move_in(&mut transport, &entry, &Address::new("alice"))
            .unwrap();

        assert_eq!(transport.calls.len(), 1);
        let (asset, quantity, from, to) = &transport.calls[0];
        assert_eq!(asset, &entry.asset);
        assert_eq!(*quantity, Decimal::from(100));
        assert_eq!(from, &Address::new("alice"));
        assert_eq!(to, &Address::new("custody"));
    }

    #[test]
    fn test_move_out_issues_single_transfer_from_custody() {
        let adapter = adapter();
        let mut transport = RecordingTransport::new();
        let entry = AssetEntry::unique("nftB", 7);

        adapter
            .move_out(&mut transport, &entry, &Address::new("bob"))
            .unwrap();

        assert_eq!(transport.calls.len(), 1);
        let (_, _, from, to) = &transport.calls[0];
        assert_eq!(from, &Address::new("custody"));
        assert_eq!(to, &Address::new("bob"));
    }

    #[test]
    fn test_invalid_entry_never_reaches_transport() {
        let adapter = adapter();
        let mut transport = RecordingTransport::new();
        let entry = AssetEntry::fungible("tokenA", Decimal::ZERO);

        let result = adapter.move_in(&mut transport, &entry, &Address::new("alice"));
        assert_eq!(
            result,
            Err(TransferError::Asset(AssetError::InvalidAmount))
        );
        assert!(transport.calls.is_empty(), "validation must precede transfer");
    }

    #[test]
    fn test_unique_quantity_rule_applied_on_move_out() {
        let adapter = adapter();
        let mut transport = RecordingTransport::new();
        let mut entry = AssetEntry::unique("nftB", 7);
        entry.quantity = Decimal::from(2);

        let result = adapter.move_out(&mut transport, &entry, &Address::new("bob"));
        assert!(matches!(
            result,
            Err(TransferError::Asset(AssetError::InvalidQuantity { .. }))
        ));
        assert!(transport.calls.is_empty());
    }
}
