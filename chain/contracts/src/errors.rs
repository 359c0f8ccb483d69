//! Contract-specific error types
//!
//! One error enum per layer, chained upward with `#[from]`: transfer errors
//! surface through custody, custody and receipt errors surface through the
//! wrap/unwrap controller. All failures are per-call and synchronous; nothing
//! is retried.

use thiserror::Error;
use types::errors::AssetError;
use types::ids::ReceiptId;

/// Errors from a single asset move
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Transfer failed for {contract}: {reason}")]
    TransferFailed { contract: String, reason: String },

    #[error("Not owner or not approved for item {item_id} in {contract}")]
    NotOwnerOrNotApproved { contract: String, item_id: u64 },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

/// Errors from the bundle custody ledger
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CustodyError {
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("A live manifest already exists for receipt {receipt_id}")]
    DuplicateReceipt { receipt_id: ReceiptId },

    #[error("No live manifest for receipt {receipt_id}")]
    NoSuchManifest { receipt_id: ReceiptId },

    #[error("Stored manifest for receipt {receipt_id} failed integrity verification")]
    ManifestCorrupted { receipt_id: ReceiptId },
}

/// Errors from the receipt ledger
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReceiptError {
    #[error("Receipt {receipt_id} already minted")]
    AlreadyMinted { receipt_id: ReceiptId },

    #[error("Unknown receipt: {receipt_id}")]
    UnknownReceipt { receipt_id: ReceiptId },

    #[error("Receipt tokens are non-transferable while the restriction is active")]
    NotTransferable,

    #[error("Caller is not owner or approved operator")]
    NotApproved,
}

/// Errors from the wrap/unwrap controller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WrapError {
    #[error("Custody error: {0}")]
    Custody(#[from] CustodyError),

    #[error("Receipt ledger error: {0}")]
    Receipt(#[from] ReceiptError),

    #[error("Unauthorized: caller fails an enforced role or ownership check")]
    Unauthorized,

    #[error("Asset contract not on the allow-list: {contract}")]
    AssetNotAllowed { contract: String },

    #[error("Unknown receipt: {receipt_id}")]
    UnknownReceipt { receipt_id: ReceiptId },

    #[error("Empty bundle: a wrap must deposit at least one asset entry")]
    EmptyBundle,

    #[error("Reentrancy detected")]
    Reentrancy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_display() {
        let err = TransferError::TransferFailed {
            contract: "tokenA".to_string(),
            reason: "insufficient balance".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Transfer failed for tokenA: insufficient balance"
        );
    }

    #[test]
    fn test_custody_error_display() {
        let err = CustodyError::DuplicateReceipt {
            receipt_id: ReceiptId::new(3),
        };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_custody_error_from_transfer() {
        let transfer_err = TransferError::Overflow;
        let custody_err: CustodyError = transfer_err.into();
        assert!(matches!(custody_err, CustodyError::Transfer(_)));
    }

    #[test]
    fn test_wrap_error_from_custody() {
        let custody_err = CustodyError::NoSuchManifest {
            receipt_id: ReceiptId::new(0),
        };
        let wrap_err: WrapError = custody_err.into();
        assert!(matches!(wrap_err, WrapError::Custody(_)));
    }

    #[test]
    fn test_wrap_error_from_asset_validation() {
        let asset_err = types::errors::AssetError::InvalidAmount;
        let wrap_err: WrapError = CustodyError::from(TransferError::from(asset_err)).into();
        assert!(wrap_err.to_string().contains("positive whole number"));
    }
}
