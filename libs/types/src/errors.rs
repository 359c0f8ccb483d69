//! Asset-level error taxonomy
//!
//! Validation errors raised before any transfer is attempted.

use thiserror::Error;

/// Errors from asset entry validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Asset quantity must be a positive whole number of units")]
    InvalidAmount,

    #[error("Unique assets transfer as exactly one unit, got {quantity}")]
    InvalidQuantity { quantity: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_amount_display() {
        let err = AssetError::InvalidAmount;
        assert!(err.to_string().contains("positive whole number"));
    }

    #[test]
    fn test_invalid_quantity_display() {
        let err = AssetError::InvalidQuantity {
            quantity: "2".to_string(),
        };
        assert!(err.to_string().contains('2'));
    }
}
