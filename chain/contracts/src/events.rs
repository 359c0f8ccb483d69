//! Contract events
//!
//! Events are immutable records emitted by contract operations for external
//! indexers. The controller appends them to its event log; consumers drain
//! the log.

use serde::{Deserialize, Serialize};
use types::asset::AssetEntry;
use types::ids::{Address, ReceiptId};

/// A bundle was deposited into custody and its receipt minted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wrapped {
    pub wrapper: Address,
    pub recipient: Address,
    pub receipt_id: ReceiptId,
    pub entries: Vec<AssetEntry>,
}

/// A receipt was burned and its bundle released from custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unwrapped {
    pub unwrapper: Address,
    pub recipient: Address,
    pub receipt_id: ReceiptId,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Wrapped(Wrapped),
    Unwrapped(Unwrapped),
}
