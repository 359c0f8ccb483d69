//! Receipt ledger — identity, minting, burning, transferability
//!
//! The wrap/unwrap controller consumes the `ReceiptLedger` interface; the
//! `ReceiptRegistry` here is the shipped implementation. Receipt tokens are
//! soulbound by default: transfers are rejected until the transferability
//! switch is enabled, with mint and burn always exempt.

use std::collections::{HashMap, HashSet};
use types::ids::{Address, ReceiptId};

use crate::errors::ReceiptError;

/// The receipt-token interface consumed by the controller.
pub trait ReceiptLedger {
    /// The next id a successful mint will take. Ids are monotonically
    /// increasing and never reused; peeking does not consume the id.
    fn next_id(&self) -> ReceiptId;

    /// Mint a receipt token to `to`.
    fn mint(&mut self, to: &Address, id: ReceiptId) -> Result<(), ReceiptError>;

    /// Burn an existing receipt token.
    fn burn(&mut self, id: ReceiptId) -> Result<(), ReceiptError>;

    /// Check whether a receipt token currently exists.
    fn exists(&self, id: ReceiptId) -> bool;

    /// Current owner of a receipt token.
    fn owner_of(&self, id: ReceiptId) -> Option<&Address>;

    /// Check whether `caller` is the owner or an approved operator.
    fn is_owner_or_approved(&self, caller: &Address, id: ReceiptId) -> bool;
}

/// In-memory receipt registry.
#[derive(Debug, Default)]
pub struct ReceiptRegistry {
    next: u64,
    owners: HashMap<ReceiptId, Address>,
    approvals: HashMap<ReceiptId, HashSet<Address>>,
    transferable: bool,
}

impl ReceiptRegistry {
    /// Create an empty registry. Receipts start soulbound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Approve an operator for one receipt. Owner only.
    pub fn approve(
        &mut self,
        caller: &Address,
        operator: Address,
        id: ReceiptId,
    ) -> Result<(), ReceiptError> {
        match self.owners.get(&id) {
            None => Err(ReceiptError::UnknownReceipt { receipt_id: id }),
            Some(owner) if owner != caller => Err(ReceiptError::NotApproved),
            Some(_) => {
                self.approvals.entry(id).or_default().insert(operator);
                Ok(())
            }
        }
    }

    /// Transfer a receipt to a new owner.
    ///
    /// Rejected while the soulbound restriction is active; mint and burn are
    /// the only ownership transitions exempt from it.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: Address,
        id: ReceiptId,
    ) -> Result<(), ReceiptError> {
        if !self.owners.contains_key(&id) {
            return Err(ReceiptError::UnknownReceipt { receipt_id: id });
        }
        if !self.is_owner_or_approved(caller, id) {
            return Err(ReceiptError::NotApproved);
        }
        if !self.transferable {
            return Err(ReceiptError::NotTransferable);
        }
        self.owners.insert(id, to);
        // Approvals do not survive an ownership change.
        self.approvals.remove(&id);
        Ok(())
    }

    /// Toggle the soulbound restriction.
    pub fn set_transferable(&mut self, on: bool) {
        self.transferable = on;
    }

    /// Check whether receipts are currently transferable.
    pub fn is_transferable(&self) -> bool {
        self.transferable
    }
}

impl ReceiptLedger for ReceiptRegistry {
    fn next_id(&self) -> ReceiptId {
        ReceiptId::new(self.next)
    }

    fn mint(&mut self, to: &Address, id: ReceiptId) -> Result<(), ReceiptError> {
        if self.owners.contains_key(&id) {
            return Err(ReceiptError::AlreadyMinted { receipt_id: id });
        }
        self.owners.insert(id, to.clone());
        // The counter never hands out an id at or below one already minted.
        if id.value() >= self.next {
            self.next = id.value() + 1;
        }
        Ok(())
    }

    fn burn(&mut self, id: ReceiptId) -> Result<(), ReceiptError> {
        if self.owners.remove(&id).is_none() {
            return Err(ReceiptError::UnknownReceipt { receipt_id: id });
        }
        self.approvals.remove(&id);
        Ok(())
    }

    fn exists(&self, id: ReceiptId) -> bool {
        self.owners.contains_key(&id)
    }

    fn owner_of(&self, id: ReceiptId) -> Option<&Address> {
        self.owners.get(&id)
    }

    fn is_owner_or_approved(&self, caller: &Address, id: ReceiptId) -> bool {
        match self.owners.get(&id) {
            Some(owner) if owner == caller => true,
            Some(_) => self
                .approvals
                .get(&id)
                .map_or(false, |operators| operators.contains(caller)),
            None => false,
        }
    }
}
