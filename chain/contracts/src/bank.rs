//! Token bank — in-memory state for all three asset conventions
//!
//! The reference `AssetTransport` implementation: fungible balances, unique
//! item ownership, and batch class balances, all with overflow-checked
//! arithmetic. Mint helpers seed genesis state; balance accessors make
//! conservation observable in tests.

use rust_decimal::Decimal;
use std::collections::HashMap;
use types::asset::AssetRef;
use types::ids::{Address, ContractAddress};

use crate::adapter::AssetTransport;
use crate::errors::TransferError;

/// In-memory multi-standard token state.
///
/// Fungible balances are stored as `contract -> holder -> amount`, unique
/// items as `contract -> item id -> owner`, batch balances as
/// `contract -> (class id, holder) -> amount`.
#[derive(Debug, Default)]
pub struct TokenBank {
    fungible: HashMap<ContractAddress, HashMap<Address, Decimal>>,
    unique: HashMap<ContractAddress, HashMap<u64, Address>>,
    batch: HashMap<ContractAddress, HashMap<(u64, Address), Decimal>>,
}

impl TokenBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────── Mint (genesis) ─────────────────────────

    /// Mint fungible supply to a holder.
    pub fn mint_fungible(
        &mut self,
        contract: &ContractAddress,
        to: &Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let balance = self
            .fungible
            .entry(contract.clone())
            .or_default()
            .entry(to.clone())
            .or_insert(Decimal::ZERO);
        *balance = balance.checked_add(amount).ok_or(TransferError::Overflow)?;
        Ok(())
    }

    /// Mint a unique item to an owner. The item id must be fresh.
    pub fn mint_unique(
        &mut self,
        contract: &ContractAddress,
        item_id: u64,
        to: &Address,
    ) -> Result<(), TransferError> {
        let items = self.unique.entry(contract.clone()).or_default();
        if items.contains_key(&item_id) {
            return Err(TransferError::TransferFailed {
                contract: contract.to_string(),
                reason: format!("item {} already minted", item_id),
            });
        }
        items.insert(item_id, to.clone());
        Ok(())
    }

    /// Mint batch-class supply to a holder.
    pub fn mint_batch(
        &mut self,
        contract: &ContractAddress,
        class_id: u64,
        to: &Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let balance = self
            .batch
            .entry(contract.clone())
            .or_default()
            .entry((class_id, to.clone()))
            .or_insert(Decimal::ZERO);
        *balance = balance.checked_add(amount).ok_or(TransferError::Overflow)?;
        Ok(())
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Fungible balance of a holder.
    pub fn fungible_balance(&self, contract: &ContractAddress, who: &Address) -> Decimal {
        self.fungible
            .get(contract)
            .and_then(|holders| holders.get(who))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Current owner of a unique item, if minted.
    pub fn owner_of(&self, contract: &ContractAddress, item_id: u64) -> Option<&Address> {
        self.unique.get(contract).and_then(|items| items.get(&item_id))
    }

    /// Batch-class balance of a holder.
    pub fn batch_balance(
        &self,
        contract: &ContractAddress,
        class_id: u64,
        who: &Address,
    ) -> Decimal {
        self.batch
            .get(contract)
            .and_then(|holders| holders.get(&(class_id, who.clone())))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    // ───────────────────────── Transfers ─────────────────────────

    fn transfer_fungible(
        &mut self,
        contract: &ContractAddress,
        from: &Address,
        to: &Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let available = self.fungible_balance(contract, from);
        if available < amount {
            return Err(TransferError::TransferFailed {
                contract: contract.to_string(),
                reason: format!(
                    "insufficient balance: required {}, available {}",
                    amount, available
                ),
            });
        }
        // Self-transfer is a no-op once the balance check passed.
        if from == to {
            return Ok(());
        }
        let credited = self
            .fungible_balance(contract, to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        let holders = self.fungible.entry(contract.clone()).or_default();
        holders.insert(from.clone(), available - amount);
        holders.insert(to.clone(), credited);
        Ok(())
    }

    fn transfer_unique(
        &mut self,
        contract: &ContractAddress,
        item_id: u64,
        from: &Address,
        to: &Address,
    ) -> Result<(), TransferError> {
        let owner = self
            .unique
            .get_mut(contract)
            .and_then(|items| items.get_mut(&item_id));
        match owner {
            Some(owner) if owner == from => {
                *owner = to.clone();
                Ok(())
            }
            _ => Err(TransferError::NotOwnerOrNotApproved {
                contract: contract.to_string(),
                item_id,
            }),
        }
    }

    fn transfer_batch(
        &mut self,
        contract: &ContractAddress,
        class_id: u64,
        from: &Address,
        to: &Address,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        let available = self.batch_balance(contract, class_id, from);
        if available < amount {
            return Err(TransferError::TransferFailed {
                contract: contract.to_string(),
                reason: format!(
                    "insufficient balance for class {}: required {}, available {}",
                    class_id, amount, available
                ),
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .batch_balance(contract, class_id, to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;

        let holders = self.batch.entry(contract.clone()).or_default();
        holders.insert((class_id, from.clone()), available - amount);
        holders.insert((class_id, to.clone()), credited);
        Ok(())
    }
}

impl AssetTransport for TokenBank {
    fn transfer(
        &mut self,
        asset: &AssetRef,
        quantity: Decimal,
        from: &Address,
        to: &Address,
    ) -> Result<(), TransferError> {
        match asset {
            AssetRef::Fungible { contract } => {
                self.transfer_fungible(contract, from, to, quantity)
            }
            // Identity is the reference itself; the validated quantity is one.
            AssetRef::Unique { contract, item_id } => {
                self.transfer_unique(contract, *item_id, from, to)
            }
            AssetRef::Batch { contract, class_id } => {
                self.transfer_batch(contract, *class_id, from, to, quantity)
            }
        }
    }
}
