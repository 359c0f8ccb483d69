//! Wrap/unwrap controller — the externally callable surface
//!
//! Validates permission gating, asset allow-listing, and receipt lifecycle
//! ordering, then drives the custody ledger and the receipt ledger so that a
//! receipt id has a live manifest exactly when the receipt token exists.
//!
//! Lifecycle per receipt id: unminted, wrapped, unwrapped. Burn happens
//! before release on unwrap, and the manifest is recorded only after every
//! deposit lands on wrap, so a nested call never observes a half-applied
//! bundle.

use types::asset::AssetEntry;
use types::ids::{Address, ContractAddress, ReceiptId};

use crate::adapter::AssetTransport;
use crate::custody::BundleCustody;
use crate::errors::{CustodyError, TransferError, WrapError};
use crate::events::{ContractEvent, Unwrapped, Wrapped};
use crate::receipt::ReceiptLedger;
use crate::security::{AssetAllowlist, ReentrancyGuard, Role, RoleRegistry};

/// Controller binding the custody ledger, receipt ledger, and permission
/// guards. External asset transports are passed per call.
#[derive(Debug)]
pub struct BundleWrapper<L: ReceiptLedger> {
    receipts: L,
    custody: BundleCustody,
    roles: RoleRegistry,
    allowlist: AssetAllowlist,
    reentrancy_guard: ReentrancyGuard,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl<L: ReceiptLedger> BundleWrapper<L> {
    /// Create a controller with `deployer` as admin and sole wrapper.
    ///
    /// Initial gating: wrap-role enforcement on, unwrap-role enforcement and
    /// asset allow-listing off.
    pub fn new(deployer: Address, custody_account: Address, receipts: L) -> Self {
        Self {
            receipts,
            custody: BundleCustody::new(custody_account),
            roles: RoleRegistry::new(deployer),
            allowlist: AssetAllowlist::new(),
            reentrancy_guard: ReentrancyGuard::new(),
            events: Vec::new(),
        }
    }

    // ───────────────────────── Wrap ─────────────────────────

    /// Deposit a bundle of assets and mint its receipt to `recipient`.
    ///
    /// Checks, in order: entries non-empty and valid, every asset contract
    /// allow-listed (when enforced), caller holds the wrap role (when
    /// enforced). Then reserves the next receipt id, stores the manifest
    /// (confirm-then-record), mints the receipt, and emits `Wrapped`.
    pub fn wrap(
        &mut self,
        transport: &mut dyn AssetTransport,
        caller: &Address,
        entries: Vec<AssetEntry>,
        uri: impl Into<String>,
        recipient: &Address,
    ) -> Result<ReceiptId, WrapError> {
        self.check_reentrancy()?;
        let result = self.wrap_inner(transport, caller, entries, uri.into(), recipient);
        self.reentrancy_guard.release();
        result
    }

    fn wrap_inner(
        &mut self,
        transport: &mut dyn AssetTransport,
        caller: &Address,
        entries: Vec<AssetEntry>,
        uri: String,
        recipient: &Address,
    ) -> Result<ReceiptId, WrapError> {
        if entries.is_empty() {
            return Err(WrapError::EmptyBundle);
        }
        for entry in &entries {
            entry
                .validate()
                .map_err(TransferError::from)
                .map_err(CustodyError::from)?;
            if !self.allowlist.check(entry.asset.contract()) {
                return Err(WrapError::AssetNotAllowed {
                    contract: entry.asset.contract().to_string(),
                });
            }
        }
        if !self.roles.check(Role::Wrapper, caller) {
            return Err(WrapError::Unauthorized);
        }

        let receipt_id = self.receipts.next_id();
        self.custody
            .store(transport, caller, entries.clone(), uri, receipt_id)?;

        if let Err(err) = self.receipts.mint(recipient, receipt_id) {
            // A stored bundle with no receipt is unclaimable: hand it back.
            self.custody.release(transport, receipt_id, caller)?;
            return Err(err.into());
        }

        self.events.push(ContractEvent::Wrapped(Wrapped {
            wrapper: caller.clone(),
            recipient: recipient.clone(),
            receipt_id,
            entries,
        }));
        Ok(receipt_id)
    }

    // ───────────────────────── Unwrap ─────────────────────────

    /// Burn a receipt and release its bundle to `recipient`.
    ///
    /// The caller must be the receipt's owner or an approved operator, and
    /// hold the unwrap role when its enforcement is on. The receipt is
    /// burned before the release begins; if the release fails, the receipt
    /// is re-minted to its prior owner so the claim is never lost while the
    /// manifest lives.
    pub fn unwrap(
        &mut self,
        transport: &mut dyn AssetTransport,
        caller: &Address,
        receipt_id: ReceiptId,
        recipient: &Address,
    ) -> Result<(), WrapError> {
        self.check_reentrancy()?;
        let result = self.unwrap_inner(transport, caller, receipt_id, recipient);
        self.reentrancy_guard.release();
        result
    }

    fn unwrap_inner(
        &mut self,
        transport: &mut dyn AssetTransport,
        caller: &Address,
        receipt_id: ReceiptId,
        recipient: &Address,
    ) -> Result<(), WrapError> {
        let owner = match self.receipts.owner_of(receipt_id) {
            Some(owner) => owner.clone(),
            None => return Err(WrapError::UnknownReceipt { receipt_id }),
        };
        if !self.receipts.is_owner_or_approved(caller, receipt_id) {
            return Err(WrapError::Unauthorized);
        }
        if !self.roles.check(Role::Unwrapper, caller) {
            return Err(WrapError::Unauthorized);
        }

        self.receipts.burn(receipt_id)?;
        if let Err(err) = self.custody.release(transport, receipt_id, recipient) {
            self.receipts.mint(&owner, receipt_id)?;
            return Err(err.into());
        }

        self.events.push(ContractEvent::Unwrapped(Unwrapped {
            unwrapper: caller.clone(),
            recipient: recipient.clone(),
            receipt_id,
        }));
        Ok(())
    }

    // ───────────────────────── Read Surface ─────────────────────────

    /// The uri recorded for a wrapped bundle.
    pub fn uri_of(&self, receipt_id: ReceiptId) -> Result<&str, WrapError> {
        self.custody.uri_of(receipt_id).map_err(WrapError::from)
    }

    /// The entries held under a wrapped bundle.
    pub fn wrapped_contents(&self, receipt_id: ReceiptId) -> Result<&[AssetEntry], WrapError> {
        self.custody
            .manifest(receipt_id)
            .map(|manifest| manifest.entries.as_slice())
            .ok_or(WrapError::Custody(CustodyError::NoSuchManifest { receipt_id }))
    }

    /// The receipt ledger.
    pub fn receipts(&self) -> &L {
        &self.receipts
    }

    /// Mutable access to the receipt ledger, for collaborator operations
    /// outside the wrap/unwrap flow (approvals, transferability switch).
    pub fn receipts_mut(&mut self) -> &mut L {
        &mut self.receipts
    }

    /// The custody ledger.
    pub fn custody(&self) -> &BundleCustody {
        &self.custody
    }

    /// The role registry.
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// The asset allow-list.
    pub fn allowlist(&self) -> &AssetAllowlist {
        &self.allowlist
    }

    // ───────────────────────── Admin Surface ─────────────────────────

    /// Grant a role. Admin-only.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        target: Address,
    ) -> Result<(), WrapError> {
        if !self.roles.grant_role(caller, role, target) {
            return Err(WrapError::Unauthorized);
        }
        Ok(())
    }

    /// Revoke a role. Admin-only.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        target: &Address,
    ) -> Result<(), WrapError> {
        if !self.roles.revoke_role(caller, role, target) {
            return Err(WrapError::Unauthorized);
        }
        Ok(())
    }

    /// Toggle a role's enforcement switch. Admin-only.
    pub fn set_role_enforcement(
        &mut self,
        caller: &Address,
        role: Role,
        on: bool,
    ) -> Result<(), WrapError> {
        if !self.roles.set_enforced(caller, role, on) {
            return Err(WrapError::Unauthorized);
        }
        Ok(())
    }

    /// Add an asset contract to the allow-list. Admin-only.
    pub fn allow_asset(
        &mut self,
        caller: &Address,
        contract: ContractAddress,
    ) -> Result<(), WrapError> {
        if !self.roles.is_admin(caller) {
            return Err(WrapError::Unauthorized);
        }
        self.allowlist.allow(contract);
        Ok(())
    }

    /// Remove an asset contract from the allow-list. Admin-only.
    pub fn disallow_asset(
        &mut self,
        caller: &Address,
        contract: &ContractAddress,
    ) -> Result<(), WrapError> {
        if !self.roles.is_admin(caller) {
            return Err(WrapError::Unauthorized);
        }
        self.allowlist.disallow(contract);
        Ok(())
    }

    /// Toggle allow-list enforcement. Admin-only.
    pub fn set_asset_enforcement(&mut self, caller: &Address, on: bool) -> Result<(), WrapError> {
        if !self.roles.is_admin(caller) {
            return Err(WrapError::Unauthorized);
        }
        self.allowlist.set_enforced(on);
        Ok(())
    }

    /// Transfer the primary admin. Admin-only.
    pub fn transfer_admin(&mut self, caller: &Address, new_admin: Address) -> Result<(), WrapError> {
        if !self.roles.transfer_admin(caller, new_admin) {
            return Err(WrapError::Unauthorized);
        }
        Ok(())
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    fn check_reentrancy(&mut self) -> Result<(), WrapError> {
        if !self.reentrancy_guard.acquire() {
            return Err(WrapError::Reentrancy);
        }
        Ok(())
    }
}
