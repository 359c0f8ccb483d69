//! Shared security primitives for contract modules
//!
//! Provides the reentrancy guard, the role registry with per-role enforcement
//! switches, and the asset allow-list used by the wrap/unwrap controller.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use types::ids::{Address, ContractAddress};

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A contract function acquires the guard before executing state-changing
/// logic and releases it on completion. Any nested call attempt fails.
#[derive(Debug, Clone)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Capabilities gated by the role registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full system control: role grants, enforcement switches, allow-list
    Admin,
    /// May deposit bundles and mint receipts
    Wrapper,
    /// May redeem receipts for their bundles
    Unwrapper,
}

/// Role registry with a per-role enforcement switch.
///
/// When a role's switch is off, any caller passes that role's check — the
/// operator's escape hatch for opening a capability without redeploying.
/// The Admin role has no switch; admin checks always require membership.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    members: HashMap<Role, HashSet<Address>>,
    enforced: HashMap<Role, bool>,
    admin: Address,
}

impl RoleRegistry {
    /// Create a registry with the deployer as admin.
    ///
    /// Initial switch state: wrapping is enforced and granted only to the
    /// deployer; unwrapping is open to any caller.
    pub fn new(deployer: Address) -> Self {
        let mut members: HashMap<Role, HashSet<Address>> = HashMap::new();
        members.insert(Role::Admin, HashSet::from([deployer.clone()]));
        members.insert(Role::Wrapper, HashSet::from([deployer.clone()]));
        members.insert(Role::Unwrapper, HashSet::new());

        let enforced = HashMap::from([(Role::Wrapper, true), (Role::Unwrapper, false)]);

        Self {
            members,
            enforced,
            admin: deployer,
        }
    }

    /// Check if an account holds the specified role.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .map_or(false, |accounts| accounts.contains(account))
    }

    /// Check if a role's enforcement switch is on.
    pub fn is_enforced(&self, role: Role) -> bool {
        if role == Role::Admin {
            return true;
        }
        self.enforced.get(&role).copied().unwrap_or(false)
    }

    /// The capability check injected into each gated operation: passes when
    /// the role's switch is off, otherwise requires membership.
    pub fn check(&self, role: Role, account: &Address) -> bool {
        !self.is_enforced(role) || self.has_role(role, account)
    }

    /// Check if an account is admin.
    pub fn is_admin(&self, account: &Address) -> bool {
        self.has_role(Role::Admin, account)
    }

    /// Grant a role. Only admin can grant. Returns `false` if unauthorized.
    pub fn grant_role(&mut self, admin_caller: &Address, role: Role, target: Address) -> bool {
        if !self.is_admin(admin_caller) {
            return false;
        }
        self.members.entry(role).or_default().insert(target);
        true
    }

    /// Revoke a role. Only admin can revoke, and the primary admin's Admin
    /// membership cannot be revoked.
    pub fn revoke_role(&mut self, admin_caller: &Address, role: Role, target: &Address) -> bool {
        if !self.is_admin(admin_caller) {
            return false;
        }
        if role == Role::Admin && *target == self.admin {
            return false;
        }
        if let Some(accounts) = self.members.get_mut(&role) {
            accounts.remove(target);
        }
        true
    }

    /// Toggle a role's enforcement switch. Only admin; the Admin role has no
    /// switch and cannot be opened.
    pub fn set_enforced(&mut self, admin_caller: &Address, role: Role, on: bool) -> bool {
        if !self.is_admin(admin_caller) || role == Role::Admin {
            return false;
        }
        self.enforced.insert(role, on);
        true
    }

    /// Transfer the primary admin to a new account.
    pub fn transfer_admin(&mut self, current_admin: &Address, new_admin: Address) -> bool {
        if !self.is_admin(current_admin) {
            return false;
        }
        if let Some(admins) = self.members.get_mut(&Role::Admin) {
            admins.remove(current_admin);
            admins.insert(new_admin.clone());
        }
        self.admin = new_admin;
        true
    }

    /// Get the current primary admin.
    pub fn admin(&self) -> &Address {
        &self.admin
    }
}

/// Allow-list of asset contracts permitted into custody.
///
/// Enforcement starts disabled: any asset contract may be wrapped until an
/// operator turns the switch on.
#[derive(Debug, Clone)]
pub struct AssetAllowlist {
    allowed: HashSet<ContractAddress>,
    enforced: bool,
}

impl AssetAllowlist {
    /// Create an empty, unenforced allow-list.
    pub fn new() -> Self {
        Self {
            allowed: HashSet::new(),
            enforced: false,
        }
    }

    /// Add a contract to the allow-list.
    pub fn allow(&mut self, contract: ContractAddress) {
        self.allowed.insert(contract);
    }

    /// Remove a contract from the allow-list.
    pub fn disallow(&mut self, contract: &ContractAddress) {
        self.allowed.remove(contract);
    }

    /// Toggle enforcement.
    pub fn set_enforced(&mut self, on: bool) {
        self.enforced = on;
    }

    /// Check if a contract is on the allow-list.
    pub fn is_allowed(&self, contract: &ContractAddress) -> bool {
        self.allowed.contains(contract)
    }

    /// Check if enforcement is on.
    pub fn is_enforced(&self) -> bool {
        self.enforced
    }

    /// The gate applied per wrapped entry: passes when enforcement is off,
    /// otherwise requires allow-list membership.
    pub fn check(&self, contract: &ContractAddress) -> bool {
        !self.enforced || self.allowed.contains(contract)
    }
}

impl Default for AssetAllowlist {
    fn default() -> Self {
        Self::new()
    }
}
