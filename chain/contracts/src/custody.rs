//! Bundle custody ledger — manifests keyed by receipt id
//!
//! Owns the mapping from receipt id to the manifest of assets held under it.
//! Two orderings are load-bearing and must not be reordered:
//! - `store` confirms every transfer before recording the manifest
//!   (confirm-then-record), so no manifest ever references assets the
//!   custody account has not actually received;
//! - `release` erases the manifest before issuing any outward transfer
//!   (erase-then-transfer), so a nested call on the same id sees
//!   `NoSuchManifest` and cannot double-release the bundle.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use types::asset::{AssetEntry, AssetRef};
use types::ids::{Address, ReceiptId};

use crate::adapter::{AssetTransport, TransferAdapter};
use crate::errors::{CustodyError, TransferError};

/// The recorded contents of one wrapped bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub entries: Vec<AssetEntry>,
    pub uri: String,
    /// Integrity digest over the entry sequence, fixed at store time.
    pub digest: [u8; 32],
}

/// Compute the integrity digest of an entry sequence.
///
/// Fields are fed to the hasher with separator bytes so adjacent strings
/// cannot alias across field or entry boundaries.
pub fn manifest_digest(entries: &[AssetEntry]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for entry in entries {
        match &entry.asset {
            AssetRef::Fungible { contract } => {
                hasher.update(b"fungible");
                hasher.update(contract.as_str().as_bytes());
            }
            AssetRef::Unique { contract, item_id } => {
                hasher.update(b"unique");
                hasher.update(contract.as_str().as_bytes());
                hasher.update(item_id.to_be_bytes());
            }
            AssetRef::Batch { contract, class_id } => {
                hasher.update(b"batch");
                hasher.update(contract.as_str().as_bytes());
                hasher.update(class_id.to_be_bytes());
            }
        }
        hasher.update([0u8]);
        hasher.update(entry.quantity.to_string().as_bytes());
        hasher.update([0u8]);
    }
    hasher.finalize().into()
}

/// Custody ledger mapping receipt ids to live manifests.
#[derive(Debug)]
pub struct BundleCustody {
    /// Ordered map: receipt id -> manifest
    manifests: BTreeMap<ReceiptId, Manifest>,
    adapter: TransferAdapter,
}

impl BundleCustody {
    /// Create a custody ledger holding assets under `custody_account`.
    pub fn new(custody_account: Address) -> Self {
        Self {
            manifests: BTreeMap::new(),
            adapter: TransferAdapter::new(custody_account),
        }
    }

    /// The account holding all custodied assets.
    pub fn custody_account(&self) -> &Address {
        self.adapter.custody_account()
    }

    /// Deposit a manifest under `receipt_id`.
    ///
    /// Moves each entry in order from the depositor into custody. The
    /// manifest is persisted only after every transfer has succeeded; if any
    /// entry fails, the already-confirmed prefix is returned to the
    /// depositor and the original error propagates.
    pub fn store(
        &mut self,
        transport: &mut dyn AssetTransport,
        depositor: &Address,
        entries: Vec<AssetEntry>,
        uri: impl Into<String>,
        receipt_id: ReceiptId,
    ) -> Result<(), CustodyError> {
        if self.manifests.contains_key(&receipt_id) {
            return Err(CustodyError::DuplicateReceipt { receipt_id });
        }

        let mut moved = 0;
        let mut failure: Option<TransferError> = None;
        for entry in &entries {
            match self.adapter.move_in(transport, entry, depositor) {
                Ok(()) => moved += 1,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        if let Some(err) = failure {
            for settled in &entries[..moved] {
                self.adapter.move_out(transport, settled, depositor)?;
            }
            return Err(err.into());
        }

        let digest = manifest_digest(&entries);
        self.manifests.insert(
            receipt_id,
            Manifest {
                entries,
                uri: uri.into(),
                digest,
            },
        );
        Ok(())
    }

    /// Withdraw the manifest under `receipt_id` to `recipient`, erasing it.
    ///
    /// The record is removed before any outward transfer. On a mid-loop
    /// failure the staged release rolls back: delivered entries are
    /// recovered from the recipient and the manifest reinstated before the
    /// error is returned, so no asset is stranded and the claim survives.
    pub fn release(
        &mut self,
        transport: &mut dyn AssetTransport,
        receipt_id: ReceiptId,
        recipient: &Address,
    ) -> Result<(), CustodyError> {
        let manifest = self
            .manifests
            .remove(&receipt_id)
            .ok_or(CustodyError::NoSuchManifest { receipt_id })?;

        if manifest_digest(&manifest.entries) != manifest.digest {
            self.manifests.insert(receipt_id, manifest);
            return Err(CustodyError::ManifestCorrupted { receipt_id });
        }

        let mut moved = 0;
        let mut failure: Option<TransferError> = None;
        for entry in &manifest.entries {
            match self.adapter.move_out(transport, entry, recipient) {
                Ok(()) => moved += 1,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        match failure {
            None => Ok(()),
            Some(err) => {
                let mut recovery_failure: Option<TransferError> = None;
                for delivered in &manifest.entries[..moved] {
                    if let Err(recovery_err) =
                        self.adapter.move_in(transport, delivered, recipient)
                    {
                        recovery_failure = Some(recovery_err);
                        break;
                    }
                }
                // Reinstate the manifest even if recovery stalls: the claim
                // must never be dropped while any of its assets are held.
                self.manifests.insert(receipt_id, manifest);
                match recovery_failure {
                    Some(recovery_err) => Err(recovery_err.into()),
                    None => Err(err.into()),
                }
            }
        }
    }

    // ───────────────────────── Read Accessors ─────────────────────────

    /// The live manifest for a receipt id, if any.
    pub fn manifest(&self, receipt_id: ReceiptId) -> Option<&Manifest> {
        self.manifests.get(&receipt_id)
    }

    /// The uri recorded for a receipt id.
    pub fn uri_of(&self, receipt_id: ReceiptId) -> Result<&str, CustodyError> {
        self.manifests
            .get(&receipt_id)
            .map(|manifest| manifest.uri.as_str())
            .ok_or(CustodyError::NoSuchManifest { receipt_id })
    }

    /// Check whether a live manifest exists for a receipt id.
    pub fn contains(&self, receipt_id: ReceiptId) -> bool {
        self.manifests.contains_key(&receipt_id)
    }

    /// Number of entries in a live manifest.
    pub fn bundle_size(&self, receipt_id: ReceiptId) -> Option<usize> {
        self.manifests
            .get(&receipt_id)
            .map(|manifest| manifest.entries.len())
    }

    /// Number of live manifests.
    pub fn manifest_count(&self) -> usize {
        self.manifests.len()
    }
}
