//! In-memory vault store
//!
//! Owns the vault collection for the lifetime of the process. State is
//! volatile; there is no persistence and vaults are never destroyed.
//! All mutation goes through explicit update methods that enforce the
//! ledger rules in [`crate::domain::vault`].

use crate::config::vaults::seed_vaults;
use crate::domain::vault::{TransactionKind, Vault};

/// Owned collection of vaults, indexed by their stable ids
#[derive(Debug, Clone)]
pub struct VaultStore {
    vaults: Vec<Vault>,
}

impl VaultStore {
    /// Creates a store seeded with the five configured vaults
    pub fn new() -> Self {
        Self {
            vaults: seed_vaults(),
        }
    }

    /// Creates a store from an explicit vault list
    ///
    /// The list must be non-empty; the controller assumes at least one
    /// vault exists.
    pub fn with_vaults(vaults: Vec<Vault>) -> Self {
        Self { vaults }
    }

    /// All vaults, in seeded order
    pub fn vaults(&self) -> &[Vault] {
        &self.vaults
    }

    /// Looks up a vault by id
    pub fn get(&self, id: &str) -> Option<&Vault> {
        self.vaults.iter().find(|v| v.id == id)
    }

    /// Applies a transaction to the identified vault
    ///
    /// No-ops and returns None when the vault is unknown or the amount is
    /// not a positive finite number; invalid input is never surfaced as
    /// an error.
    pub fn apply_transaction(
        &mut self,
        id: &str,
        amount: f64,
        kind: TransactionKind,
        description: &str,
    ) -> Option<&Vault> {
        let vault = self.vaults.iter_mut().find(|v| v.id == id)?;
        if !vault.apply(amount, kind, description) {
            return None;
        }
        Some(vault)
    }

    /// Updates a vault's name and subtitle
    ///
    /// Blank fields retain the prior value. Returns None for unknown ids.
    pub fn rename(&mut self, id: &str, name: &str, subtitle: &str) -> Option<&Vault> {
        let vault = self.vaults.iter_mut().find(|v| v.id == id)?;
        vault.rename(name, subtitle);
        Some(vault)
    }
}

impl Default for VaultStore {
    fn default() -> Self {
        Self::new()
    }
}
