//! Host environment seam.
//!
//! The ledger consumes authorization checks, account existence checks, and
//! inter-party notification as primitives supplied by its host. This module
//! defines that seam and an in-memory implementation suitable for unit
//! tests and development.

use lib_asset::AccountName;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Services the policy engine requires from its host environment.
pub trait LedgerHost {
    /// Has `principal` authorized the current call?
    fn is_authorized(&self, principal: AccountName) -> bool;

    /// Does `account` exist in the host's account registry?
    fn account_exists(&self, account: AccountName) -> bool;

    /// Inform `account` that the current operation touches it.
    ///
    /// Fire-and-forget: delivery is not required for ledger correctness,
    /// but dispatch order is observable and tests assert on it.
    fn notify(&self, account: AccountName);
}

/// In-memory host backed by `Arc<RwLock>`, so clones share one state.
///
/// Holds the set of principals that authorized the current call, the set of
/// known accounts, and an ordered log of delivered notifications.
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    inner: Arc<RwLock<MemoryHostState>>,
}

#[derive(Debug, Default)]
struct MemoryHostState {
    authorized: BTreeSet<AccountName>,
    accounts: BTreeSet<AccountName>,
    notifications: Vec<AccountName>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `account` to the known-account registry.
    pub fn register_account(&self, account: AccountName) {
        self.inner.write().accounts.insert(account);
    }

    /// Mark `principal` as having authorized the current call.
    pub fn authorize(&self, principal: AccountName) {
        self.inner.write().authorized.insert(principal);
    }

    /// Replace the authorization set, modeling a fresh call.
    pub fn set_authorized(&self, principals: impl IntoIterator<Item = AccountName>) {
        let mut state = self.inner.write();
        state.authorized = principals.into_iter().collect();
    }

    /// Notifications delivered so far, in dispatch order.
    pub fn notifications(&self) -> Vec<AccountName> {
        self.inner.read().notifications.clone()
    }

    pub fn clear_notifications(&self) {
        self.inner.write().notifications.clear();
    }
}

impl LedgerHost for MemoryHost {
    fn is_authorized(&self, principal: AccountName) -> bool {
        self.inner.read().authorized.contains(&principal)
    }

    fn account_exists(&self, account: AccountName) -> bool {
        self.inner.read().accounts.contains(&account)
    }

    fn notify(&self, account: AccountName) {
        self.inner.write().notifications.push(account);
    }
}
