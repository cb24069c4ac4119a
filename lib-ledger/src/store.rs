//! Keyed row storage.
//!
//! One logical store holding the ledger's four collections. The store
//! enforces key uniqueness and row existence only; every business invariant
//! (balance sign, supply ceiling, staking lock) belongs to the policy
//! engine.
//!
//! All collections are `BTreeMap`/`BTreeSet` so iteration order and
//! serialization are deterministic.

use lib_asset::{AccountName, Amount, SymbolCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{LedgerError, LedgerResult};

/// Per-currency issuance record. Created by `create`, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRow {
    /// Currently issued amount, net of retires and burns.
    pub supply: Amount,
    /// Issuance ceiling.
    pub max_supply: Amount,
    /// Principal allowed to issue and retire this currency.
    pub issuer: AccountName,
}

/// One account's holding of one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub balance: Amount,
    /// Principal billed for this row's storage. Set when the row is
    /// created and retained across later credits.
    pub payer: AccountName,
}

/// Funds locked against transfer for one account.
///
/// Keyed by account alone: stakes taken in any currency accumulate into a
/// single counter for that account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRow {
    pub account: AccountName,
    pub staked: Amount,
}

/// The ledger's row store: supply stats, balances, stakes, blacklist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerStore {
    stats: BTreeMap<SymbolCode, SupplyRow>,
    balances: BTreeMap<(AccountName, SymbolCode), BalanceRow>,
    stakes: BTreeMap<AccountName, StakeRow>,
    blacklist: BTreeSet<AccountName>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Supply stats ───────────────────────────────────────────────────

    pub fn stat(&self, code: SymbolCode) -> Option<&SupplyRow> {
        self.stats.get(&code)
    }

    pub fn insert_stat(&mut self, code: SymbolCode, row: SupplyRow) -> LedgerResult<()> {
        if self.stats.contains_key(&code) {
            return Err(LedgerError::AlreadyExists(format!("supply stat for {code}")));
        }
        self.stats.insert(code, row);
        Ok(())
    }

    pub fn update_stat(
        &mut self,
        code: SymbolCode,
        mutate: impl FnOnce(&mut SupplyRow),
    ) -> LedgerResult<()> {
        let row = self
            .stats
            .get_mut(&code)
            .ok_or_else(|| LedgerError::NotFound(format!("supply stat for {code}")))?;
        mutate(row);
        Ok(())
    }

    // ─── Balances ───────────────────────────────────────────────────────

    pub fn balance(&self, owner: AccountName, code: SymbolCode) -> Option<&BalanceRow> {
        self.balances.get(&(owner, code))
    }

    pub fn insert_balance(
        &mut self,
        owner: AccountName,
        code: SymbolCode,
        row: BalanceRow,
    ) -> LedgerResult<()> {
        if self.balances.contains_key(&(owner, code)) {
            return Err(LedgerError::AlreadyExists(format!("{code} balance of {owner}")));
        }
        self.balances.insert((owner, code), row);
        Ok(())
    }

    pub fn update_balance(
        &mut self,
        owner: AccountName,
        code: SymbolCode,
        mutate: impl FnOnce(&mut BalanceRow),
    ) -> LedgerResult<()> {
        let row = self
            .balances
            .get_mut(&(owner, code))
            .ok_or_else(|| LedgerError::NotFound(format!("{code} balance of {owner}")))?;
        mutate(row);
        Ok(())
    }

    pub fn delete_balance(&mut self, owner: AccountName, code: SymbolCode) -> LedgerResult<()> {
        self.balances
            .remove(&(owner, code))
            .map(|_| ())
            .ok_or_else(|| LedgerError::NotFound(format!("{code} balance of {owner}")))
    }

    // ─── Stakes ─────────────────────────────────────────────────────────

    pub fn stake(&self, account: AccountName) -> Option<&StakeRow> {
        self.stakes.get(&account)
    }

    pub fn insert_stake(&mut self, row: StakeRow) -> LedgerResult<()> {
        if self.stakes.contains_key(&row.account) {
            return Err(LedgerError::AlreadyExists(format!("stake of {}", row.account)));
        }
        self.stakes.insert(row.account, row);
        Ok(())
    }

    pub fn update_stake(
        &mut self,
        account: AccountName,
        mutate: impl FnOnce(&mut StakeRow),
    ) -> LedgerResult<()> {
        let row = self
            .stakes
            .get_mut(&account)
            .ok_or_else(|| LedgerError::NotFound(format!("stake of {account}")))?;
        mutate(row);
        Ok(())
    }

    pub fn delete_stake(&mut self, account: AccountName) -> LedgerResult<()> {
        self.stakes
            .remove(&account)
            .map(|_| ())
            .ok_or_else(|| LedgerError::NotFound(format!("stake of {account}")))
    }

    // ─── Blacklist ──────────────────────────────────────────────────────

    pub fn is_blacklisted(&self, account: AccountName) -> bool {
        self.blacklist.contains(&account)
    }

    pub fn insert_blacklist(&mut self, account: AccountName) -> LedgerResult<()> {
        if !self.blacklist.insert(account) {
            return Err(LedgerError::AlreadyExists(format!(
                "blacklist entry for {account}"
            )));
        }
        Ok(())
    }

    pub fn delete_blacklist(&mut self, account: AccountName) -> LedgerResult<()> {
        if !self.blacklist.remove(&account) {
            return Err(LedgerError::NotFound(format!("blacklist entry for {account}")));
        }
        Ok(())
    }
}
