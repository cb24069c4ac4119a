//! Policy engine.
//!
//! `TokenLedger` executes the ledger's operations against the row store,
//! the injected configuration, and the host environment. Every operation
//! follows the same discipline:
//!
//! 1. run every check, in a fixed order, computing the post-operation
//!    values with overflow-checked arithmetic;
//! 2. only then write, so a failed check can never leave partial state.
//!
//! Notifications fire at the exact points validation requires them, since
//! their dispatch order is observable to the host.

mod accounts;
mod blacklist;
mod staking;
mod supply;
mod transfer;

use lib_asset::{AccountName, Amount, SymbolCode};

use crate::config::LedgerConfig;
use crate::errors::{LedgerError, LedgerResult};
use crate::host::LedgerHost;
use crate::store::{BalanceRow, LedgerStore, SupplyRow};

/// Maximum memo length in bytes.
pub const MAX_MEMO_BYTES: usize = 256;

/// The fungible-token ledger: row store plus policy engine.
pub struct TokenLedger<H: LedgerHost> {
    config: LedgerConfig,
    store: LedgerStore,
    host: H,
}

impl<H: LedgerHost> TokenLedger<H> {
    /// Build an empty ledger over `host` with the given policy config.
    pub fn new(config: LedgerConfig, host: H) -> LedgerResult<Self> {
        Self::with_store(config, LedgerStore::new(), host)
    }

    /// Resume from a previously captured store snapshot.
    pub fn with_store(config: LedgerConfig, store: LedgerStore, host: H) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self { config, store, host })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Read access to the row store, for host-side snapshotting.
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    // ─── Read-only queries ──────────────────────────────────────────────

    /// Currently issued amount for a currency.
    pub fn supply(&self, code: SymbolCode) -> LedgerResult<Amount> {
        Ok(self.stat_or_missing(code)?.supply)
    }

    /// Issuance ceiling for a currency.
    pub fn max_supply(&self, code: SymbolCode) -> LedgerResult<Amount> {
        Ok(self.stat_or_missing(code)?.max_supply)
    }

    /// Issuing principal for a currency.
    pub fn issuer(&self, code: SymbolCode) -> LedgerResult<AccountName> {
        Ok(self.stat_or_missing(code)?.issuer)
    }

    /// An account's balance in a currency.
    pub fn balance(&self, owner: AccountName, code: SymbolCode) -> LedgerResult<Amount> {
        self.store
            .balance(owner, code)
            .map(|row| row.balance)
            .ok_or_else(|| LedgerError::NotFound(format!("{code} balance of {owner}")))
    }

    /// Which principal was billed for a balance row, if the row exists.
    pub fn payer(&self, owner: AccountName, code: SymbolCode) -> Option<AccountName> {
        self.store.balance(owner, code).map(|row| row.payer)
    }

    /// An account's staked counter, if any funds are staked.
    pub fn staked(&self, account: AccountName) -> Option<Amount> {
        self.store.stake(account).map(|row| row.staked)
    }

    pub fn is_blacklisted(&self, account: AccountName) -> bool {
        self.store.is_blacklisted(account)
    }

    // ─── Shared validation helpers ──────────────────────────────────────

    fn require_auth(&self, principal: AccountName) -> LedgerResult<()> {
        if self.host.is_authorized(principal) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized(principal))
        }
    }

    fn require_not_blacklisted(&self, account: AccountName) -> LedgerResult<()> {
        if self.store.is_blacklisted(account) {
            return Err(LedgerError::PolicyViolation(format!(
                "account {account} is blacklisted"
            )));
        }
        Ok(())
    }

    fn stat_or_missing(&self, code: SymbolCode) -> LedgerResult<SupplyRow> {
        self.store
            .stat(code)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("supply stat for {code}")))
    }

    fn check_memo(memo: &str) -> LedgerResult<()> {
        if memo.len() > MAX_MEMO_BYTES {
            return Err(LedgerError::InvalidArgument(format!(
                "memo has more than {MAX_MEMO_BYTES} bytes"
            )));
        }
        Ok(())
    }

    fn check_quantity(quantity: Amount) -> LedgerResult<()> {
        if !quantity.is_valid() {
            return Err(LedgerError::InvalidArgument(
                "quantity outside the representable range".to_string(),
            ));
        }
        if !quantity.is_positive() {
            return Err(LedgerError::InvalidArgument(
                "quantity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a debit of `value` against `owner`'s balance row and return
    /// the post-debit balance, without writing it.
    fn debit_preview(&self, owner: AccountName, value: Amount) -> LedgerResult<Amount> {
        let code = value.symbol().code();
        let row = self
            .store
            .balance(owner, code)
            .ok_or_else(|| LedgerError::NotFound(format!("{code} balance of {owner}")))?;
        if row.balance.units() < value.units() {
            return Err(LedgerError::PolicyViolation(format!(
                "overdrawn {code} balance of {owner}"
            )));
        }
        Ok(row.balance.checked_sub(value)?)
    }

    /// Validate a credit of `value` to `owner` and return the new balance,
    /// or `None` when a fresh row must be inserted.
    fn credit_preview(&self, owner: AccountName, value: Amount) -> LedgerResult<Option<Amount>> {
        match self.store.balance(owner, value.symbol().code()) {
            Some(row) => Ok(Some(row.balance.checked_add(value)?)),
            None => Ok(None),
        }
    }

    /// Apply a credit validated by [`Self::credit_preview`]. A fresh row is
    /// billed to `payer`; an existing row keeps its original payer.
    fn apply_credit(
        &mut self,
        owner: AccountName,
        value: Amount,
        preview: Option<Amount>,
        payer: AccountName,
    ) -> LedgerResult<()> {
        let code = value.symbol().code();
        match preview {
            Some(new_balance) => self.store.update_balance(owner, code, |row| {
                row.balance = new_balance;
            }),
            None => self.store.insert_balance(
                owner,
                code,
                BalanceRow {
                    balance: value,
                    payer,
                },
            ),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::harness::*;
    use crate::errors::LedgerError;

    #[test]
    fn test_queries_fail_on_missing_rows() {
        let l = ledger();
        let code = amt("1.0000 GOLD").symbol().code();
        assert!(matches!(l.supply(code), Err(LedgerError::NotFound(_))));
        assert!(matches!(l.max_supply(code), Err(LedgerError::NotFound(_))));
        assert!(matches!(l.issuer(code), Err(LedgerError::NotFound(_))));
        assert!(matches!(
            l.balance(acct("alice"), code),
            Err(LedgerError::NotFound(_))
        ));
        assert!(l.payer(acct("alice"), code).is_none());
        assert!(l.staked(acct("alice")).is_none());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        use crate::host::MemoryHost;
        use lib_asset::Amount;

        let mut cfg = config();
        cfg.transfer_fee = Amount::zero(cfg.transfer_fee.symbol());
        assert!(super::TokenLedger::new(cfg, MemoryHost::new()).is_err());
    }
}
