//! Balance-row lifecycle: open and close.

use lib_asset::{AccountName, Amount, Symbol};
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};
use crate::host::LedgerHost;
use crate::store::BalanceRow;

use super::TokenLedger;

impl<H: LedgerHost> TokenLedger<H> {
    /// Open a zero balance row for `owner`, billed to `ram_payer`.
    ///
    /// Idempotent: an existing row is left exactly as it is.
    pub fn open(
        &mut self,
        owner: AccountName,
        symbol: Symbol,
        ram_payer: AccountName,
    ) -> LedgerResult<()> {
        self.require_auth(ram_payer)?;
        self.require_not_blacklisted(owner)?;
        self.require_not_blacklisted(ram_payer)?;
        if !self.host.account_exists(owner) {
            return Err(LedgerError::NotFound(format!("owner account {owner}")));
        }
        let stat = self.stat_or_missing(symbol.code())?;
        if stat.supply.symbol() != symbol {
            return Err(LedgerError::InvalidArgument(
                "symbol precision mismatch".to_string(),
            ));
        }

        if self.store.balance(owner, symbol.code()).is_none() {
            self.store.insert_balance(
                owner,
                symbol.code(),
                BalanceRow {
                    balance: Amount::zero(symbol),
                    payer: ram_payer,
                },
            )?;
            debug!(%owner, %symbol, %ram_payer, "balance row opened");
        }
        Ok(())
    }

    /// Delete `owner`'s zero balance row for `symbol`.
    pub fn close(&mut self, owner: AccountName, symbol: Symbol) -> LedgerResult<()> {
        self.require_auth(owner)?;
        self.require_not_blacklisted(owner)?;
        let row = self
            .store
            .balance(owner, symbol.code())
            .ok_or_else(|| LedgerError::NotFound(format!("{} balance of {owner}", symbol.code())))?;
        if !row.balance.is_zero() {
            return Err(LedgerError::PolicyViolation(
                "cannot close a balance that is not zero".to_string(),
            ));
        }
        self.store.delete_balance(owner, symbol.code())?;
        debug!(%owner, %symbol, "balance row closed");
        Ok(())
    }
}
