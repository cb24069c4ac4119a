//! Currency lifecycle: create, issue, retire, burn.

use lib_asset::{AccountName, Amount};
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};
use crate::host::LedgerHost;
use crate::store::SupplyRow;

use super::TokenLedger;

impl<H: LedgerHost> TokenLedger<H> {
    /// Register a new currency with an issuance ceiling.
    ///
    /// Only the ledger's own principal may create currencies. The supply
    /// record starts at zero and is never deleted.
    pub fn create(&mut self, issuer: AccountName, max_supply: Amount) -> LedgerResult<()> {
        self.require_auth(self.config.ledger_account)?;
        if !max_supply.is_valid() {
            return Err(LedgerError::InvalidArgument(
                "max supply outside the representable range".to_string(),
            ));
        }
        if !max_supply.is_positive() {
            return Err(LedgerError::InvalidArgument(
                "max supply must be positive".to_string(),
            ));
        }

        self.store.insert_stat(
            max_supply.symbol().code(),
            SupplyRow {
                supply: Amount::zero(max_supply.symbol()),
                max_supply,
                issuer,
            },
        )?;
        debug!(%issuer, %max_supply, "currency created");
        Ok(())
    }

    /// Issue new supply to the issuer account.
    pub fn issue(&mut self, to: AccountName, quantity: Amount, memo: &str) -> LedgerResult<()> {
        self.require_not_blacklisted(to)?;
        Self::check_memo(memo)?;
        let code = quantity.symbol().code();
        let stat = self.stat_or_missing(code)?;
        if to != stat.issuer {
            return Err(LedgerError::PolicyViolation(
                "tokens can only be issued to the issuer account".to_string(),
            ));
        }
        self.host.notify(to);
        self.require_auth(stat.issuer)?;
        Self::check_quantity(quantity)?;
        if quantity.symbol() != stat.supply.symbol() {
            return Err(LedgerError::InvalidArgument(
                "symbol precision mismatch".to_string(),
            ));
        }
        let available = stat.max_supply.checked_sub(stat.supply)?;
        if quantity.units() > available.units() {
            return Err(LedgerError::PolicyViolation(
                "quantity exceeds available supply".to_string(),
            ));
        }
        let new_supply = stat.supply.checked_add(quantity)?;
        let credited = self.credit_preview(stat.issuer, quantity)?;

        self.store.update_stat(code, |s| s.supply = new_supply)?;
        self.apply_credit(stat.issuer, quantity, credited, stat.issuer)?;
        debug!(%to, %quantity, "issued");
        Ok(())
    }

    /// Take previously issued supply back out of circulation.
    ///
    /// The issuer's balance is the only lower bound: the debit fails before
    /// the supply record is touched.
    pub fn retire(&mut self, quantity: Amount, memo: &str) -> LedgerResult<()> {
        Self::check_memo(memo)?;
        let code = quantity.symbol().code();
        let stat = self.stat_or_missing(code)?;
        self.require_auth(stat.issuer)?;
        Self::check_quantity(quantity)?;
        if quantity.symbol() != stat.supply.symbol() {
            return Err(LedgerError::InvalidArgument(
                "symbol precision mismatch".to_string(),
            ));
        }
        let new_balance = self.debit_preview(stat.issuer, quantity)?;
        let new_supply = stat.supply.checked_sub(quantity)?;

        self.store.update_stat(code, |s| s.supply = new_supply)?;
        self.store
            .update_balance(stat.issuer, code, |row| row.balance = new_balance)?;
        debug!(issuer = %stat.issuer, %quantity, "retired");
        Ok(())
    }

    /// Destroy burnable-currency supply from a trusted bridge.
    ///
    /// Unlike `retire`, burning shrinks the ceiling permanently: both
    /// `supply` and `max_supply` drop by the burned quantity.
    pub fn burn(
        &mut self,
        sender: AccountName,
        from: AccountName,
        quantity: Amount,
        memo: &str,
    ) -> LedgerResult<()> {
        if quantity.symbol() != self.config.burn_symbol {
            return Err(LedgerError::InvalidArgument(format!(
                "only {} may be burned",
                self.config.burn_symbol.code()
            )));
        }
        if !self.config.trusted_burn_sources.contains(&from) {
            return Err(LedgerError::PolicyViolation(format!(
                "{from} is not a trusted burn source"
            )));
        }
        self.require_auth(from)?;
        let code = quantity.symbol().code();
        let stat = self.stat_or_missing(code)?;
        self.host.notify(from);
        self.host.notify(sender);
        Self::check_quantity(quantity)?;
        if quantity.symbol() != stat.supply.symbol() {
            return Err(LedgerError::InvalidArgument(
                "symbol precision mismatch".to_string(),
            ));
        }
        Self::check_memo(memo)?;
        if stat.max_supply.units() < quantity.units() {
            return Err(LedgerError::PolicyViolation(
                "burn exceeds the remaining ceiling".to_string(),
            ));
        }
        let new_supply = stat.supply.checked_sub(quantity)?;
        let new_max = stat.max_supply.checked_sub(quantity)?;
        let new_balance = self.debit_preview(sender, quantity)?;

        self.store.update_stat(code, |s| {
            s.supply = new_supply;
            s.max_supply = new_max;
        })?;
        self.store
            .update_balance(sender, code, |row| row.balance = new_balance)?;
        debug!(%sender, %from, %quantity, "burned");
        Ok(())
    }
}
