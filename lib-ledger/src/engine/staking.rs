//! Staking lock: funds held against transfer by the staking controller.

use lib_asset::{AccountName, Amount};
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};
use crate::host::LedgerHost;
use crate::store::StakeRow;

use super::TokenLedger;

impl<H: LedgerHost> TokenLedger<H> {
    /// Lock `quantity` of `from`'s funds against transfer.
    ///
    /// Only the staking controller may stake. Repeated stakes accumulate
    /// into the account's single staked counter, whichever currency each
    /// stake was taken in.
    pub fn stake(&mut self, from: AccountName, quantity: Amount) -> LedgerResult<()> {
        self.require_auth(self.config.staking_controller)?;
        Self::check_quantity(quantity)?;
        let code = quantity.symbol().code();
        let balance = self
            .store
            .balance(from, code)
            .map(|row| row.balance)
            .ok_or_else(|| LedgerError::NotFound(format!("{from} holds no {code} to stake")))?;

        match self.store.stake(from).cloned() {
            None => {
                if balance.units() < quantity.units() {
                    return Err(LedgerError::PolicyViolation(format!(
                        "{from} balance does not cover the requested stake"
                    )));
                }
                self.store.insert_stake(StakeRow {
                    account: from,
                    staked: quantity,
                })?;
            }
            Some(existing) => {
                let unstaked = balance
                    .units()
                    .checked_sub(existing.staked.units())
                    .ok_or(LedgerError::Overflow)?;
                if unstaked < quantity.units() {
                    return Err(LedgerError::PolicyViolation(format!(
                        "{from} unstaked balance does not cover the requested stake"
                    )));
                }
                let units = existing
                    .staked
                    .units()
                    .checked_add(quantity.units())
                    .ok_or(LedgerError::Overflow)?;
                // The counter keeps the symbol it was opened with.
                let staked = existing.staked.with_units(units)?;
                self.store.update_stake(from, |row| row.staked = staked)?;
            }
        }
        debug!(%from, %quantity, "staked");
        Ok(())
    }

    /// Release previously staked funds.
    ///
    /// Releasing the exact staked amount deletes the row; asking for more
    /// than is staked fails.
    pub fn unstake(&mut self, from: AccountName, quantity: Amount) -> LedgerResult<()> {
        self.require_auth(self.config.staking_controller)?;
        Self::check_quantity(quantity)?;
        let existing = self
            .store
            .stake(from)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(format!("stake of {from}")))?;

        if existing.staked.units() == quantity.units() {
            self.store.delete_stake(from)?;
        } else if existing.staked.units() < quantity.units() {
            return Err(LedgerError::PolicyViolation(format!(
                "{from} has less staked than the requested release"
            )));
        } else {
            let units = existing.staked.units() - quantity.units();
            let staked = existing.staked.with_units(units)?;
            self.store.update_stake(from, |row| row.staked = staked)?;
        }
        debug!(%from, %quantity, "unstaked");
        Ok(())
    }
}
