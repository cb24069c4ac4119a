//! Blacklist management.
//!
//! Two explicit operations rather than one boolean toggle; both preserve
//! the mutual-exclusion invariant (an entry cannot be added twice nor
//! removed when absent) and both notify the affected account.

use lib_asset::AccountName;
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};
use crate::host::LedgerHost;

use super::TokenLedger;

impl<H: LedgerHost> TokenLedger<H> {
    /// Bar `account` from token operations.
    pub fn add_to_blacklist(&mut self, account: AccountName) -> LedgerResult<()> {
        self.require_auth(self.config.ledger_account)?;
        self.host.notify(account);
        if account == self.config.ledger_account {
            return Err(LedgerError::InvalidArgument(
                "the ledger account cannot be blacklisted".to_string(),
            ));
        }
        self.store.insert_blacklist(account)?;
        debug!(%account, "blacklisted");
        Ok(())
    }

    /// Restore a previously blacklisted `account`.
    pub fn remove_from_blacklist(&mut self, account: AccountName) -> LedgerResult<()> {
        self.require_auth(self.config.ledger_account)?;
        self.host.notify(account);
        if account == self.config.ledger_account {
            return Err(LedgerError::InvalidArgument(
                "the ledger account cannot be blacklisted".to_string(),
            ));
        }
        self.store.delete_blacklist(account)?;
        debug!(%account, "removed from blacklist");
        Ok(())
    }
}
