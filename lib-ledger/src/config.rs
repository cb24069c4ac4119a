//! Ledger policy configuration.
//!
//! Privileged principals and protocol constants, injected at engine
//! construction so they are testable and auditable rather than baked into
//! operation code.

use lib_asset::{AccountName, Amount, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::{LedgerError, LedgerResult};

/// Configuration for the policy engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    // =========================================================================
    // Principals
    // =========================================================================
    /// The ledger's own principal. Authorizes `create` and blacklist
    /// management.
    pub ledger_account: AccountName,
    /// The only principal allowed to stake and unstake on behalf of
    /// accounts.
    pub staking_controller: AccountName,
    /// Bridge accounts allowed to invoke `burn`.
    pub trusted_burn_sources: BTreeSet<AccountName>,

    // =========================================================================
    // Protocol economics
    // =========================================================================
    /// Fixed fee debited from the sender on every transfer, in the fee
    /// currency, independent of the currency being transferred.
    pub transfer_fee: Amount,
    /// The one currency `burn` accepts. Burning shrinks its ceiling
    /// permanently.
    pub burn_symbol: Symbol,
}

impl LedgerConfig {
    /// Shape checks on the injected values.
    pub fn validate(&self) -> LedgerResult<()> {
        if !self.transfer_fee.is_valid() || !self.transfer_fee.is_positive() {
            return Err(LedgerError::InvalidArgument(
                "transfer fee must be a positive amount".to_string(),
            ));
        }
        Ok(())
    }
}
