//! Transfer: quantity movement plus the fixed protocol fee.

use lib_asset::{AccountName, Amount};
use tracing::debug;

use crate::errors::{LedgerError, LedgerResult};
use crate::host::LedgerHost;

use super::TokenLedger;

impl<H: LedgerHost> TokenLedger<H> {
    /// Move `quantity` from `from` to `to`.
    ///
    /// Every transfer additionally debits the fixed protocol fee from
    /// `from`'s fee-currency balance and shrinks the fee currency's supply
    /// and ceiling by the same amount, whatever currency the transfer
    /// itself moves. When `from` has staked funds, the staked counter stays
    /// untouchable: the sender's balance must cover `quantity` plus the
    /// full stake.
    pub fn transfer(
        &mut self,
        from: AccountName,
        to: AccountName,
        quantity: Amount,
        memo: &str,
    ) -> LedgerResult<()> {
        if from == to {
            return Err(LedgerError::InvalidArgument(
                "cannot transfer to self".to_string(),
            ));
        }
        self.require_auth(from)?;
        self.require_not_blacklisted(from)?;
        self.require_not_blacklisted(to)?;
        if !self.host.account_exists(to) {
            return Err(LedgerError::NotFound(format!("recipient account {to}")));
        }
        let code = quantity.symbol().code();
        let stat = self.stat_or_missing(code)?;
        self.host.notify(from);
        self.host.notify(to);
        Self::check_quantity(quantity)?;
        if quantity.symbol() != stat.supply.symbol() {
            return Err(LedgerError::InvalidArgument(
                "symbol precision mismatch".to_string(),
            ));
        }
        Self::check_memo(memo)?;
        // A recipient who co-authorized the call is billed for any new row.
        let payer = if self.host.is_authorized(to) { to } else { from };

        // Fee stage. The fee currency's supply record must absorb the fee
        // without breaking the supply floor.
        let fee = self.config.transfer_fee;
        let fee_code = fee.symbol().code();
        let fee_stat = self.stat_or_missing(fee_code)?;
        if fee.symbol() != fee_stat.supply.symbol() {
            return Err(LedgerError::InvalidArgument(
                "fee precision mismatch".to_string(),
            ));
        }
        if fee_stat.supply.units() < fee.units() {
            return Err(LedgerError::PolicyViolation(
                "fee exceeds the fee currency's outstanding supply".to_string(),
            ));
        }
        let new_fee_supply = fee_stat.supply.checked_sub(fee)?;
        let new_fee_max = fee_stat.max_supply.checked_sub(fee)?;
        let balance_after_fee = self.debit_preview(from, fee)?;

        // The quantity debit and the staking lock both act on the post-fee
        // view when the transfer moves the fee currency itself.
        let same_currency = fee_code == code;
        let available = if same_currency {
            Some(balance_after_fee)
        } else {
            self.store.balance(from, code).map(|row| row.balance)
        };

        // The staked counter is symbol-agnostic: whatever currency the
        // stake was taken in, it locks this transfer's currency.
        if let (Some(available), Some(stake)) = (available, self.store.stake(from)) {
            let locked = quantity
                .units()
                .checked_add(stake.staked.units())
                .ok_or(LedgerError::Overflow)?;
            if available.units() < locked {
                return Err(LedgerError::PolicyViolation(format!(
                    "staked funds of {from} lock this transfer"
                )));
            }
        }

        let new_sender_balance = match available {
            Some(balance) => {
                if balance.units() < quantity.units() {
                    return Err(LedgerError::PolicyViolation(format!(
                        "overdrawn {code} balance of {from}"
                    )));
                }
                balance.checked_sub(quantity)?
            }
            None => {
                return Err(LedgerError::NotFound(format!("{code} balance of {from}")));
            }
        };
        let credited = self.credit_preview(to, quantity)?;

        // Every write below was validated above.
        self.store.update_stat(fee_code, |s| {
            s.supply = new_fee_supply;
            s.max_supply = new_fee_max;
        })?;
        self.store
            .update_balance(from, fee_code, |row| row.balance = balance_after_fee)?;
        self.store
            .update_balance(from, code, |row| row.balance = new_sender_balance)?;
        self.apply_credit(to, quantity, credited, payer)?;
        debug!(%from, %to, %quantity, %fee, "transfer committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::harness::*;
    use crate::errors::LedgerError;

    /// Fee currency plus a GOLD currency whose issuer holds fee balance.
    fn gold_ledger() -> crate::engine::TokenLedger<crate::host::MemoryHost> {
        let mut l = ledger();
        setup_fee_currency(&mut l, &["goldmint", "alice", "bob"]);
        create_currency(&mut l, "goldmint", "10000.0000 GOLD");
        issue_to_issuer(&mut l, "goldmint", "1000.0000 GOLD");
        l.host().clear_notifications();
        l
    }

    #[test]
    fn test_transfer_moves_quantity_and_charges_fee() {
        let mut l = gold_ledger();
        let gold = amt("1.0000 GOLD").symbol().code();
        let fee = amt("1.0000 FEE").symbol().code();
        let fee_supply_before = l.supply(fee).unwrap();
        let fee_max_before = l.max_supply(fee).unwrap();

        l.host().set_authorized([acct("goldmint")]);
        l.transfer(acct("goldmint"), acct("alice"), amt("10.0000 GOLD"), "hi")
            .unwrap();

        assert_eq!(l.balance(acct("goldmint"), gold).unwrap(), amt("990.0000 GOLD"));
        assert_eq!(l.balance(acct("alice"), gold).unwrap(), amt("10.0000 GOLD"));
        // Fee came out of the sender's fee balance and the fee currency's
        // supply record.
        assert_eq!(l.balance(acct("goldmint"), fee).unwrap(), amt("49.0000 FEE"));
        assert_eq!(
            l.supply(fee).unwrap(),
            fee_supply_before.checked_sub(amt("1.0000 FEE")).unwrap()
        );
        assert_eq!(
            l.max_supply(fee).unwrap(),
            fee_max_before.checked_sub(amt("1.0000 FEE")).unwrap()
        );
        // GOLD's own supply record is untouched.
        assert_eq!(l.supply(gold).unwrap(), amt("1000.0000 GOLD"));
    }

    #[test]
    fn test_transfer_of_fee_currency_stacks_debits() {
        let mut l = gold_ledger();
        let fee = amt("1.0000 FEE").symbol().code();

        l.host().set_authorized([acct("alice")]);
        l.transfer(acct("alice"), acct("bob"), amt("10.0000 FEE"), "")
            .unwrap();

        assert_eq!(l.balance(acct("alice"), fee).unwrap(), amt("39.0000 FEE"));
        assert_eq!(l.balance(acct("bob"), fee).unwrap(), amt("60.0000 FEE"));
    }

    #[test]
    fn test_transfer_without_fee_balance_fails_entirely() {
        let mut l = gold_ledger();
        let gold = amt("1.0000 GOLD").symbol().code();
        let fee = amt("1.0000 FEE").symbol().code();

        // Give carol GOLD but no fee balance.
        l.host().register_account(acct("carol"));
        l.host().set_authorized([acct("goldmint")]);
        l.transfer(acct("goldmint"), acct("carol"), amt("10.0000 GOLD"), "")
            .unwrap();
        let fee_supply_before = l.supply(fee).unwrap();

        l.host().set_authorized([acct("carol")]);
        assert!(matches!(
            l.transfer(acct("carol"), acct("alice"), amt("5.0000 GOLD"), ""),
            Err(LedgerError::NotFound(_))
        ));

        // Neither leg happened.
        assert_eq!(l.balance(acct("carol"), gold).unwrap(), amt("10.0000 GOLD"));
        assert!(l.balance(acct("alice"), gold).is_err());
        assert_eq!(l.supply(fee).unwrap(), fee_supply_before);
    }

    #[test]
    fn test_transfer_with_underfunded_fee_balance_fails_entirely() {
        let mut l = gold_ledger();
        let gold = amt("1.0000 GOLD").symbol().code();

        // Drain alice's fee balance down to 0.5000 FEE, less than the fee.
        l.host().set_authorized([acct("alice")]);
        l.transfer(acct("alice"), acct("bob"), amt("48.5000 FEE"), "")
            .unwrap();
        // Hand alice some GOLD to try to move.
        l.host().set_authorized([acct("goldmint")]);
        l.transfer(acct("goldmint"), acct("alice"), amt("10.0000 GOLD"), "")
            .unwrap();

        l.host().set_authorized([acct("alice")]);
        let err = l
            .transfer(acct("alice"), acct("bob"), amt("1.0000 GOLD"), "")
            .unwrap_err();
        assert!(matches!(err, LedgerError::PolicyViolation(_)));
        assert_eq!(l.balance(acct("alice"), gold).unwrap(), amt("10.0000 GOLD"));
        assert!(l.balance(acct("bob"), gold).is_err());
    }

    #[test]
    fn test_transfer_rejects_self() {
        let mut l = gold_ledger();
        l.host().set_authorized([acct("alice")]);
        assert!(matches!(
            l.transfer(acct("alice"), acct("alice"), amt("1.0000 FEE"), ""),
            Err(LedgerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_transfer_rejects_unknown_recipient() {
        let mut l = gold_ledger();
        l.host().set_authorized([acct("alice")]);
        assert!(matches!(
            l.transfer(acct("alice"), acct("nobody"), amt("1.0000 FEE"), ""),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_transfer_requires_sender_authority() {
        let mut l = gold_ledger();
        l.host().set_authorized([acct("bob")]);
        assert!(matches!(
            l.transfer(acct("alice"), acct("bob"), amt("1.0000 FEE"), ""),
            Err(LedgerError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_transfer_notification_order() {
        let mut l = gold_ledger();
        l.host().set_authorized([acct("alice")]);
        l.transfer(acct("alice"), acct("bob"), amt("1.0000 FEE"), "")
            .unwrap();
        assert_eq!(l.host().notifications(), vec![acct("alice"), acct("bob")]);
    }

    #[test]
    fn test_sender_pays_for_new_row_by_default() {
        let mut l = gold_ledger();
        let gold = amt("1.0000 GOLD").symbol().code();

        l.host().set_authorized([acct("goldmint")]);
        l.transfer(acct("goldmint"), acct("alice"), amt("10.0000 GOLD"), "")
            .unwrap();
        assert_eq!(l.payer(acct("alice"), gold), Some(acct("goldmint")));
    }

    #[test]
    fn test_coauthorized_recipient_pays_for_new_row() {
        let mut l = gold_ledger();
        let gold = amt("1.0000 GOLD").symbol().code();

        l.host().set_authorized([acct("goldmint"), acct("alice")]);
        l.transfer(acct("goldmint"), acct("alice"), amt("10.0000 GOLD"), "")
            .unwrap();
        assert_eq!(l.payer(acct("alice"), gold), Some(acct("alice")));
    }

    #[test]
    fn test_existing_row_keeps_original_payer() {
        let mut l = gold_ledger();
        let gold = amt("1.0000 GOLD").symbol().code();

        l.host().set_authorized([acct("goldmint")]);
        l.transfer(acct("goldmint"), acct("alice"), amt("10.0000 GOLD"), "")
            .unwrap();
        l.host().set_authorized([acct("goldmint"), acct("alice")]);
        l.transfer(acct("goldmint"), acct("alice"), amt("5.0000 GOLD"), "")
            .unwrap();
        assert_eq!(l.payer(acct("alice"), gold), Some(acct("goldmint")));
    }

    #[test]
    fn test_transfer_rejects_blacklisted_parties() {
        let mut l = gold_ledger();
        l.host().set_authorized([acct(LEDGER)]);
        l.add_to_blacklist(acct("bob")).unwrap();

        l.host().set_authorized([acct("alice")]);
        assert!(matches!(
            l.transfer(acct("alice"), acct("bob"), amt("1.0000 FEE"), ""),
            Err(LedgerError::PolicyViolation(_))
        ));

        l.host().set_authorized([acct(LEDGER)]);
        l.add_to_blacklist(acct("alice")).unwrap();
        l.remove_from_blacklist(acct("bob")).unwrap();
        l.host().set_authorized([acct("alice")]);
        assert!(matches!(
            l.transfer(acct("alice"), acct("bob"), amt("1.0000 FEE"), ""),
            Err(LedgerError::PolicyViolation(_))
        ));
    }
}
