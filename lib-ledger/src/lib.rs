//! Fungible-token ledger and policy engine.
//!
//! Maintains per-account balances across currencies, enforces supply caps,
//! and layers three transfer policies on top: a per-account blacklist, a
//! staking lock on transferring staked funds, and a fixed protocol fee
//! debited in one configured currency on every transfer.
//!
//! Persistent storage, signature verification, and notification delivery
//! are host concerns, consumed through [`LedgerHost`].
//!
//! # Key Types
//!
//! - [`TokenLedger`]: the policy engine executing ledger operations
//! - [`LedgerStore`]: keyed row store (supply stats, balances, stakes, blacklist)
//! - [`LedgerConfig`]: injected privileged principals and protocol economics
//! - [`LedgerHost`]: host seam; [`MemoryHost`] is the in-memory reference
//!
//! # Execution
//!
//! Construct a [`TokenLedger`] over a [`LedgerHost`] and call one method per
//! operation. Each call is atomic: it validates everything first and only
//! then writes, so any failure leaves the store untouched.

pub mod config;
pub mod engine;
pub mod errors;
pub mod host;
pub mod store;

pub use config::LedgerConfig;
pub use engine::{TokenLedger, MAX_MEMO_BYTES};
pub use errors::{LedgerError, LedgerResult};
pub use host::{LedgerHost, MemoryHost};
pub use store::{BalanceRow, LedgerStore, StakeRow, SupplyRow};
