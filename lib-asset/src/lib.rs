//! Asset primitives for the token ledger.
//!
//! Fixed-size, deterministically serializable value types shared by every
//! ledger collection. No heap-allocated identifiers in ledger state.
//!
//! # Key Types
//!
//! - [`SymbolCode`] / [`Symbol`]: validated currency identifiers
//! - [`Amount`]: signed fixed-point quantity with overflow-checked arithmetic
//! - [`AccountName`]: validated principal identifier

pub mod account;
pub mod amount;
pub mod errors;
pub mod symbol;

pub use account::{AccountName, MAX_ACCOUNT_LEN};
pub use amount::{Amount, MAX_AMOUNT_UNITS};
pub use errors::AssetError;
pub use symbol::{Symbol, SymbolCode, MAX_PRECISION, MAX_SYMBOL_CODE_LEN};
