//! Ledger operation errors.

use lib_asset::{AccountName, AssetError};
use thiserror::Error;

/// Error during ledger operations.
///
/// Every failure is fatal to the operation that raised it: the store is left
/// exactly as it was, and the caller must treat the attempt as a no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Malformed symbol, non-positive quantity, oversized memo, or a
    /// precision that does not match the currency's supply record.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced row or account does not exist where existence is
    /// required.
    #[error("not found: {0}")]
    NotFound(String),

    /// A row with the same key already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The call lacks the required principal's authorization.
    #[error("missing required authority of {0}")]
    Unauthorized(AccountName),

    /// Blacklisted participant, exceeded supply ceiling, insufficient or
    /// locked balance, non-zero close, or untrusted burn source.
    #[error("policy violation: {0}")]
    PolicyViolation(String),

    /// An arithmetic step exceeded the representable amount range.
    #[error("arithmetic overflow")]
    Overflow,
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

impl From<AssetError> for LedgerError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::Overflow | AssetError::AmountOutOfRange => LedgerError::Overflow,
            other => LedgerError::InvalidArgument(other.to_string()),
        }
    }
}
