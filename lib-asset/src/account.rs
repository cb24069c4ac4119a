//! Principal identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AssetError;

/// Maximum account name length in bytes.
pub const MAX_ACCOUNT_LEN: usize = 13;

/// Fixed-size principal identifier.
///
/// 1-13 ASCII characters from `a`-`z`, `1`-`5`, and `.`, stored zero-padded
/// so the type stays `Copy` and can key ordered collections.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct AccountName([u8; 16]);

impl AccountName {
    /// Parse and validate an account name.
    pub fn new(name: &str) -> Result<Self, AssetError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_ACCOUNT_LEN {
            return Err(AssetError::InvalidAccount(name.to_string()));
        }
        if !bytes
            .iter()
            .all(|&b| b.is_ascii_lowercase() || (b'1'..=b'5').contains(&b) || b == b'.')
        {
            return Err(AssetError::InvalidAccount(name.to_string()));
        }
        let mut buf = [0u8; 16];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        // Construction only admits ASCII bytes.
        std::str::from_utf8(&self.0[..len]).unwrap_or("")
    }
}

impl fmt::Debug for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountName({})", self.as_str())
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountName {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
