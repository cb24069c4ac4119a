//! Currency identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AssetError;

/// Maximum symbol code length in bytes.
pub const MAX_SYMBOL_CODE_LEN: usize = 7;

/// Maximum number of decimal digits a symbol may carry.
pub const MAX_PRECISION: u8 = 18;

/// Fixed-size currency code: 1-7 ASCII characters `A`-`Z`, zero-padded.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct SymbolCode([u8; 8]);

impl SymbolCode {
    /// Parse and validate a currency code.
    pub fn new(code: &str) -> Result<Self, AssetError> {
        let bytes = code.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_SYMBOL_CODE_LEN {
            return Err(AssetError::InvalidSymbolCode(code.to_string()));
        }
        if !bytes.iter().all(|b| b.is_ascii_uppercase()) {
            return Err(AssetError::InvalidSymbolCode(code.to_string()));
        }
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(self.0.len());
        // Construction only admits ASCII bytes.
        std::str::from_utf8(&self.0[..len]).unwrap_or("")
    }
}

impl fmt::Debug for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolCode({})", self.as_str())
    }
}

impl fmt::Display for SymbolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SymbolCode {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Validated currency identifier: code plus decimal precision.
///
/// Two symbols are equal iff both code and precision match; a symbol with
/// the right code but the wrong precision names a different currency.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    code: SymbolCode,
    precision: u8,
}

impl Symbol {
    /// Build a symbol from a code string and precision.
    pub fn new(code: &str, precision: u8) -> Result<Self, AssetError> {
        Self::from_parts(SymbolCode::new(code)?, precision)
    }

    /// Build a symbol from an already-validated code.
    pub fn from_parts(code: SymbolCode, precision: u8) -> Result<Self, AssetError> {
        if precision > MAX_PRECISION {
            return Err(AssetError::InvalidPrecision(precision));
        }
        Ok(Self { code, precision })
    }

    pub fn code(&self) -> SymbolCode {
        self.code
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({},{})", self.precision, self.code)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = AssetError;

    /// Parse the `Display` shape, e.g. `"4,GOLD"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| AssetError::InvalidSymbolCode(s.to_string()))?;
        let precision: u8 = precision
            .parse()
            .map_err(|_| AssetError::InvalidSymbolCode(s.to_string()))?;
        Symbol::new(code, precision)
    }
}
