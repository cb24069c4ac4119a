//! Signed fixed-point quantities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AssetError;
use crate::symbol::Symbol;

/// Largest representable magnitude, `2^62 - 1` base units.
pub const MAX_AMOUNT_UNITS: i64 = (1 << 62) - 1;

/// A signed fixed-point quantity tagged with its currency.
///
/// `units` counts base units; the symbol's precision fixes where the
/// decimal point sits. Arithmetic between two amounts requires equal
/// symbols and is overflow-checked.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    units: i64,
    symbol: Symbol,
}

impl Amount {
    /// Build an amount, rejecting magnitudes outside the representable range.
    pub fn new(units: i64, symbol: Symbol) -> Result<Self, AssetError> {
        let amount = Self { units, symbol };
        if !amount.is_valid() {
            return Err(AssetError::AmountOutOfRange);
        }
        Ok(amount)
    }

    /// Zero of the given currency.
    pub fn zero(symbol: Symbol) -> Self {
        Self { units: 0, symbol }
    }

    pub fn units(&self) -> i64 {
        self.units
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Whether the magnitude is within the representable range.
    pub fn is_valid(&self) -> bool {
        self.units >= -MAX_AMOUNT_UNITS && self.units <= MAX_AMOUNT_UNITS
    }

    pub fn is_positive(&self) -> bool {
        self.units > 0
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    fn require_same_symbol(&self, other: &Amount) -> Result<(), AssetError> {
        if self.symbol != other.symbol {
            return Err(AssetError::SymbolMismatch {
                expected: self.symbol,
                found: other.symbol,
            });
        }
        Ok(())
    }

    /// Checked addition; the symbols must match and the result must stay in
    /// range.
    pub fn checked_add(&self, other: Amount) -> Result<Amount, AssetError> {
        self.require_same_symbol(&other)?;
        let units = self
            .units
            .checked_add(other.units)
            .ok_or(AssetError::Overflow)?;
        Amount::new(units, self.symbol).map_err(|_| AssetError::Overflow)
    }

    /// Checked subtraction; the symbols must match and the result must stay
    /// in range.
    pub fn checked_sub(&self, other: Amount) -> Result<Amount, AssetError> {
        self.require_same_symbol(&other)?;
        let units = self
            .units
            .checked_sub(other.units)
            .ok_or(AssetError::Overflow)?;
        Amount::new(units, self.symbol).map_err(|_| AssetError::Overflow)
    }

    /// Same amount with a different unit count, preserving the symbol.
    pub fn with_units(&self, units: i64) -> Result<Amount, AssetError> {
        Amount::new(units, self.symbol)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision() as u32;
        if precision == 0 {
            return write!(f, "{} {}", self.units, self.symbol.code());
        }
        let scale = 10i64.pow(precision);
        let integral = self.units / scale;
        let fractional = (self.units % scale).abs();
        let sign = if self.units < 0 && integral == 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            integral,
            fractional,
            self.symbol.code(),
            width = precision as usize
        )
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({self})")
    }
}

impl FromStr for Amount {
    type Err = AssetError;

    /// Parse the `Display` shape, e.g. `"1.0000 GOLD"` or `"25 POINT"`.
    /// The number of fractional digits fixes the symbol's precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AssetError::MalformedAmount(s.to_string());
        let (number, code) = s.trim().rsplit_once(' ').ok_or_else(malformed)?;
        let (digits, precision) = match number.split_once('.') {
            Some((integral, fractional)) => {
                if fractional.is_empty() || !fractional.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed());
                }
                if fractional.len() > usize::from(crate::symbol::MAX_PRECISION) {
                    return Err(AssetError::InvalidPrecision(fractional.len() as u8));
                }
                (format!("{integral}{fractional}"), fractional.len() as u8)
            }
            None => (number.to_string(), 0),
        };
        let units: i128 = digits.parse().map_err(|_| malformed())?;
        let units = i64::try_from(units).map_err(|_| AssetError::AmountOutOfRange)?;
        Amount::new(units, Symbol::new(code, precision)?)
    }
}
