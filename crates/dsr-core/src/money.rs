//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a day of ₹0.10 chai add-ons as floats:                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer paise                                            │
//! │    10 + 20 = 30 paise, exactly, no matter how many rows we add          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dsr_core::money::Money;
//!
//! let chai = Money::from_paise(1050);              // ₹10.50
//! let two = chai.checked_multiply_quantity(2);     // ₹21.00
//! assert_eq!(two.map(|m| m.to_plain_string()).as_deref(), Some("21"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds and corrections are recorded as negative totals
/// - **Single field tuple struct**: zero-cost over i64, serializes as a number
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use dsr_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// For negative amounts only the rupee part carries the sign:
    /// `from_rupees_paise(-5, 50)` is -₹5.50.
    ///
    /// ```rust
    /// use dsr_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_paise(10, 99).paise(), 1099);
    /// assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    /// ```
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity, or `None` on overflow.
    ///
    /// Only used when a line total is first computed at the counter.
    /// Reports never call this: the stored total is authoritative.
    ///
    /// ```rust
    /// use dsr_core::money::Money;
    ///
    /// let samosa = Money::from_paise(1500);
    /// assert_eq!(samosa.checked_multiply_quantity(3), Some(Money::from_paise(4500)));
    /// assert_eq!(Money::from_paise(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Renders the amount in rupees without a currency symbol, trimming
    /// trailing zero paise.
    ///
    /// This is the number format used in exported spreadsheets, and it
    /// matches what the legacy exports contained for the same amounts.
    ///
    /// ```rust
    /// use dsr_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(2000).to_plain_string(), "20");
    /// assert_eq!(Money::from_paise(2050).to_plain_string(), "20.5");
    /// assert_eq!(Money::from_paise(2005).to_plain_string(), "20.05");
    /// assert_eq!(Money::from_paise(-300).to_plain_string(), "-3");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let rupees = self.rupees().abs();
        let paise = self.paise_part();

        if paise == 0 {
            format!("{sign}{rupees}")
        } else if paise % 10 == 0 {
            format!("{sign}{rupees}.{}", paise / 10)
        } else {
            format!("{sign}{rupees}.{paise:02}")
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable form for logs and error messages: `₹10.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_paise(500).to_string(), "₹5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_plain_string_trims_zero_paise() {
        assert_eq!(Money::from_paise(0).to_plain_string(), "0");
        assert_eq!(Money::from_paise(3500).to_plain_string(), "35");
        assert_eq!(Money::from_paise(1010).to_plain_string(), "10.1");
        assert_eq!(Money::from_paise(1001).to_plain_string(), "10.01");
        assert_eq!(Money::from_paise(-50).to_plain_string(), "-0.5");
        assert_eq!(Money::from_paise(-1205).to_plain_string(), "-12.05");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_paise(1000);

        assert_eq!(a.checked_add(Money::from_paise(500)), Some(Money::from_paise(1500)));
        assert_eq!(a.checked_add(Money::from_paise(-1500)), Some(Money::from_paise(-500)));
        assert_eq!(a.checked_multiply_quantity(3), Some(Money::from_paise(3000)));
        assert_eq!(a.checked_multiply_quantity(0), Some(Money::zero()));
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let huge = Money::from_paise(i64::MAX / 10);

        assert_eq!(huge.checked_multiply_quantity(999), None);
        assert_eq!(huge.checked_multiply_quantity(10).map(|m| m.paise()), Some(i64::MAX / 10 * 10));
        assert_eq!(Money::from_paise(i64::MAX).checked_add(Money::from_paise(1)), None);
        assert_eq!(Money::from_paise(i64::MIN).checked_add(Money::from_paise(-1)), None);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::from_paise(2050)).unwrap();
        assert_eq!(json, "2050");
        let back: Money = serde_json::from_str("-75").unwrap();
        assert!(back.is_negative());
    }
}
