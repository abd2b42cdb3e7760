//! # Money Module
//!
//! Provides the `Won` type for the store's monetary values.
//!
//! ## Why Integer Won?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The won has no minor unit in circulation, so every price, sale price  │
//! │  and total in the store is a whole number of won.                      │
//! │                                                                         │
//! │    Book.price ─────► Orders.saleprice ─────► SUM / AVG on dashboard    │
//! │                                                                         │
//! │  Only averages produce fractions; they are truncated for display,      │
//! │  the same way the dashboard card always showed them.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use madang_core::money::Won;
//!
//! let total: Won = [Won::new(6000), Won::new(21000)].into_iter().sum();
//! assert_eq!(total.to_string(), "27,000원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

// =============================================================================
// Won Type
// =============================================================================

/// An amount of Korean won.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches SQLite's INTEGER and `SUM()` result type
/// - **Transparent serde**: serializes as a bare number in JSON screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Won(i64);

impl Won {
    /// Creates an amount from a whole number of won.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Won(amount)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Zero won.
    #[inline]
    pub const fn zero() -> Self {
        Won(0)
    }

    /// Converts an aggregate average into won, truncating toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use madang_core::money::Won;
    ///
    /// // 131000 / 11 = 11909.09...
    /// assert_eq!(Won::from_average(11909.09), Won::new(11909));
    /// ```
    pub fn from_average(average: f64) -> Self {
        Won(average.trunc() as i64)
    }

    /// Formats the amount with thousands separators and no currency suffix.
    ///
    /// ## Example
    /// ```rust
    /// use madang_core::money::Won;
    ///
    /// assert_eq!(Won::new(1234567).grouped(), "1,234,567");
    /// assert_eq!(Won::new(-7500).grouped(), "-7,500");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            out.push('-');
        }

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }
}

/// Shows the amount the way the store prints prices: `13,000원`.
impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", self.grouped())
    }
}

impl From<i64> for Won {
    fn from(amount: i64) -> Self {
        Won(amount)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Won {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Won(self.0 + other.0)
    }
}

impl AddAssign for Won {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Self {
        iter.fold(Won::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Won::new(0).to_string(), "0원");
        assert_eq!(Won::new(999).to_string(), "999원");
        assert_eq!(Won::new(7500).to_string(), "7,500원");
        assert_eq!(Won::new(131000).to_string(), "131,000원");
        assert_eq!(Won::new(1000000).to_string(), "1,000,000원");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(Won::new(-1000).grouped(), "-1,000");
        assert_eq!(Won::new(-12).grouped(), "-12");
    }

    #[test]
    fn test_sum_and_add() {
        let prices = [6000, 21000, 12000].map(Won::new);
        let total: Won = prices.into_iter().sum();
        assert_eq!(total, Won::new(39000));

        let mut running = Won::zero();
        running += Won::new(500);
        assert_eq!(running + Won::new(500), Won::new(1000));
    }

    #[test]
    fn test_average_truncates() {
        assert_eq!(Won::from_average(11909.909), Won::new(11909));
        assert_eq!(Won::from_average(0.4), Won::zero());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Won::new(13000)).unwrap();
        assert_eq!(json, "13000");
    }
}
