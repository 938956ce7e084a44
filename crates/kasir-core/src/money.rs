//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Rupiah                                           │
//! │    The rupiah has no minor unit in practice, so every amount in the    │
//! │    system is a whole-rupiah i64. Percentage splits are computed in     │
//! │    basis points with explicit integer rounding.                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! // Create from whole rupiah
//! let price = Money::from_rupiah(25_000);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                          // Rp50.000
//! let total = price + Money::from_rupiah(35_000);   // Rp60.000
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and refunds
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support, serialized as a bare number so item
///   snapshots stay compact
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartItem.price ──► line total ──► cart total
///                                                          │
///             payment ── change ── cogs ── profit ◄────────┘
///
/// EVERY monetary value in the system flows through this type.
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::from_rupiah(25_000);
    /// assert_eq!(price.rupiah(), 25_000);
    /// ```
    #[inline]
    pub const fn from_rupiah(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Zero money value.
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit_price = Money::from_rupiah(25_000);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.rupiah(), 50_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a basis-point rate and returns the resulting portion.
    ///
    /// ## Arguments
    /// * `bps` - Rate in basis points (4000 = 40%)
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds to the nearest rupiah (5000/10000 = 0.5).
    /// i128 intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let total = Money::from_rupiah(85_000);
    /// let cogs = total.apply_bps(4000); // 40%
    /// assert_eq!(cogs.rupiah(), 34_000);
    /// ```
    pub fn apply_bps(&self, bps: u32) -> Money {
        let portion = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_rupiah(portion as i64)
    }

    /// Rounds up to the nearest multiple of `step`.
    ///
    /// Used by the quick-cash suggestions to land on round bill amounts.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let total = Money::from_rupiah(85_000);
    /// assert_eq!(total.round_up_to(50_000).rupiah(), 100_000);
    /// assert_eq!(total.round_up_to(10_000).rupiah(), 90_000);
    /// ```
    pub const fn round_up_to(&self, step: i64) -> Money {
        if step <= 0 || self.0 <= 0 {
            return *self;
        }
        Money(((self.0 + step - 1) / step) * step)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money the way Indonesian receipts do:
/// `Rp85.000` with dots as thousands separators.
///
/// ## Note
/// This is for logs and error messages. Locale-aware UI formatting is a
/// presentation concern and lives outside this crate.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}Rp{}", sign, grouped)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over line totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupiah() {
        let money = Money::from_rupiah(25_000);
        assert_eq!(money.rupiah(), 25_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_rupiah(85_000)), "Rp85.000");
        assert_eq!(format!("{}", Money::from_rupiah(1_250_000)), "Rp1.250.000");
        assert_eq!(format!("{}", Money::from_rupiah(500)), "Rp500");
        assert_eq!(format!("{}", Money::from_rupiah(-15_000)), "-Rp15.000");
        assert_eq!(format!("{}", Money::zero()), "Rp0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(25_000);
        let b = Money::from_rupiah(35_000);

        assert_eq!((a + b).rupiah(), 60_000);
        assert_eq!((b - a).rupiah(), 10_000);
        assert_eq!((a * 2).rupiah(), 50_000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [25_000, 25_000, 35_000]
            .into_iter()
            .map(Money::from_rupiah)
            .sum();
        assert_eq!(total.rupiah(), 85_000);
    }

    #[test]
    fn test_apply_bps() {
        // The 40/60 split on the canonical two-coffee cart
        let total = Money::from_rupiah(85_000);
        assert_eq!(total.apply_bps(4000).rupiah(), 34_000);
        assert_eq!((total - total.apply_bps(4000)).rupiah(), 51_000);
    }

    #[test]
    fn test_apply_bps_rounds_to_nearest() {
        // 40% of 1001 = 400.4 → 400; 40% of 1004 = 401.6 → 402
        assert_eq!(Money::from_rupiah(1001).apply_bps(4000).rupiah(), 400);
        assert_eq!(Money::from_rupiah(1004).apply_bps(4000).rupiah(), 402);
    }

    #[test]
    fn test_round_up_to() {
        let total = Money::from_rupiah(85_000);
        assert_eq!(total.round_up_to(10_000).rupiah(), 90_000);
        assert_eq!(total.round_up_to(100_000).rupiah(), 100_000);
        // Already a multiple stays put
        assert_eq!(Money::from_rupiah(20_000).round_up_to(10_000).rupiah(), 20_000);
    }

    #[test]
    fn test_serde_transparent() {
        let money = Money::from_rupiah(25_000);
        assert_eq!(serde_json::to_string(&money).unwrap(), "25000");

        let back: Money = serde_json::from_str("25000").unwrap();
        assert_eq!(back, money);
    }
}
