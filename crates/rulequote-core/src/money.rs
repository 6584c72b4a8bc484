//! # Money Module
//!
//! Provides the `Money` type for rounded monetary values.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UNROUNDED (Decimal)                ROUNDED (Money)                     │
//! │                                                                         │
//! │  quantity × unit_price              subtotal ──┐                        │
//! │  subtotal × discount rate    ──►    discount ──┼─ each rounded ONCE     │
//! │  taxable base × tax rate            tax      ──┤  half-up to cents      │
//! │  taxable base + tax                 total    ──┘                        │
//! │                                                                         │
//! │  Intermediates never pass through Money, so rounding error never       │
//! │  compounds across steps.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rulequote_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(1099); // $10.99
//! assert_eq!(price.to_string(), "$10.99");
//!
//! // 0.825 rounds half-up to 0.83
//! let tax = Money::from_decimal(Decimal::new(825, 3)).unwrap();
//! assert_eq!(tax.cents(), 83);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Number of decimal places every monetary output is rounded to.
pub const CURRENCY_DECIMALS: u32 = 2;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to whole cents using round-half-up.
///
/// Midpoints move away from zero: `0.005 → 0.01`, `-0.005 → -0.01`.
/// All amounts produced by the pricing engine are non-negative, so for them
/// this is plain "round half up".
///
/// ## Example
/// ```rust
/// use rulequote_core::money::round_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_currency(Decimal::new(5, 3)), Decimal::new(1, 2));
/// assert_eq!(round_currency(Decimal::new(1234, 3)), Decimal::new(123, 2));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 cents**: rounded outputs are exact and compare by value
/// - **No float constructor**: amounts enter either as cents or as an exact
///   `Decimal` that is rounded explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rulequote_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds an unrounded decimal amount half-up to cents.
    ///
    /// Fails with [`CoreError::AmountOverflow`] when the amount does not fit
    /// in an `i64` number of cents.
    pub fn from_decimal(amount: Decimal) -> CoreResult<Self> {
        let cents = round_currency(amount)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.to_i64())
            .ok_or(CoreError::AmountOverflow)?;
        Ok(Money(cents))
    }

    /// Returns the amount as an exact decimal with two places.
    ///
    /// ## Example
    /// ```rust
    /// use rulequote_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::from_cents(4320).to_decimal(), Decimal::new(4320, 2));
    /// ```
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, CURRENCY_DECIMALS)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34` / `-$5.50`.
///
/// This is the format used in explanation lines and rendered documents.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
