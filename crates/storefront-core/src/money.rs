//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Page markup carries prices as text:  data-usd-price="19.99"           │
//! │    parse as float, × 0.95, format    → 18.990499999999997 → "18.99"    │
//! │    it works, until a total drifts by a cent                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "19.99" → 1999 cents (parsed digit by digit, no float)              │
//! │    1999 × 0.950000 (fixed-point) → 1899 cents → "18.99"                │
//! │                                                                         │
//! │  Displayed prices keep every digit the markup gives (BasePrice,         │
//! │  in millionths) and round once, after the rate is applied.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Or from the price attribute text
//! let parsed = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(parsed, price);
//!
//! // Arithmetic operations
//! let doubled = price * 2;            // $21.98
//! assert_eq!(doubled.cents(), 2198);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::currency::ExchangeRate;
use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never underflows; prices themselves are
///   validated non-negative where they enter the system
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: serde support for the persisted cart snapshot
///
/// ## Where Money is Used
/// ```text
/// data-usd-price ──► Money::parse_decimal ──┬──► LineItem.unit_price ──► Cart total
///                                          │
///                                          └──► convert(rate) ──► "1,234" / "56"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount as it appears in page markup (`"19.99"`).
    ///
    /// ## Rules
    /// - Leading/trailing whitespace is ignored
    /// - Digits with an optional single `.`; no sign, no exponent, no grouping
    /// - More than two fractional digits round half-up to the cent
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("20").unwrap().cents(), 2000);
    /// assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
    /// assert_eq!(Money::parse_decimal("1.005").unwrap().cents(), 101);
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, ValidationError> {
        parse_fixed(text, 2).map(Money)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Converts this amount with a fixed-point exchange rate.
    ///
    /// ## Implementation
    /// Integer math on millionths: `(cents * micros + 500_000) / 1_000_000`.
    /// The +500_000 rounds half away from zero (mirrored for negatives).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::currency::ExchangeRate;
    /// use storefront_core::money::Money;
    ///
    /// let base = Money::from_cents(2000);            // $20.00
    /// let eur = ExchangeRate::from_micros(900_000);  // 0.9
    /// assert_eq!(base.convert(eur).cents(), 1800);   // 18.00
    /// ```
    pub fn convert(&self, rate: ExchangeRate) -> Money {
        BasePrice::from(*self).convert(rate)
    }

    /// Splits the amount into an en-US grouped integer part and a two-digit
    /// fraction, the way the price slots expect them.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let (amount, cents) = Money::from_cents(123_456_789).grouped_parts();
    /// assert_eq!(amount, "1,234,567");
    /// assert_eq!(cents, "89");
    /// ```
    pub fn grouped_parts(&self) -> (String, String) {
        let digits = self.dollars().unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.is_negative() {
            grouped.push('-');
        }
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        (grouped, format!("{:02}", self.cents_part()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount in USD (`$10.99`), as the cart panel renders unit prices
/// and totals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Saturating, so a cart total can never overflow.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

// =============================================================================
// Base Price
// =============================================================================

/// A USD price as written in page markup, kept in millionths of a dollar.
///
/// Display prices are converted from this value so that sub-cent digits
/// (`"1.005"`) still count. Rounding to cents happens once, after the rate.
///
/// ## Example
/// ```rust
/// use storefront_core::currency::ExchangeRate;
/// use storefront_core::money::BasePrice;
///
/// let base = BasePrice::parse("1.005").unwrap();
/// assert_eq!(base.micros(), 1_005_000);
///
/// // 1.005 × 120.45 = 121.052… → 121.05
/// let etb = ExchangeRate::from_micros(120_450_000);
/// assert_eq!(base.convert(etb).cents(), 12_105);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasePrice(i64);

impl BasePrice {
    /// Millionths per dollar.
    pub const SCALE: i64 = 1_000_000;

    const MICROS_PER_CENT: i64 = Self::SCALE / 100;

    /// Parses markup price text with up to six fractional digits; a seventh
    /// rounds half-up. Same grammar as [`Money::parse_decimal`].
    pub fn parse(text: &str) -> Result<BasePrice, ValidationError> {
        parse_fixed(text, 6).map(BasePrice)
    }

    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        BasePrice(micros)
    }

    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Rounds half-up to whole cents.
    pub fn to_money(&self) -> Money {
        Money(round_div(self.0 as i128, Self::MICROS_PER_CENT as i128))
    }

    /// Applies an exchange rate and rounds the result to cents.
    ///
    /// `micros × rate_micros` is in units of 10^-12 dollars; one half-up
    /// division brings it to cents.
    pub fn convert(&self, rate: ExchangeRate) -> Money {
        // i128 so large amounts × large rates cannot overflow
        let scaled = self.0 as i128 * rate.micros() as i128;
        let divisor = Self::MICROS_PER_CENT as i128 * ExchangeRate::SCALE as i128;
        Money(round_div(scaled, divisor))
    }
}

impl From<Money> for BasePrice {
    fn from(money: Money) -> Self {
        BasePrice(money.0.saturating_mul(Self::MICROS_PER_CENT))
    }
}

/// Divides rounding half away from zero, saturating into `i64`.
fn round_div(value: i128, divisor: i128) -> i64 {
    let half = divisor / 2;
    let rounded = if value < 0 {
        (value - half) / divisor
    } else {
        (value + half) / divisor
    };
    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Parses `digits.digits` into an integer with `scale` fractional digits.
/// The first dropped digit rounds half-up.
fn parse_fixed(text: &str, scale: u32) -> Result<i64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    };

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("must be a plain decimal number"));
    }

    let too_large = || invalid("amount is too large");
    let push_digit =
        |acc: i64, digit: i64| acc.checked_mul(10).and_then(|a| a.checked_add(digit));

    let mut value: i64 = 0;
    for digit in whole.bytes() {
        value = push_digit(value, i64::from(digit - b'0')).ok_or_else(too_large)?;
    }

    let mut minor = fraction.bytes().map(|d| i64::from(d - b'0'));
    for _ in 0..scale {
        value = push_digit(value, minor.next().unwrap_or(0)).ok_or_else(too_large)?;
    }
    if minor.next().is_some_and(|d| d >= 5) {
        value = value.checked_add(1).ok_or_else(too_large)?;
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
