//! # Currency Module
//!
//! The static price table: which currencies the storefront can display, their
//! exchange rate against USD, and their display symbol.
//!
//! ## Conversion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  data-usd-price="1299.50"                                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  BasePrice(1299500000) ──► RateTable::format(base, EUR)                 │
//! │                              │                                          │
//! │                              ├── rate(EUR) = 0.95                       │
//! │                              ├── convert → Money(123453)                │
//! │                              └── split   → "€" / "1,234" / "53"         │
//! │                                                                         │
//! │  <span class="currency">€</span><span class="amount">1,234</span>       │
//! │  <span class="cents">53</span>                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! USD is the reference currency: its rate is exactly 1 in every table, so
//! selecting USD reproduces the base price.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{BasePrice, Money};

// =============================================================================
// Currency Code
// =============================================================================

/// A currency the storefront can display prices in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// US dollar, the reference currency for every base price.
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Ethiopian birr.
    Etb,
}

impl CurrencyCode {
    /// Number of supported currencies.
    pub const COUNT: usize = 3;

    /// All supported currencies, in selector order.
    pub const ALL: [CurrencyCode; Self::COUNT] = [CurrencyCode::Usd, CurrencyCode::Eur, CurrencyCode::Etb];

    /// ISO 4217 code, as stored in the `preferredCurrency` key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Etb => "ETB",
        }
    }

    /// Display symbol written into the `currency` price slot.
    pub const fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Usd => "$",
            CurrencyCode::Eur => "€",
            CurrencyCode::Etb => "Br",
        }
    }

    const fn index(&self) -> usize {
        match self {
            CurrencyCode::Usd => 0,
            CurrencyCode::Eur => 1,
            CurrencyCode::Etb => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            "ETB" => Ok(CurrencyCode::Etb),
            _ => Err(CoreError::UnknownCurrency(s.to_string())),
        }
    }
}

// =============================================================================
// Exchange Rate
// =============================================================================

/// Units of the target currency per 1 USD, in millionths.
///
/// ## Why Millionths?
/// Same reason money is in cents: the table is exact (0.95 is `950_000`, not
/// `0.9499999…`), and conversion is a single integer multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExchangeRate(u64);

impl ExchangeRate {
    /// Fixed-point scale: `1.0 == SCALE`.
    pub const SCALE: u64 = 1_000_000;

    /// The identity rate (USD → USD).
    pub const ONE: ExchangeRate = ExchangeRate(Self::SCALE);

    /// Creates a rate from millionths (`950_000` = 0.95).
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        ExchangeRate(micros)
    }

    /// Returns the rate in millionths.
    #[inline]
    pub const fn micros(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = format!("{:06}", self.0 % Self::SCALE);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, frac)
        }
    }
}

// =============================================================================
// Formatted Price
// =============================================================================

/// The three strings a price element displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormattedPrice {
    /// Currency symbol (`$`, `€`, `Br`).
    pub symbol: String,
    /// Grouped integer part (`1,234`).
    pub amount: String,
    /// Two-digit fraction (`56`).
    pub cents: String,
}

impl fmt::Display for FormattedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{}", self.symbol, self.amount, self.cents)
    }
}

// =============================================================================
// Rate Table
// =============================================================================

/// Mapping of every [`CurrencyCode`] to a positive rate against USD.
///
/// ## Usage
/// ```rust
/// use storefront_core::currency::{CurrencyCode, ExchangeRate, RateTable};
/// use storefront_core::money::Money;
///
/// let table = RateTable::new()
///     .with_rate(CurrencyCode::Eur, ExchangeRate::from_micros(900_000))
///     .unwrap();
///
/// let price = table.format(Money::from_cents(2000), CurrencyCode::Eur);
/// assert_eq!(price.to_string(), "€18.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: [ExchangeRate; CurrencyCode::COUNT],
}

impl RateTable {
    /// A table where every currency is at parity with USD.
    ///
    /// Use [`RateTable::with_rate`] to fill in the others, or
    /// [`RateTable::standard`] for the storefront's published rates.
    pub const fn new() -> Self {
        RateTable {
            rates: [ExchangeRate::ONE; CurrencyCode::COUNT],
        }
    }

    /// The rates the storefront publishes.
    ///
    /// | Code | Rate   | Symbol |
    /// |------|--------|--------|
    /// | USD  | 1      | `$`    |
    /// | EUR  | 0.95   | `€`    |
    /// | ETB  | 120.45 | `Br`   |
    pub const fn standard() -> Self {
        RateTable {
            rates: [
                ExchangeRate::ONE,
                ExchangeRate::from_micros(950_000),
                ExchangeRate::from_micros(120_450_000),
            ],
        }
    }

    /// Returns a copy of the table with `code` set to `rate`.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidRate`] for a zero rate
    /// - [`CoreError::InvalidRate`] for any USD rate other than 1
    pub fn with_rate(mut self, code: CurrencyCode, rate: ExchangeRate) -> Result<Self, CoreError> {
        if rate.micros() == 0 {
            return Err(CoreError::InvalidRate {
                currency: code.to_string(),
                reason: "rate must be positive".to_string(),
            });
        }
        if code == CurrencyCode::Usd && rate != ExchangeRate::ONE {
            return Err(CoreError::InvalidRate {
                currency: code.to_string(),
                reason: "USD is the reference currency and must stay at 1".to_string(),
            });
        }
        self.rates[code.index()] = rate;
        Ok(self)
    }

    /// Rate for `code`.
    #[inline]
    pub fn rate(&self, code: CurrencyCode) -> ExchangeRate {
        self.rates[code.index()]
    }

    /// Converts a USD base amount into `code`, rounding once to cents.
    #[inline]
    pub fn convert(&self, base: impl Into<BasePrice>, code: CurrencyCode) -> Money {
        base.into().convert(self.rate(code))
    }

    /// Converts and splits a USD base amount for display.
    ///
    /// Accepts cart amounts ([`Money`]) and markup prices ([`BasePrice`]).
    pub fn format(&self, base: impl Into<BasePrice>, code: CurrencyCode) -> FormattedPrice {
        let (amount, cents) = self.convert(base, code).grouped_parts();
        FormattedPrice {
            symbol: code.symbol().to_string(),
            amount,
            cents,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_parsing() {
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!(" ETB ".parse::<CurrencyCode>().unwrap(), CurrencyCode::Etb);
        assert!(matches!(
            "XYZ".parse::<CurrencyCode>(),
            Err(CoreError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn test_currency_code_round_trips_through_display() {
        for code in CurrencyCode::ALL {
            assert_eq!(code.to_string().parse::<CurrencyCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_currency_code_serializes_as_iso_code() {
        let json = serde_json::to_string(&CurrencyCode::Eur).unwrap();
        assert_eq!(json, "\"EUR\"");
    }

    #[test]
    fn test_usd_is_identity_in_every_table() {
        let base = Money::from_cents(4_321);
        for table in [RateTable::new(), RateTable::standard()] {
            assert_eq!(table.rate(CurrencyCode::Usd), ExchangeRate::ONE);
            assert_eq!(table.convert(base, CurrencyCode::Usd), base);
        }
    }

    #[test]
    fn test_usd_rate_cannot_be_changed() {
        let result = RateTable::new().with_rate(CurrencyCode::Usd, ExchangeRate::from_micros(2));
        assert!(matches!(result, Err(CoreError::InvalidRate { .. })));

        // Setting it to exactly 1 is allowed.
        assert!(RateTable::new()
            .with_rate(CurrencyCode::Usd, ExchangeRate::ONE)
            .is_ok());
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let result = RateTable::new().with_rate(CurrencyCode::Eur, ExchangeRate::from_micros(0));
        assert!(matches!(result, Err(CoreError::InvalidRate { .. })));
    }

    #[test]
    fn test_conversion_is_linear() {
        let table = RateTable::standard();
        let base = Money::from_cents(2_000);
        assert_eq!(table.convert(base, CurrencyCode::Eur).cents(), 1_900);
        assert_eq!(table.convert(base, CurrencyCode::Etb).cents(), 240_900);
    }

    #[test]
    fn test_format_scenario_eur_at_point_nine() {
        let table = RateTable::new()
            .with_rate(CurrencyCode::Eur, ExchangeRate::from_micros(900_000))
            .unwrap();

        let price = table.format(Money::from_cents(2_000), CurrencyCode::Eur);
        assert_eq!(price.symbol, "€");
        assert_eq!(price.amount, "18");
        assert_eq!(price.cents, "00");
        assert_eq!(price.to_string(), "€18.00");
    }

    #[test]
    fn test_format_groups_thousands() {
        let price = RateTable::standard().format(Money::from_cents(129_999), CurrencyCode::Etb);
        // 1299.99 × 120.45 = 156,583.7955 → 156,583.80
        assert_eq!(price.symbol, "Br");
        assert_eq!(price.amount, "156,583");
        assert_eq!(price.cents, "80");
    }

    #[test]
    fn test_format_keeps_sub_cent_base_digits() {
        let table = RateTable::standard();
        let base = BasePrice::parse("1.005").unwrap();

        assert_eq!(table.format(base, CurrencyCode::Etb).to_string(), "Br121.05");
        assert_eq!(table.format(base, CurrencyCode::Usd).to_string(), "$1.01");
        assert_eq!(
            table.format(BasePrice::parse("24.00").unwrap(), CurrencyCode::Eur).to_string(),
            "€22.80"
        );
    }

    #[test]
    fn test_exchange_rate_display() {
        assert_eq!(ExchangeRate::ONE.to_string(), "1");
        assert_eq!(ExchangeRate::from_micros(950_000).to_string(), "0.95");
        assert_eq!(ExchangeRate::from_micros(120_450_000).to_string(), "120.45");
    }
}
