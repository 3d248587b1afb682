//! # Validation Module
//!
//! Input validation for everything that enters the storefront as text.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Boundaries                              │
//! │                                                                         │
//! │  Product card markup ──► validate_product_id / name / price            │
//! │           │                      │                                      │
//! │           │                      ▼                                      │
//! │           │               LineItem (always valid from here on)          │
//! │           ▼                                                             │
//! │  Order form input ──► validate_card_number / validate_expiry           │
//! │                                                                         │
//! │  Past these checks, cart operations are total and never fail.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use storefront_core::validation::{validate_product_id, validate_quantity};
//!
//! validate_product_id("p1").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id (the card's `data-product-id`).
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 100 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Leather Backpack").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items), negatives are not.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Order Form Validators
// =============================================================================

/// Validates a card number: exactly 16 ASCII digits, nothing else.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111111111111111").is_ok());
/// assert!(validate_card_number("4111 1111 1111 1111").is_err());
/// ```
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    if card_number.len() == 16 && card_number.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field: "card number".to_string(),
        })
    }
}

/// Validates an expiry date in `MM/YY` form with a month of 01-12.
///
/// Only the shape is checked; whether the date lies in the past is the
/// payment backend's concern.
pub fn validate_expiry(expiry: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::Invalid {
        field: "expiry date".to_string(),
    };

    let (month, year) = expiry.split_once('/').ok_or_else(invalid)?;
    let two_digits = |s: &str| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(invalid());
    }

    match month.parse::<u8>() {
        Ok(1..=12) => Ok(()),
        _ => Err(invalid()),
    }
}

/// Payment details entered on the order page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    pub card_number: String,
    pub expiry: String,
}

impl OrderForm {
    /// Checks the card number first, then the expiry; the first failure wins.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_card_number(&self.card_number)?;
        validate_expiry(&self.expiry)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
