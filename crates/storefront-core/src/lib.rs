//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart,
//! currency, carousel and catalog logic as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Page (product grid, cart panel, slider)         │   │
//! │  │    click / change / touch / timer tick  ──►  PageEvent          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            apps/storefront (event loop, views, timers)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  money   │ │ currency │ │   cart   │ │ carousel │          │   │
//! │  │   │  Money   │ │RateTable │ │   Cart   │ │ Carousel │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐                                     │   │
//! │  │   │ catalog  │ │validation│   NO I/O • NO TIMERS • NO STORAGE   │   │
//! │  │   └──────────┘ └──────────┘                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-storage (local key-value store)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`currency`] - Currency codes, exchange rates, price formatting
//! - [`cart`] - Cart, line items, snapshots
//! - [`carousel`] - Slide index walk and swipe detection
//! - [`catalog`] - Product cards and price sorting
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, CurrencyCode, LineItem, Money, RateTable};
//!
//! let mut cart = Cart::new();
//! let item = LineItem::new("p1", "Canvas Tote", Money::from_cents(1000), "/img/tote.jpg").unwrap();
//! cart.add_item(item.clone());
//! cart.add_item(item);
//!
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total().cents(), 2000);
//!
//! let price = RateTable::standard().format(cart.total(), CurrencyCode::Eur);
//! assert_eq!(price.to_string(), "€19.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carousel;
pub mod cart;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use carousel::{Carousel, SwipeDirection, SwipeTracker};
pub use cart::{AddOutcome, Cart, CartSnapshot, LineItem, QuantityChange};
pub use catalog::{ProductCard, SortDirection};
pub use currency::{CurrencyCode, ExchangeRate, FormattedPrice, RateTable};
pub use error::{CoreError, ValidationError};
pub use money::{BasePrice, Money};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single cart line.
///
/// Requests above it are clamped, so line totals stay far from `i64` limits.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// How long a cart notification stays on screen.
pub const NOTIFICATION_DURATION_MS: u64 = 2_000;

/// Autoplay advances the carousel this often.
pub const AUTOPLAY_INTERVAL_MS: u64 = 5_000;

/// Minimum horizontal travel for a touch to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;
