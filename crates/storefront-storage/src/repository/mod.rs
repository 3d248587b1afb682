//! # Repository Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore / CurrencyDisplay                                           │
//! │       │                                                                 │
//! │       │  storage.preferences().save_cart(items)                         │
//! │       ▼                                                                 │
//! │  PreferenceRepository   typed keys: cart, preferredCurrency, ...       │
//! │       │                                                                 │
//! │       │  local.set_item("cart", "[...]")                                │
//! │       ▼                                                                 │
//! │  LocalStorageRepository string keys → string values                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local_storage table                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`LocalStorageRepository`] - get/set/remove/keys over raw strings
//! - [`PreferenceRepository`] - the storefront's known keys, typed

pub mod local;
pub mod preferences;

pub use local::{LocalStorageRepository, StoredEntry};
pub use preferences::PreferenceRepository;
