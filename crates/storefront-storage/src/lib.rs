//! # storefront-storage: Local Storage for the Storefront
//!
//! Persists the page's local key-value state (cart, preferred currency,
//! preferred sort) in SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CartStore::add_item / CurrencyDisplay::apply                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-storage (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Storage     │    │   Repositories     │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│ LocalStorageRepo   │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │ PreferenceRepo     │  │ 001_local  │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront.db  (local_storage table)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_storage::{Storage, StorageConfig};
//!
//! let storage = Storage::new(StorageConfig::new("storefront.db")).await?;
//! let currency = storage.preferences().preferred_currency().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use pool::{Storage, StorageConfig};

pub use repository::local::{LocalStorageRepository, StoredEntry};
pub use repository::preferences::{
    PreferenceRepository, CART_KEY, LEGACY_CART_KEY, PREFERRED_CURRENCY_KEY, PREFERRED_SORT_KEY,
};
