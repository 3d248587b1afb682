//! # Preference Repository
//!
//! Typed access to the keys the storefront keeps in local storage.
//!
//! | Key                 | Value                                     |
//! |---------------------|-------------------------------------------|
//! | `cart`              | JSON array of line items                  |
//! | `preferredCurrency` | `USD`, `EUR` or `ETB`                     |
//! | `preferredSort`     | `asc` or `desc`                           |
//! | `cartItems`         | legacy cart format, only ever deleted     |
//!
//! Values that fail to decode are treated as absent and logged; a damaged
//! entry must never keep the page from loading.

use storefront_core::{CurrencyCode, LineItem, SortDirection};
use tracing::{debug, warn};

use super::local::LocalStorageRepository;
use crate::error::{StorageError, StorageResult};

/// Cart line items, as a JSON array.
pub const CART_KEY: &str = "cart";

/// Last currency chosen in the selector.
pub const PREFERRED_CURRENCY_KEY: &str = "preferredCurrency";

/// Last direction chosen in the sort control.
pub const PREFERRED_SORT_KEY: &str = "preferredSort";

/// Cart key written by older page versions.
pub const LEGACY_CART_KEY: &str = "cartItems";

/// Repository for the storefront's known keys.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    local: LocalStorageRepository,
}

impl PreferenceRepository {
    /// Creates a new PreferenceRepository.
    pub fn new(local: LocalStorageRepository) -> Self {
        PreferenceRepository { local }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Loads the persisted cart. Missing or unreadable data yields an empty list.
    pub async fn load_cart(&self) -> StorageResult<Vec<LineItem>> {
        let Some(raw) = self.local.get_item(CART_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) => {
                debug!(lines = items.len(), "Loaded persisted cart");
                Ok(items)
            }
            Err(e) => {
                warn!(error = %e, "Persisted cart is unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Writes the full item list under `cart`.
    pub async fn save_cart(&self, items: &[LineItem]) -> StorageResult<()> {
        let json =
            serde_json::to_string(items).map_err(|e| StorageError::serialization(CART_KEY, e))?;
        self.local.set_item(CART_KEY, &json).await
    }

    /// Deletes the `cart` key. Returns whether it existed.
    pub async fn clear_cart(&self) -> StorageResult<bool> {
        self.local.remove_item(CART_KEY).await
    }

    /// Deletes the legacy `cartItems` key. Returns whether it existed.
    pub async fn remove_legacy_cart(&self) -> StorageResult<bool> {
        let removed = self.local.remove_item(LEGACY_CART_KEY).await?;
        if removed {
            debug!("Removed legacy cart entry");
        }
        Ok(removed)
    }

    // =========================================================================
    // Currency
    // =========================================================================

    /// The persisted currency, or USD when unset or unrecognized.
    pub async fn preferred_currency(&self) -> StorageResult<CurrencyCode> {
        let Some(raw) = self.local.get_item(PREFERRED_CURRENCY_KEY).await? else {
            return Ok(CurrencyCode::default());
        };

        Ok(raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "Unknown persisted currency, using USD");
            CurrencyCode::default()
        }))
    }

    /// Persists the selected currency.
    pub async fn set_preferred_currency(&self, code: CurrencyCode) -> StorageResult<()> {
        self.local
            .set_item(PREFERRED_CURRENCY_KEY, code.as_str())
            .await
    }

    // =========================================================================
    // Sort
    // =========================================================================

    /// The persisted sort direction, or ascending when unset or unrecognized.
    pub async fn preferred_sort(&self) -> StorageResult<SortDirection> {
        let Some(raw) = self.local.get_item(PREFERRED_SORT_KEY).await? else {
            return Ok(SortDirection::default());
        };

        Ok(raw.parse().unwrap_or_else(|_| {
            warn!(value = %raw, "Unknown persisted sort direction, using asc");
            SortDirection::default()
        }))
    }

    /// Persists the selected sort direction.
    pub async fn set_preferred_sort(&self, direction: SortDirection) -> StorageResult<()> {
        self.local
            .set_item(PREFERRED_SORT_KEY, direction.as_str())
            .await
    }
}
