//! # Cart Store
//!
//! The session's single cart, keyed by product id, persisted under `cart`.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Page Action           Store Operation        Notice                    │
//! │  ───────────           ───────────────        ──────                    │
//! │                                                                         │
//! │  Add to cart ────────► add_item() ──────────► "Item added to cart"      │
//! │                                                                         │
//! │  × / qty ≤ 0 ────────► remove_item() ───────► "Item removed from cart"  │
//! │                                                                         │
//! │  + / - ──────────────► update_quantity() ───► (none)                    │
//! │                                                                         │
//! │  Clear Cart ─────────► clear_cart() ────────► "Cart has been cleared"   │
//! │                                                                         │
//! │  Checkout ───────────► checkout() ──────────► alert, no state change    │
//! │                                                                         │
//! │  Every mutation: recompute snapshot → persist → caller re-renders.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations never fail. A storage write that fails is logged and the
//! in-memory cart stays authoritative.

use tracing::{debug, info, warn};

use storefront_core::cart::QuantityChange;
use storefront_core::{AddOutcome, Cart, CartSnapshot, LineItem};
use storefront_storage::PreferenceRepository;

pub const ITEM_ADDED: &str = "Item added to cart";
pub const ITEM_REMOVED: &str = "Item removed from cart";
pub const CART_CLEARED: &str = "Cart has been cleared";
pub const CHECKOUT_PLACEHOLDER: &str = "Checkout functionality coming soon!";

/// Result of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartUpdate {
    /// Totals recomputed after the change.
    pub snapshot: CartSnapshot,
    /// Message to show, if the operation has one.
    pub notice: Option<&'static str>,
}

/// Owns the cart and writes it through to local storage.
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Cart,
    preferences: PreferenceRepository,
}

impl CartStore {
    /// Creates an empty store without touching storage.
    pub fn new(preferences: PreferenceRepository) -> Self {
        CartStore {
            cart: Cart::new(),
            preferences,
        }
    }

    /// Builds the store for a new page load.
    ///
    /// The legacy `cartItems` entry is always removed. With `restore` the
    /// persisted `cart` is loaded; otherwise the session starts empty and the
    /// stale `cart` entry is erased.
    pub async fn open(preferences: PreferenceRepository, restore: bool) -> Self {
        if let Err(e) = preferences.remove_legacy_cart().await {
            warn!(error = %e, "Failed to remove legacy cart entry");
        }

        let cart = if restore {
            match preferences.load_cart().await {
                Ok(items) => Cart::from_items(items),
                Err(e) => {
                    warn!(error = %e, "Failed to read persisted cart, starting empty");
                    Cart::new()
                }
            }
        } else {
            if let Err(e) = preferences.clear_cart().await {
                warn!(error = %e, "Failed to erase stale cart entry");
            }
            Cart::new()
        };

        info!(restored = restore, lines = cart.items().len(), "Cart store ready");
        CartStore { cart, preferences }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds an item, or bumps the quantity of an existing line by one.
    ///
    /// A new item without a positive quantity is dropped and does not notify.
    pub async fn add_item(&mut self, item: LineItem) -> CartUpdate {
        let id = item.id.clone();
        let notice = match self.cart.add_item(item) {
            AddOutcome::Appended => {
                debug!(product_id = %id, "Appended cart line");
                Some(ITEM_ADDED)
            }
            AddOutcome::Incremented { quantity } => {
                debug!(product_id = %id, quantity, "Incremented cart line");
                Some(ITEM_ADDED)
            }
            AddOutcome::Ignored => {
                debug!(product_id = %id, "Ignored item without quantity");
                None
            }
        };
        self.commit(notice).await
    }

    /// Removes a line. An unknown id changes nothing but still notifies.
    pub async fn remove_item(&mut self, id: &str) -> CartUpdate {
        if !self.cart.remove_item(id) {
            debug!(product_id = %id, "Remove for id not in cart");
        }
        self.commit(Some(ITEM_REMOVED)).await
    }

    /// Sets a line's quantity; zero or less removes it, values above
    /// MAX_ITEM_QUANTITY are clamped.
    ///
    /// Only the removal path notifies.
    pub async fn update_quantity(&mut self, id: &str, quantity: i64) -> CartUpdate {
        let notice = match self.cart.update_quantity(id, quantity) {
            QuantityChange::Set { quantity } => {
                debug!(product_id = %id, quantity, "Quantity set");
                None
            }
            QuantityChange::Removed => {
                debug!(product_id = %id, "Quantity driven to zero, line removed");
                Some(ITEM_REMOVED)
            }
            QuantityChange::NotFound => {
                debug!(product_id = %id, "Quantity update for id not in cart");
                None
            }
        };
        self.commit(notice).await
    }

    /// Empties the cart and erases the persisted entry.
    pub async fn clear_cart(&mut self) -> CartUpdate {
        self.cart.clear();
        if let Err(e) = self.preferences.clear_cart().await {
            warn!(error = %e, "Failed to erase persisted cart");
        }
        self.commit(Some(CART_CLEARED)).await
    }

    /// Checkout placeholder: no state change, returns the alert text.
    pub fn checkout(&self) -> &'static str {
        info!(lines = self.cart.items().len(), "Checkout requested");
        CHECKOUT_PLACEHOLDER
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    async fn commit(&self, notice: Option<&'static str>) -> CartUpdate {
        if let Err(e) = self.preferences.save_cart(self.cart.items()).await {
            warn!(error = %e, "Failed to persist cart");
        }

        CartUpdate {
            snapshot: self.cart.snapshot(),
            notice,
        }
    }
}
