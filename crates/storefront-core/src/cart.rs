//! # Cart
//!
//! The authoritative list of line items for the current session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Page Action              Cart Method             Cart Change           │
//! │  ───────────              ───────────             ───────────           │
//! │                                                                         │
//! │  Add to cart ────────────► add_item() ──────────► push or qty += 1      │
//! │                                                                         │
//! │  − / + buttons ──────────► update_quantity() ───► qty = n (n ≤ 0: drop) │
//! │                                                                         │
//! │  Quantities never exceed MAX_ITEM_QUANTITY; larger requests clamp.      │
//! │                                                                         │
//! │  × button ───────────────► remove_item() ───────► retain(id != x)       │
//! │                                                                         │
//! │  Clear Cart ─────────────► clear() ─────────────► items.clear()         │
//! │                                                                         │
//! │  Any render ─────────────► snapshot() ──────────► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method here is total: unknown ids are no-ops and report that fact
//! through their return value instead of an error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;
use crate::validation::{
    validate_product_id, validate_product_name, validate_quantity, validate_unit_price,
};

// =============================================================================
// Line Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `id`: the product card's id; unique within a cart
/// - `name` / `unit_price` / `image`: frozen when the item is first added.
///   Adding the same id again only bumps the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product id
    pub id: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// USD unit price at time of adding (frozen)
    #[serde(rename = "unitPriceCents")]
    pub unit_price: Money,

    /// Product image URL
    pub image: String,

    /// Quantity in cart, 1..=MAX_ITEM_QUANTITY while the item is in a cart
    pub quantity: i64,
}

impl LineItem {
    /// Creates a validated line item with quantity 1.
    ///
    /// ## Errors
    /// Empty id or name, or a negative price.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        image: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        validate_product_id(&id)?;
        validate_product_name(&name)?;
        validate_unit_price(unit_price)?;

        Ok(LineItem {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            unit_price,
            image: image.into(),
            quantity: 1,
        })
    }

    /// Returns the item with a different starting quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Result<Self, ValidationError> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(self)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Operation Outcomes
// =============================================================================

/// What `add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Appended,
    /// The id was already present; its quantity is now `quantity`.
    Incremented { quantity: i64 },
    /// A new item carried a quantity below 1; the cart is unchanged.
    Ignored,
}

/// What `update_quantity` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The quantity was set.
    Set { quantity: i64 },
    /// The requested quantity was ≤ 0 and the line was removed.
    Removed,
    /// No line with that id; nothing changed.
    NotFound,
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Read-only view of a cart with freshly computed totals.
///
/// Derived, never stored: building one always sums the current items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    /// Σ unit_price × quantity
    #[serde(rename = "totalCents")]
    pub total: Money,
    /// Σ quantity
    pub count: i64,
}

impl CartSnapshot {
    /// Checks if the snapshot has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Every item has quantity in 1..=MAX_ITEM_QUANTITY (driving it to 0 or
///   below removes it, larger values are clamped)
/// - Totals are computed from `items` on demand, there are no counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from a previously persisted item list.
    ///
    /// Repairs lists that break the invariants instead of rejecting them:
    /// lines with quantity < 1 are dropped, duplicate ids are folded into
    /// the first occurrence (quantities summed) and quantities are capped.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Cart::new();
        for mut item in items.into_iter().filter(|i| i.quantity >= 1) {
            match cart.items.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_ITEM_QUANTITY);
                }
                None => {
                    item.quantity = item.quantity.min(MAX_ITEM_QUANTITY);
                    cart.items.push(item);
                }
            }
        }
        cart
    }

    /// Adds an item, or increases the quantity by one if its id is present.
    ///
    /// ## Behavior
    /// - Id already in cart: quantity += 1 up to MAX_ITEM_QUANTITY; the new
    ///   name/price/image are discarded in favour of the existing line
    /// - Id not in cart: appended with the quantity it carries, capped at
    ///   MAX_ITEM_QUANTITY
    /// - Id not in cart and quantity < 1: ignored
    pub fn add_item(&mut self, mut item: LineItem) -> AddOutcome {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = (existing.quantity + 1).min(MAX_ITEM_QUANTITY);
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }

        if item.quantity < 1 {
            return AddOutcome::Ignored;
        }

        item.quantity = item.quantity.min(MAX_ITEM_QUANTITY);
        self.items.push(item);
        AddOutcome::Appended
    }

    /// Removes an item by id. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - Id not found: no-op
    /// - Quantity ≤ 0: removes the item
    /// - Quantity > MAX_ITEM_QUANTITY: set to MAX_ITEM_QUANTITY
    /// - Otherwise: quantity is set
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> QuantityChange {
        let Some(position) = self.items.iter().position(|i| i.id == id) else {
            return QuantityChange::NotFound;
        };

        if quantity <= 0 {
            self.items.remove(position);
            return QuantityChange::Removed;
        }

        let quantity = quantity.min(MAX_ITEM_QUANTITY);
        self.items[position].quantity = quantity;
        QuantityChange::Set { quantity }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the total quantity of all items.
    pub fn count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the total in USD.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copies the items and computes totals.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total: self.total(),
            count: self.count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price_cents: i64) -> LineItem {
        LineItem::new(
            id,
            format!("Product {}", id),
            Money::from_cents(price_cents),
            format!("/img/{}.jpg", id),
        )
        .unwrap()
    }

    #[test]
    fn test_line_item_validation() {
        assert!(LineItem::new("", "Name", Money::zero(), "").is_err());
        assert!(LineItem::new("p1", " ", Money::zero(), "").is_err());
        assert!(LineItem::new("p1", "Name", Money::from_cents(-1), "").is_err());
        assert!(item("p1", 100).with_quantity(0).is_err());
        assert_eq!(item("p1", 100).with_quantity(3).unwrap().quantity, 3);
    }

    #[test]
    fn test_add_same_id_twice_merges() {
        let mut cart = Cart::new();

        assert_eq!(cart.add_item(item("p1", 1000)), AddOutcome::Appended);
        assert_eq!(
            cart.add_item(item("p1", 1000)),
            AddOutcome::Incremented { quantity: 2 }
        );

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_existing_keeps_original_details() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 1000));

        let mut changed = item("p1", 5000);
        changed.name = "Renamed".to_string();
        changed.quantity = 7;
        cart.add_item(changed);

        let line = cart.get("p1").unwrap();
        assert_eq!(line.name, "Product p1");
        assert_eq!(line.unit_price.cents(), 1000);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_new_item_keeps_given_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 250).with_quantity(4).unwrap());
        assert_eq!(cart.count(), 4);
        assert_eq!(cart.total().cents(), 1000);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        for quantity in [0, -5] {
            let mut cart = Cart::new();
            cart.add_item(item("p1", 1000));

            assert_eq!(cart.update_quantity("p1", quantity), QuantityChange::Removed);
            assert!(cart.is_empty());
            assert!(cart.get("p1").is_none());
        }
    }

    #[test]
    fn test_update_quantity_clamps_huge_values() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 2400));

        assert_eq!(
            cart.update_quantity("p1", 10_000_000_000_000_000),
            QuantityChange::Set {
                quantity: MAX_ITEM_QUANTITY
            }
        );
        assert_eq!(cart.update_quantity("p1", i64::MAX), QuantityChange::Set { quantity: 999 });

        let snap = cart.snapshot();
        assert_eq!(snap.count, 999);
        assert_eq!(snap.total.cents(), 2400 * 999);
    }

    #[test]
    fn test_add_stops_at_max_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 100));
        cart.update_quantity("p1", MAX_ITEM_QUANTITY);

        assert_eq!(
            cart.add_item(item("p1", 100)),
            AddOutcome::Incremented { quantity: 999 }
        );
        assert_eq!(cart.count(), 999);
    }

    #[test]
    fn test_add_item_without_quantity_is_ignored() {
        let mut cart = Cart::new();
        let mut empty = item("p1", 1000);
        empty.quantity = 0;

        assert_eq!(cart.add_item(empty), AddOutcome::Ignored);
        assert!(cart.is_empty());
        assert_eq!(cart.snapshot().count, 0);

        let mut negative = item("p2", 1000);
        negative.quantity = -3;
        assert_eq!(cart.add_item(negative), AddOutcome::Ignored);
        assert!(cart.is_empty());

        let mut huge = item("p3", 100);
        huge.quantity = i64::MAX;
        assert_eq!(cart.add_item(huge), AddOutcome::Appended);
        assert_eq!(cart.count(), 999);
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 1000));

        assert_eq!(cart.update_quantity("nope", 3), QuantityChange::NotFound);
        assert_eq!(cart.update_quantity("nope", 0), QuantityChange::NotFound);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 1000));

        assert!(!cart.remove_item("p2"));
        assert_eq!(cart.items().len(), 1);
        assert!(cart.remove_item("p1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_follow_every_mutation() {
        let mut cart = Cart::new();
        cart.add_item(item("a", 199));
        cart.add_item(item("b", 1050));
        cart.update_quantity("a", 3);

        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price.cents() * i.quantity)
            .sum();
        assert_eq!(cart.total().cents(), expected);
        assert_eq!(cart.total().cents(), 199 * 3 + 1050);
        assert_eq!(cart.count(), 4);

        cart.remove_item("b");
        assert_eq!(cart.total().cents(), 597);
    }

    #[test]
    fn test_cart_scenario() {
        let mut cart = Cart::new();

        cart.add_item(item("p1", 1000));
        let snap = cart.snapshot();
        assert_eq!((snap.count, snap.total.cents()), (1, 1000));

        cart.add_item(item("p1", 1000));
        let snap = cart.snapshot();
        assert_eq!((snap.count, snap.total.cents()), (2, 2000));
        assert_eq!(snap.items.len(), 1);

        cart.update_quantity("p1", 5);
        let snap = cart.snapshot();
        assert_eq!((snap.count, snap.total.cents()), (5, 5000));

        cart.remove_item("p1");
        let snap = cart.snapshot();
        assert_eq!((snap.count, snap.total.cents()), (0, 0));
        assert!(snap.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(item("p1", 999));
        cart.add_item(item("p2", 1));

        cart.clear();
        let snap = cart.snapshot();
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, Money::zero());
        assert_eq!(snap.count, 0);
    }

    #[test]
    fn test_from_items_repairs_invariants() {
        let mut zero = item("z", 100);
        zero.quantity = 0;
        let mut dup = item("a", 999);
        dup.quantity = 2;

        let cart = Cart::from_items(vec![item("a", 100), zero, item("b", 200), dup]);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.get("a").unwrap().quantity, 3);
        assert_eq!(cart.get("a").unwrap().unit_price.cents(), 100);
        assert!(cart.get("z").is_none());

        let mut big = item("c", 100);
        big.quantity = i64::MAX;
        let mut more = item("c", 100);
        more.quantity = i64::MAX;
        let cart = Cart::from_items(vec![big, more]);
        assert_eq!(cart.get("c").unwrap().quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_line_item_json_shape() {
        let json = serde_json::to_value(item("p1", 1999)).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["unitPriceCents"], 1999);
        assert_eq!(json["quantity"], 1);
        assert_eq!(json["image"], "/img/p1.jpg");
    }
}
