//! # Cart View
//!
//! Renders a [`CartSnapshot`] into the cart panel and the count badge.
//!
//! Each rendered control carries the [`CartAction`] it triggers. A click is
//! resolved by looking the control up in the last render, so the action a
//! person sees is the action that runs.
//!
//! ## Panel Markup
//! ```text
//! <div class="cart-items">
//!   <div class="cart-item" data-product-id="p1">
//!     <img src="..." alt="Canvas Tote">
//!     <div class="cart-item-details">
//!       <h4>Canvas Tote</h4>
//!       <p>$24.00 x 2</p>
//!       <div class="cart-item-controls">
//!         <button data-action="set-quantity" data-quantity="1">-</button>
//!         <span>2</span>
//!         <button data-action="set-quantity" data-quantity="3">+</button>
//!         <button data-action="remove" class="remove-item">×</button>
//!       </div>
//!     </div>
//!   </div>
//!   <div class="cart-total">
//!     <p>Total: $48.00</p>
//!     <button data-action="checkout" class="checkout-btn">Checkout</button>
//!     <button data-action="clear" class="clear-cart-btn">Clear Cart</button>
//!   </div>
//! </div>
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::page::Page;
use storefront_core::{CartSnapshot, LineItem, Money};

/// Shown in the panel when the cart has no items.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

// =============================================================================
// Actions
// =============================================================================

/// What a cart panel control asks the cart store to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum CartAction {
    SetQuantity { id: String, quantity: i64 },
    Remove { id: String },
    Checkout,
    Clear,
}

/// The per-row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Decrement,
    Increment,
    Remove,
}

/// A rendered button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartControl {
    pub kind: Option<ControlKind>,
    pub label: &'static str,
    pub action: CartAction,
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub controls: Vec<CartControl>,
}

impl CartRow {
    fn from_item(item: &LineItem) -> Self {
        let id = item.id.clone();
        let controls = vec![
            CartControl {
                kind: Some(ControlKind::Decrement),
                label: "-",
                action: CartAction::SetQuantity {
                    id: id.clone(),
                    quantity: item.quantity - 1,
                },
            },
            CartControl {
                kind: Some(ControlKind::Increment),
                label: "+",
                action: CartAction::SetQuantity {
                    id: id.clone(),
                    quantity: item.quantity + 1,
                },
            },
            CartControl {
                kind: Some(ControlKind::Remove),
                label: "×",
                action: CartAction::Remove { id: id.clone() },
            },
        ];

        CartRow {
            id,
            name: item.name.clone(),
            image: item.image.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            controls,
        }
    }

    fn control(&self, kind: ControlKind) -> Option<&CartControl> {
        self.controls.iter().find(|c| c.kind == Some(kind))
    }
}

// =============================================================================
// Cart View
// =============================================================================

/// Cart panel renderer. Keeps the last render for control lookups.
#[derive(Debug, Clone, Default)]
pub struct CartView {
    rows: Vec<CartRow>,
    footer: Vec<CartControl>,
    active: bool,
}

impl CartView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-renders the panel and the count badge.
    pub fn render(&mut self, snapshot: &CartSnapshot, page: &mut Page) {
        self.rows = snapshot.items.iter().map(CartRow::from_item).collect();
        self.footer = if snapshot.is_empty() {
            Vec::new()
        } else {
            vec![
                CartControl {
                    kind: None,
                    label: "Checkout",
                    action: CartAction::Checkout,
                },
                CartControl {
                    kind: None,
                    label: "Clear Cart",
                    action: CartAction::Clear,
                },
            ]
        };

        page.cart_panel.html = self.html(snapshot.total);
        page.cart_panel.active = self.active;
        page.cart_count = snapshot.count;
    }

    /// Flips panel visibility. Returns the new state.
    pub fn toggle(&mut self, page: &mut Page) -> bool {
        self.active = !self.active;
        page.cart_panel.active = self.active;
        self.active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    /// The action behind a row control, if that row is rendered.
    pub fn action_for(&self, product_id: &str, kind: ControlKind) -> Option<CartAction> {
        self.rows
            .iter()
            .find(|row| row.id == product_id)
            .and_then(|row| row.control(kind))
            .map(|control| control.action.clone())
    }

    fn html(&self, total: Money) -> String {
        if self.rows.is_empty() {
            return format!("<p>{}</p>", EMPTY_CART_MESSAGE);
        }

        let mut html = String::from("<div class=\"cart-items\">\n");
        for row in &self.rows {
            let name = escape_html(&row.name);
            let _ = write!(
                html,
                concat!(
                    "  <div class=\"cart-item\" data-product-id=\"{id}\">\n",
                    "    <img src=\"{image}\" alt=\"{name}\">\n",
                    "    <div class=\"cart-item-details\">\n",
                    "      <h4>{name}</h4>\n",
                    "      <p>{price} x {quantity}</p>\n",
                    "      <div class=\"cart-item-controls\">\n",
                ),
                id = escape_html(&row.id),
                image = escape_html(&row.image),
                name = name,
                price = row.unit_price,
                quantity = row.quantity,
            );
            for control in &row.controls {
                if control.kind == Some(ControlKind::Increment) {
                    let _ = writeln!(html, "        <span>{}</span>", row.quantity);
                }
                let _ = writeln!(html, "        {}", button(control));
            }
            html.push_str("      </div>\n    </div>\n  </div>\n");
        }

        let _ = writeln!(html, "  <div class=\"cart-total\">\n    <p>Total: {}</p>", total);
        for control in &self.footer {
            let _ = writeln!(html, "    {}", button(control));
        }
        html.push_str("  </div>\n</div>");
        html
    }
}

fn button(control: &CartControl) -> String {
    let class = match &control.action {
        CartAction::Remove { .. } => " class=\"remove-item\"",
        CartAction::Checkout => " class=\"checkout-btn\"",
        CartAction::Clear => " class=\"clear-cart-btn\"",
        CartAction::SetQuantity { .. } => "",
    };
    let data = match &control.action {
        CartAction::SetQuantity { quantity, .. } => {
            format!("data-action=\"set-quantity\" data-quantity=\"{}\"", quantity)
        }
        CartAction::Remove { .. } => "data-action=\"remove\"".to_string(),
        CartAction::Checkout => "data-action=\"checkout\"".to_string(),
        CartAction::Clear => "data-action=\"clear\"".to_string(),
    };
    format!("<button {}{}>{}</button>", data, class, control.label)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
