//! # Page Model
//!
//! A headless stand-in for the rendered storefront page. Components write
//! into it exactly where the browser version writes into the DOM.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  header:  [currency ▼]  [sort ▼]                        🛒 cart_count   │
//! │                                                                         │
//! │  slider:  ┌──────┬──────┬──────┐   transform: translateX(-100%)         │
//! │           │  0   │  1   │  2   │   dots:      ○ ● ○                     │
//! │           └──────┴──────┴──────┘                                        │
//! │                                                                         │
//! │  products:                                                              │
//! │   ┌─────────────────────┐                                               │
//! │   │ id / name / image   │   price: data-usd-price="29.99"               │
//! │   │ [Add to cart]       │          <currency> <amount> . <cents>        │
//! │   └─────────────────────┘                                               │
//! │                                                                         │
//! │  cart panel (toggle)       notifications       alerts / form errors     │
//! │  order summary (orders.html only)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use storefront_core::catalog::sort_by_base_price;
use storefront_core::{BasePrice, FormattedPrice, ProductCard, SortDirection, ValidationError};

/// Demo page used when no template is configured.
const BUILTIN_TEMPLATE: &str = include_str!("../../../demos/page.json");

/// Path fragment that identifies the order summary page.
pub const ORDER_SUMMARY_MARKER: &str = "orders.html";

// =============================================================================
// Page Kind
// =============================================================================

/// Which page is loaded, decided from the location path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Catalog,
    OrderSummary,
}

impl PageKind {
    pub fn from_path(path: &str) -> Self {
        if path.contains(ORDER_SUMMARY_MARKER) {
            PageKind::OrderSummary
        } else {
            PageKind::Catalog
        }
    }
}

// =============================================================================
// Price Element
// =============================================================================

/// A `.price` element: the immutable USD base value plus three child slots.
///
/// A slot set to `None` is absent from the markup and is never written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceElement {
    /// `data-usd-price`
    pub usd_price: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub cents: Option<String>,
}

impl PriceElement {
    /// An element with all three slots present and empty.
    pub fn new(usd_price: impl Into<String>) -> Self {
        PriceElement {
            usd_price: usd_price.into(),
            currency: Some(String::new()),
            amount: Some(String::new()),
            cents: Some(String::new()),
        }
    }

    pub fn base_price(&self) -> Result<BasePrice, ValidationError> {
        BasePrice::parse(&self.usd_price)
    }

    /// Writes symbol, integer part and fraction into the slots that exist.
    pub fn write(&mut self, price: &FormattedPrice) {
        if let Some(slot) = self.currency.as_mut() {
            slot.clone_from(&price.symbol);
        }
        if let Some(slot) = self.amount.as_mut() {
            slot.clone_from(&price.amount);
        }
        if let Some(slot) = self.cents.as_mut() {
            slot.clone_from(&price.cents);
        }
    }

    /// Visible text, e.g. `€18.00`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        if let Some(symbol) = &self.currency {
            text.push_str(symbol);
        }
        if let Some(amount) = &self.amount {
            text.push_str(amount);
        }
        if let Some(cents) = &self.cents {
            text.push('.');
            text.push_str(cents);
        }
        text
    }
}

// =============================================================================
// Product Card Element
// =============================================================================

/// A `.product-card` in the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardElement {
    /// `data-product-id`
    pub id: String,
    /// `<h3>` text
    pub name: String,
    /// `<img src>`
    pub image: String,
    pub price: PriceElement,
}

impl ProductCardElement {
    /// What the card's markup says about the product.
    pub fn card(&self) -> ProductCard {
        ProductCard {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            usd_price: self.price.usd_price.clone(),
        }
    }
}

// =============================================================================
// Template
// =============================================================================

/// The JSON page description the session is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    #[serde(default)]
    pub products: Vec<ProductCardElement>,
    /// Priced elements outside the product grid (banners, featured items).
    #[serde(default)]
    pub prices: Vec<PriceElement>,
    /// Slide image sources, in order.
    #[serde(default)]
    pub slides: Vec<String>,
}

impl PageTemplate {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let template: PageTemplate = serde_json::from_str(json)?;

        let mut seen = std::collections::HashSet::new();
        for product in &template.products {
            if !seen.insert(product.id.as_str()) {
                warn!(product_id = %product.id, "Duplicate product id in page template");
            }
        }

        debug!(
            products = template.products.len(),
            prices = template.prices.len(),
            slides = template.slides.len(),
            "Page template parsed"
        );
        Ok(template)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::Template(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// The demo page bundled with the binary.
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_TEMPLATE)
    }
}

// =============================================================================
// Page
// =============================================================================

/// Slider track offset and indicator highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliderView {
    pub transform: String,
    pub dots: Vec<bool>,
}

/// `#cart-status` contents and its `active` class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartPanel {
    pub html: String,
    pub active: bool,
}

/// Order summary block on `orders.html`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSummaryView {
    pub lines: Vec<String>,
    pub total: String,
}

/// The loaded page.
#[derive(Debug, Clone)]
pub struct Page {
    path: String,
    kind: PageKind,
    /// Value of the currency `<select>`.
    pub currency_select: String,
    /// Value of the sort `<select>`.
    pub sort_select: SortDirection,
    pub products: Vec<ProductCardElement>,
    pub prices: Vec<PriceElement>,
    pub slides: Vec<String>,
    pub slider: SliderView,
    /// `#cart-count` text.
    pub cart_count: i64,
    pub cart_panel: CartPanel,
    /// `alert()` calls, oldest first.
    pub alerts: Vec<String>,
    /// Order form messages from the last submission.
    pub form_errors: Vec<String>,
    pub order_summary: Option<OrderSummaryView>,
}

impl Page {
    pub fn new(path: impl Into<String>, template: PageTemplate) -> Self {
        let path = path.into();
        let kind = PageKind::from_path(&path);

        Page {
            path,
            kind,
            currency_select: String::new(),
            sort_select: SortDirection::default(),
            products: template.products,
            prices: template.prices,
            slides: template.slides,
            slider: SliderView::default(),
            cart_count: 0,
            cart_panel: CartPanel::default(),
            alerts: Vec::new(),
            form_errors: Vec::new(),
            order_summary: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Every `.price` element on the page, product cards first.
    pub fn price_elements_mut(&mut self) -> impl Iterator<Item = &mut PriceElement> {
        self.products
            .iter_mut()
            .map(|p| &mut p.price)
            .chain(self.prices.iter_mut())
    }

    pub fn price_elements(&self) -> impl Iterator<Item = &PriceElement> {
        self.products
            .iter()
            .map(|p| &p.price)
            .chain(self.prices.iter())
    }

    pub fn product(&self, id: &str) -> Option<&ProductCardElement> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Reorders the product grid by base price and updates the sort control.
    pub fn sort_products(&mut self, direction: SortDirection) {
        sort_by_base_price(&mut self.products, direction, |p| {
            p.price.base_price().ok()
        });
        self.sort_select = direction;
    }

    /// Plain-text rendering for the terminal.
    pub fn render(&self, notifications: &[&str]) -> String {
        let mut out = String::new();
        let kind = match self.kind {
            PageKind::Catalog => "catalog",
            PageKind::OrderSummary => "order summary",
        };

        // Writing into a String cannot fail.
        let _ = writeln!(out, "== {} ({}) ==", self.path, kind);
        let _ = writeln!(
            out,
            "currency: {}  sort: {}  cart: {} [{}]",
            self.currency_select,
            self.sort_select,
            self.cart_count,
            if self.cart_panel.active { "open" } else { "closed" }
        );

        if !self.slider.dots.is_empty() {
            let dots: String = self
                .slider
                .dots
                .iter()
                .map(|&on| if on { '●' } else { '○' })
                .collect();
            let _ = writeln!(out, "slider: {}  {}", self.slider.transform, dots);
        }

        if !self.products.is_empty() {
            let _ = writeln!(out, "products:");
            for product in &self.products {
                let _ = writeln!(
                    out,
                    "  {:<8} {:<28} {}",
                    product.id,
                    product.name,
                    product.price.text()
                );
            }
        }

        if !self.prices.is_empty() {
            let texts: Vec<String> = self.prices.iter().map(PriceElement::text).collect();
            let _ = writeln!(out, "prices: {}", texts.join("  "));
        }

        if self.cart_panel.active {
            let _ = writeln!(out, "cart panel:");
            for line in self.cart_panel.html.lines().filter(|l| !l.trim().is_empty()) {
                let _ = writeln!(out, "  {}", line.trim_end());
            }
        }

        if let Some(summary) = &self.order_summary {
            let _ = writeln!(out, "order summary:");
            for line in &summary.lines {
                let _ = writeln!(out, "  {}", line);
            }
            let _ = writeln!(out, "  Total: {}", summary.total);
        }

        for message in notifications {
            let _ = writeln!(out, "[notification] {}", message);
        }
        for alert in &self.alerts {
            let _ = writeln!(out, "[alert] {}", alert);
        }
        for error in &self.form_errors {
            let _ = writeln!(out, "[form] {}", error);
        }

        out
    }
}
