//! # Currency Display
//!
//! Projects every price on the page from its USD base value into the
//! selected currency. Base values are never modified.
//!
//! ## Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  currency selector "EUR"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse ── unknown? ──► warn!, display untouched                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each .price:                                                       │
//! │     data-usd-price "20.00" ──► × 0.95 ──► "19" / "00"                  │
//! │     write symbol / amount / cents into the slots that exist            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  orders.html? ──► re-render the order summary                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist preferredCurrency                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::page::{OrderSummaryView, Page, PageKind};
use storefront_core::{BasePrice, CartSnapshot, CurrencyCode, FormattedPrice, RateTable};
use storefront_storage::PreferenceRepository;

/// Owns the selected currency and the rate table.
#[derive(Debug, Clone)]
pub struct CurrencyDisplay {
    rates: RateTable,
    selected: CurrencyCode,
    preferences: PreferenceRepository,
}

impl CurrencyDisplay {
    /// Creates a display showing USD.
    pub fn new(rates: RateTable, preferences: PreferenceRepository) -> Self {
        CurrencyDisplay {
            rates,
            selected: CurrencyCode::default(),
            preferences,
        }
    }

    /// Selects the persisted currency (USD when unset or unreadable).
    pub async fn load_preference(&mut self) -> CurrencyCode {
        self.selected = match self.preferences.preferred_currency().await {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "Failed to read currency preference, using USD");
                CurrencyCode::default()
            }
        };
        info!(currency = %self.selected, "Currency preference loaded");
        self.selected
    }

    pub fn selected(&self) -> CurrencyCode {
        self.selected
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Formats a USD amount in the selected currency.
    pub fn format(&self, base: impl Into<BasePrice>) -> FormattedPrice {
        self.rates.format(base, self.selected)
    }

    /// Handles a currency selector change.
    ///
    /// Unknown codes are logged and leave everything as it was. Returns the
    /// newly selected currency otherwise.
    pub async fn select(
        &mut self,
        code: &str,
        page: &mut Page,
        cart: &CartSnapshot,
    ) -> Option<CurrencyCode> {
        let code: CurrencyCode = match code.parse() {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "Ignoring currency selection");
                return None;
            }
        };

        self.selected = code;
        self.refresh(page, cart);

        if let Err(e) = self.preferences.set_preferred_currency(code).await {
            warn!(error = %e, "Failed to persist currency preference");
        }

        info!(currency = %code, "Currency changed");
        Some(code)
    }

    /// Rewrites every price element, and the order summary on `orders.html`.
    pub fn refresh(&self, page: &mut Page, cart: &CartSnapshot) {
        self.update_prices(page);
        if page.kind() == PageKind::OrderSummary {
            self.render_order_summary(page, cart);
        }
    }

    /// Rewrites every price element from its base value.
    pub fn update_prices(&self, page: &mut Page) {
        let mut updated = 0usize;
        for element in page.price_elements_mut() {
            match element.base_price() {
                Ok(base) => {
                    element.write(&self.format(base));
                    updated += 1;
                }
                Err(e) => {
                    debug!(usd_price = %element.usd_price, error = %e, "Skipping unpriced element");
                }
            }
        }

        page.currency_select = self.selected.as_str().to_string();
        debug!(currency = %self.selected, updated, "Prices updated");
    }

    /// Renders the cart as an order summary in the selected currency.
    pub fn render_order_summary(&self, page: &mut Page, cart: &CartSnapshot) {
        let lines = cart
            .items
            .iter()
            .map(|item| {
                format!(
                    "{} x {}  {}",
                    item.name,
                    item.quantity,
                    self.format(item.line_total())
                )
            })
            .collect();

        page.order_summary = Some(OrderSummaryView {
            lines,
            total: self.format(cart.total).to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageTemplate, PriceElement, ProductCardElement};
    use storefront_core::{Cart, ExchangeRate, LineItem, Money};
    use storefront_storage::{Storage, StorageConfig, PREFERRED_CURRENCY_KEY};

    async fn storage() -> Storage {
        Storage::new(StorageConfig::in_memory()).await.unwrap()
    }

    fn page(path: &str, prices: &[&str]) -> Page {
        let products = prices
            .iter()
            .enumerate()
            .map(|(i, price)| ProductCardElement {
                id: format!("p{}", i + 1),
                name: format!("Product {}", i + 1),
                image: "/img.jpg".to_string(),
                price: PriceElement::new(*price),
            })
            .collect();
        Page::new(
            path,
            PageTemplate {
                products,
                ..Default::default()
            },
        )
    }

    fn eur_at_0_9() -> RateTable {
        RateTable::new()
            .with_rate(CurrencyCode::Eur, ExchangeRate::from_micros(900_000))
            .unwrap()
    }

    #[tokio::test]
    async fn test_select_eur_rewrites_slots() {
        let storage = storage().await;
        let mut display = CurrencyDisplay::new(eur_at_0_9(), storage.preferences());
        let mut page = page("/index.html", &["20.00"]);

        let selected = display.select("EUR", &mut page, &Cart::new().snapshot()).await;

        assert_eq!(selected, Some(CurrencyCode::Eur));
        let price = &page.products[0].price;
        assert_eq!(price.currency.as_deref(), Some("€"));
        assert_eq!(price.amount.as_deref(), Some("18"));
        assert_eq!(price.cents.as_deref(), Some("00"));
        assert_eq!(price.usd_price, "20.00");
        assert_eq!(page.currency_select, "EUR");
    }

    #[tokio::test]
    async fn test_unknown_code_leaves_display_unchanged() {
        let storage = storage().await;
        let mut display = CurrencyDisplay::new(eur_at_0_9(), storage.preferences());
        let mut page = page("/index.html", &["20.00"]);
        let cart = Cart::new().snapshot();

        display.select("EUR", &mut page, &cart).await;
        let before = page.products.clone();

        assert_eq!(display.select("XYZ", &mut page, &cart).await, None);
        assert_eq!(page.products, before);
        assert_eq!(display.selected(), CurrencyCode::Eur);
        assert_eq!(
            storage.preferences().preferred_currency().await.unwrap(),
            CurrencyCode::Eur
        );
    }

    #[tokio::test]
    async fn test_usd_reproduces_base_price_with_grouping() {
        let storage = storage().await;
        let mut display = CurrencyDisplay::new(RateTable::standard(), storage.preferences());
        let mut page = page("/index.html", &["1234.5", "not-a-price"]);

        display.select("usd", &mut page, &Cart::new().snapshot()).await;

        assert_eq!(page.products[0].price.text(), "$1,234.50");
        // unparsable base values are skipped
        assert_eq!(page.products[1].price.text(), ".");
    }

    #[tokio::test]
    async fn test_sub_cent_base_price_rounds_after_conversion() {
        let storage = storage().await;
        let mut display = CurrencyDisplay::new(RateTable::standard(), storage.preferences());
        let mut page = page("/index.html", &["1.005"]);

        display.select("ETB", &mut page, &Cart::new().snapshot()).await;
        assert_eq!(page.products[0].price.text(), "Br121.05");

        display.select("USD", &mut page, &Cart::new().snapshot()).await;
        assert_eq!(page.products[0].price.text(), "$1.01");
    }

    #[tokio::test]
    async fn test_preference_roundtrip_through_storage() {
        let storage = storage().await;
        let mut page = page("/index.html", &["10"]);

        let mut display = CurrencyDisplay::new(RateTable::standard(), storage.preferences());
        display.select("ETB", &mut page, &Cart::new().snapshot()).await;
        assert_eq!(
            storage
                .local()
                .get_item(PREFERRED_CURRENCY_KEY)
                .await
                .unwrap()
                .as_deref(),
            Some("ETB")
        );

        let mut reloaded = CurrencyDisplay::new(RateTable::standard(), storage.preferences());
        assert_eq!(reloaded.load_preference().await, CurrencyCode::Etb);
    }

    #[tokio::test]
    async fn test_order_summary_refreshes_on_orders_page() {
        let storage = storage().await;
        let mut display = CurrencyDisplay::new(eur_at_0_9(), storage.preferences());
        let mut cart = Cart::new();
        cart.add_item(
            LineItem::new("p1", "Canvas Tote", Money::from_cents(2000), "/t.jpg")
                .unwrap()
                .with_quantity(2)
                .unwrap(),
        );

        let mut catalog = page("/index.html", &[]);
        display.select("EUR", &mut catalog, &cart.snapshot()).await;
        assert!(catalog.order_summary.is_none());

        let mut orders = page("/checkout/orders.html", &[]);
        display.select("EUR", &mut orders, &cart.snapshot()).await;
        let summary = orders.order_summary.unwrap();
        assert_eq!(summary.lines, vec!["Canvas Tote x 2  €36.00"]);
        assert_eq!(summary.total, "€36.00");
    }
}
