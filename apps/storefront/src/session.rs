//! # Storefront Session
//!
//! One loaded page and everything that acts on it. The session owns each
//! component outright; there is no global cart or carousel.
//!
//! ## Event Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PageEvent                       Owner               Re-rendered        │
//! │  ─────────                       ─────               ───────────        │
//! │  AddToCart / Cart / CartControl  CartStore           panel, badge,      │
//! │                                                      order summary      │
//! │  ToggleCart                      CartView            panel visibility   │
//! │  SelectCurrency                  CurrencyDisplay     prices, summary    │
//! │  SelectSort                      Page                product grid       │
//! │  Carousel / AutoplayTick         CarouselController  slider             │
//! │  SubmitOrder                     OrderForm           form errors/alert  │
//! │  DismissNotification             NotificationCenter  notifications      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each event runs to completion before the next one is received.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::StorefrontConfig;
use crate::events::PageEvent;
use crate::page::{Page, PageKind, PageTemplate};
use crate::state::{CarouselController, CartStore, CartUpdate, CurrencyDisplay, NotificationCenter};
use crate::view::{CartAction, CartView};
use storefront_core::validation::OrderForm;
use storefront_core::{RateTable, SortDirection};
use storefront_storage::{PreferenceRepository, Storage};

/// Capacity of the page event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Whether the loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A loaded storefront page with its components.
#[derive(Debug)]
pub struct Storefront {
    page: Page,
    cart: CartStore,
    cart_view: CartView,
    currency: CurrencyDisplay,
    carousel: CarouselController,
    notifications: NotificationCenter,
    preferences: PreferenceRepository,
}

impl Storefront {
    /// Loads the page: restores preferences, renders every component and
    /// starts autoplay. Timers post to `events`.
    pub async fn open(
        config: &StorefrontConfig,
        storage: &Storage,
        template: PageTemplate,
        events: mpsc::Sender<PageEvent>,
    ) -> Self {
        let preferences = storage.preferences();
        let mut page = Page::new(config.page.path.clone(), template);

        let cart = CartStore::open(preferences.clone(), config.cart.restore_on_start).await;

        let mut currency = CurrencyDisplay::new(RateTable::standard(), preferences.clone());
        currency.load_preference().await;

        let sort = match preferences.preferred_sort().await {
            Ok(direction) => direction,
            Err(e) => {
                warn!(error = %e, "Failed to read sort preference");
                SortDirection::default()
            }
        };
        page.sort_products(sort);

        let mut carousel =
            CarouselController::new(page.slides.len(), config.carousel.swipe_threshold_px);
        carousel.start_autoplay(config.autoplay_interval(), events.clone());

        let notifications = NotificationCenter::new(config.notification_duration(), events);

        let mut session = Storefront {
            page,
            cart,
            cart_view: CartView::new(),
            currency,
            carousel,
            notifications,
            preferences,
        };
        session.render_all();

        info!(
            path = %session.page.path(),
            products = session.page.products.len(),
            slides = session.carousel.slide_count(),
            currency = %session.currency.selected(),
            "Storefront page loaded"
        );
        session
    }

    // =========================================================================
    // Event Dispatch
    // =========================================================================

    /// Handles one event to completion.
    pub async fn handle(&mut self, event: PageEvent) -> Flow {
        debug!(?event, "Handling page event");

        match event {
            PageEvent::AddToCart { product_id } => self.add_to_cart(&product_id).await,

            PageEvent::CartControl {
                product_id,
                control,
            } => match self.cart_view.action_for(&product_id, control) {
                Some(action) => self.cart_action(action).await,
                None => debug!(product_id = %product_id, ?control, "No such control rendered"),
            },

            PageEvent::Cart(action) => self.cart_action(action).await,

            PageEvent::ToggleCart => {
                let open = self.cart_view.toggle(&mut self.page);
                debug!(open, "Cart panel toggled");
            }

            PageEvent::SelectCurrency(code) => {
                let snapshot = self.cart.snapshot();
                self.currency.select(&code, &mut self.page, &snapshot).await;
            }

            PageEvent::SelectSort(value) => self.select_sort(&value).await,

            PageEvent::Carousel(input) => {
                self.carousel.handle(input);
                self.carousel.render(&mut self.page);
            }

            PageEvent::AutoplayTick => {
                self.carousel.tick();
                self.carousel.render(&mut self.page);
            }

            PageEvent::SubmitOrder {
                card_number,
                expiry,
            } => self.submit_order(card_number, expiry),

            PageEvent::DismissNotification(id) => {
                self.notifications.dismiss(id);
            }

            PageEvent::Show => {}

            PageEvent::Quit => return Flow::Quit,
        }

        Flow::Continue
    }

    async fn add_to_cart(&mut self, product_id: &str) {
        let Some(product) = self.page.product(product_id) else {
            warn!(product_id = %product_id, "No product card with this id");
            return;
        };

        match product.card().to_line_item() {
            Ok(item) => {
                let update = self.cart.add_item(item).await;
                self.apply(update);
            }
            Err(e) => warn!(product_id = %product_id, error = %e, "Product card is not addable"),
        }
    }

    async fn cart_action(&mut self, action: CartAction) {
        let update = match action {
            CartAction::SetQuantity { id, quantity } => {
                self.cart.update_quantity(&id, quantity).await
            }
            CartAction::Remove { id } => self.cart.remove_item(&id).await,
            CartAction::Clear => self.cart.clear_cart().await,
            CartAction::Checkout => {
                let alert = self.cart.checkout();
                self.page.alerts.push(alert.to_string());
                return;
            }
        };
        self.apply(update);
    }

    /// Re-renders after a cart mutation and shows its notice.
    fn apply(&mut self, update: CartUpdate) {
        self.cart_view.render(&update.snapshot, &mut self.page);
        if self.page.kind() == PageKind::OrderSummary {
            self.currency.render_order_summary(&mut self.page, &update.snapshot);
        }
        if let Some(notice) = update.notice {
            self.notifications.show(notice);
        }
    }

    async fn select_sort(&mut self, value: &str) {
        let direction: SortDirection = match value.parse() {
            Ok(direction) => direction,
            Err(e) => {
                warn!(error = %e, "Ignoring sort selection");
                return;
            }
        };

        self.page.sort_products(direction);
        if let Err(e) = self.preferences.set_preferred_sort(direction).await {
            warn!(error = %e, "Failed to persist sort preference");
        }
        debug!(%direction, "Products sorted");
    }

    fn submit_order(&mut self, card_number: String, expiry: String) {
        let form = OrderForm {
            card_number,
            expiry,
        };

        match form.validate() {
            Ok(()) => {
                self.page.form_errors.clear();
                let alert = self.cart.checkout();
                self.page.alerts.push(alert.to_string());
            }
            Err(e) => {
                debug!(error = %e, "Order form rejected");
                self.page.form_errors = vec![e.to_string()];
            }
        }
    }

    fn render_all(&mut self) {
        let snapshot = self.cart.snapshot();
        self.cart_view.render(&snapshot, &mut self.page);
        self.currency.refresh(&mut self.page, &snapshot);
        self.carousel.render(&mut self.page);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_view(&self) -> &CartView {
        &self.cart_view
    }

    pub fn currency(&self) -> &CurrencyDisplay {
        &self.currency
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// The page as text, notifications included.
    pub fn render(&self) -> String {
        self.page.render(&self.notifications.messages())
    }

    /// Stops autoplay and cancels pending notification timers.
    pub fn close(&mut self) {
        self.carousel.stop_autoplay();
        self.notifications.clear();
        info!("Storefront page closed");
    }

    // =========================================================================
    // Event Loop
    // =========================================================================

    /// Receives events until `Quit` or until every sender is gone.
    ///
    /// `on_input` runs after each event that came from a person, with the
    /// session in its new state.
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<PageEvent>,
        mut on_input: impl FnMut(&Storefront),
    ) {
        while let Some(event) = events.recv().await {
            let user_input = event.is_user_input();
            if self.handle(event).await == Flow::Quit {
                break;
            }
            if user_input {
                on_input(self);
            }
        }
        self.close();
    }
}
