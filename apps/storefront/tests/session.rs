//! Drives a whole storefront session through page events, against the
//! built-in demo page and in-memory storage.

use std::time::Duration;

use tokio::sync::mpsc;

use storefront_core::{CurrencyCode, SortDirection, MAX_ITEM_QUANTITY};
use storefront_lib::config::StorefrontConfig;
use storefront_lib::events::{parse_line, CarouselInput, PageEvent};
use storefront_lib::page::PageTemplate;
use storefront_lib::session::{Flow, Storefront};
use storefront_lib::state::cart_store::{CART_CLEARED, CHECKOUT_PLACEHOLDER, ITEM_ADDED, ITEM_REMOVED};
use storefront_lib::view::{CartAction, ControlKind, EMPTY_CART_MESSAGE};
use storefront_storage::{Storage, StorageConfig, CART_KEY, PREFERRED_SORT_KEY};

struct Harness {
    storage: Storage,
    session: Storefront,
    events: mpsc::Receiver<PageEvent>,
}

fn config(page_path: &str) -> StorefrontConfig {
    let mut config = StorefrontConfig::default();
    config.page.path = page_path.to_string();
    // long enough that autoplay never fires during a test
    config.carousel.autoplay_ms = 60_000;
    config.notifications.duration_ms = 50;
    config
}

async fn open_with(storage: Storage, config: &StorefrontConfig) -> Harness {
    let (tx, rx) = mpsc::channel(64);
    let template = PageTemplate::builtin().unwrap();
    let session = Storefront::open(config, &storage, template, tx).await;
    Harness {
        storage,
        session,
        events: rx,
    }
}

async fn open(page_path: &str) -> Harness {
    let storage = Storage::new(StorageConfig::in_memory()).await.unwrap();
    open_with(storage, &config(page_path)).await
}

async fn send(harness: &mut Harness, line: &str) {
    for event in parse_line(line).unwrap() {
        assert_eq!(harness.session.handle(event).await, Flow::Continue);
    }
}

fn product_price(session: &Storefront, id: &str) -> String {
    session.page().product(id).unwrap().price.text()
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_add_update_remove() {
    let mut h = open("/index.html").await;
    assert_eq!(h.session.page().cart_count, 0);
    assert!(h.session.page().cart_panel.html.contains(EMPTY_CART_MESSAGE));

    send(&mut h, "add tote-01").await;
    send(&mut h, "add tote-01").await;

    let snapshot = h.session.cart().snapshot();
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.count, 2);
    assert_eq!(snapshot.total.cents(), 4800);
    assert_eq!(h.session.page().cart_count, 2);
    assert!(h.session.page().cart_panel.html.contains("Total: $48.00"));
    assert_eq!(h.session.notifications().messages(), vec![ITEM_ADDED, ITEM_ADDED]);

    send(&mut h, "qty tote-01 5").await;
    assert_eq!(h.session.cart().snapshot().count, 5);
    assert_eq!(h.session.cart().snapshot().total.cents(), 12000);

    send(&mut h, "remove tote-01").await;
    let snapshot = h.session.cart().snapshot();
    assert!(snapshot.is_empty());
    assert!(snapshot.total.is_zero());
    assert_eq!(h.session.page().cart_count, 0);
    assert_eq!(h.session.notifications().messages().last(), Some(&ITEM_REMOVED));
}

#[tokio::test]
async fn test_cart_controls_follow_rendered_rows() {
    let mut h = open("/index.html").await;
    send(&mut h, "add mug-02").await;

    send(&mut h, "inc mug-02").await;
    send(&mut h, "inc mug-02").await;
    assert_eq!(h.session.cart().snapshot().count, 3);

    send(&mut h, "dec mug-02").await;
    assert_eq!(h.session.cart().snapshot().count, 2);

    // decrementing past one removes the line
    send(&mut h, "dec mug-02").await;
    send(&mut h, "dec mug-02").await;
    assert!(h.session.cart().snapshot().is_empty());

    // no row, no control
    send(&mut h, "inc mug-02").await;
    assert!(h.session.cart().snapshot().is_empty());
    assert!(h.session.cart_view().rows().is_empty());
}

#[tokio::test]
async fn test_huge_quantity_is_capped() {
    let mut h = open("/index.html").await;
    send(&mut h, "add tote-01").await;

    send(&mut h, "qty tote-01 10000000000000000").await;
    let snapshot = h.session.cart().snapshot();
    assert_eq!(snapshot.count, MAX_ITEM_QUANTITY);
    assert_eq!(snapshot.total.cents(), 2400 * MAX_ITEM_QUANTITY);
    assert_eq!(h.session.page().cart_count, MAX_ITEM_QUANTITY);

    // further increments stay at the cap
    send(&mut h, "inc tote-01").await;
    send(&mut h, "add tote-01").await;
    assert_eq!(h.session.cart().snapshot().count, MAX_ITEM_QUANTITY);
}

#[tokio::test]
async fn test_unknown_product_is_ignored() {
    let mut h = open("/index.html").await;
    send(&mut h, "add no-such-product").await;

    assert!(h.session.cart().snapshot().is_empty());
    assert!(h.session.notifications().messages().is_empty());
}

#[tokio::test]
async fn test_clear_and_checkout() {
    let mut h = open("/index.html").await;
    send(&mut h, "add tote-01").await;
    send(&mut h, "add lamp-03").await;

    h.session
        .handle(PageEvent::Cart(CartAction::Checkout))
        .await;
    assert_eq!(h.session.page().alerts, vec![CHECKOUT_PLACEHOLDER]);
    assert_eq!(h.session.cart().snapshot().count, 2);

    send(&mut h, "clear").await;
    assert!(h.session.cart().snapshot().is_empty());
    assert_eq!(h.session.notifications().messages().last(), Some(&CART_CLEARED));
    assert!(h.storage.preferences().load_cart().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_cart_panel() {
    let mut h = open("/index.html").await;
    assert!(!h.session.page().cart_panel.active);

    send(&mut h, "cart").await;
    assert!(h.session.page().cart_panel.active);
    assert!(h.session.cart_view().is_active());

    // re-rendering keeps the panel open
    send(&mut h, "add tote-01").await;
    assert!(h.session.page().cart_panel.active);

    send(&mut h, "toggle").await;
    assert!(!h.session.page().cart_panel.active);
}

#[tokio::test]
async fn test_cart_persists_and_restores_when_enabled() {
    let mut h = open("/index.html").await;
    send(&mut h, "add tote-01").await;
    send(&mut h, "qty tote-01 3").await;
    assert!(h
        .storage
        .local()
        .get_item(CART_KEY)
        .await
        .unwrap()
        .is_some());

    let storage = h.storage.clone();
    drop(h);

    let mut restoring = config("/index.html");
    restoring.cart.restore_on_start = true;
    let h = open_with(storage, &restoring).await;
    assert_eq!(h.session.cart().snapshot().count, 3);
    assert_eq!(h.session.page().cart_count, 3);

    let storage = h.storage.clone();
    drop(h);

    // default: fresh cart, stale entry erased
    let h = open_with(storage, &config("/index.html")).await;
    assert!(h.session.cart().snapshot().is_empty());
    assert_eq!(h.storage.local().get_item(CART_KEY).await.unwrap(), None);
}

// =============================================================================
// Currency
// =============================================================================

#[tokio::test]
async fn test_currency_selection_rewrites_every_price() {
    let mut h = open("/index.html").await;
    assert_eq!(product_price(&h.session, "tote-01"), "$24.00");
    assert_eq!(product_price(&h.session, "rug-04"), "$1,249.00");
    assert_eq!(h.session.page().prices[0].text(), "$19.99");

    send(&mut h, "currency EUR").await;
    assert_eq!(product_price(&h.session, "tote-01"), "€22.80");
    assert_eq!(h.session.page().currency_select, "EUR");

    send(&mut h, "currency ETB").await;
    assert_eq!(product_price(&h.session, "tote-01"), "Br2,890.80");

    // base values are untouched, so switching back is exact
    send(&mut h, "currency USD").await;
    assert_eq!(product_price(&h.session, "tote-01"), "$24.00");
}

#[tokio::test]
async fn test_unknown_currency_changes_nothing() {
    let mut h = open("/index.html").await;
    send(&mut h, "currency EUR").await;
    let before = h.session.page().products.clone();

    send(&mut h, "currency XYZ").await;

    assert_eq!(h.session.page().products, before);
    assert_eq!(h.session.currency().selected(), CurrencyCode::Eur);
}

#[tokio::test]
async fn test_currency_preference_survives_reload() {
    let mut h = open("/index.html").await;
    send(&mut h, "currency EUR").await;

    let storage = h.storage.clone();
    drop(h);

    let h = open_with(storage, &config("/index.html")).await;
    assert_eq!(h.session.currency().selected(), CurrencyCode::Eur);
    assert_eq!(product_price(&h.session, "tote-01"), "€22.80");
}

// =============================================================================
// Sorting
// =============================================================================

#[tokio::test]
async fn test_sort_orders_grid_and_persists() {
    let mut h = open("/index.html").await;
    let ids = |s: &Storefront| -> Vec<String> {
        s.page().products.iter().map(|p| p.id.clone()).collect()
    };
    assert_eq!(
        ids(&h.session),
        vec!["mug-02", "tote-01", "scarf-05", "lamp-03", "rug-04"]
    );

    send(&mut h, "sort desc").await;
    assert_eq!(
        ids(&h.session),
        vec!["rug-04", "lamp-03", "scarf-05", "tote-01", "mug-02"]
    );
    assert_eq!(
        h.storage
            .local()
            .get_item(PREFERRED_SORT_KEY)
            .await
            .unwrap()
            .as_deref(),
        Some("desc")
    );

    send(&mut h, "sort sideways").await;
    assert_eq!(h.session.page().sort_select, SortDirection::Desc);

    let storage = h.storage.clone();
    drop(h);
    let h = open_with(storage, &config("/index.html")).await;
    assert_eq!(h.session.page().products[0].id, "rug-04");
}

// =============================================================================
// Carousel
// =============================================================================

#[tokio::test]
async fn test_carousel_navigation() {
    let mut h = open("/index.html").await;
    assert_eq!(h.session.carousel().slide_count(), 3);
    assert_eq!(h.session.page().slider.transform, "translateX(-0%)");
    assert!(h.session.carousel().is_autoplaying());

    send(&mut h, "prev").await;
    assert_eq!(h.session.carousel().current(), 2);
    send(&mut h, "next").await;
    assert_eq!(h.session.carousel().current(), 0);

    send(&mut h, "dot 1").await;
    assert_eq!(h.session.page().slider.transform, "translateX(-100%)");
    assert_eq!(h.session.page().slider.dots, vec![false, true, false]);

    h.session.handle(PageEvent::AutoplayTick).await;
    assert_eq!(h.session.carousel().current(), 2);
}

#[tokio::test]
async fn test_carousel_swipes() {
    let mut h = open("/index.html").await;

    send(&mut h, "swipe 300 240").await;
    assert_eq!(h.session.carousel().current(), 1);

    send(&mut h, "swipe 240 300").await;
    assert_eq!(h.session.carousel().current(), 0);

    // under the threshold
    send(&mut h, "swipe 300 270").await;
    assert_eq!(h.session.carousel().current(), 0);

    h.session
        .handle(PageEvent::Carousel(CarouselInput::GoTo(9)))
        .await;
    assert_eq!(h.session.carousel().current(), 0);
}

// =============================================================================
// Order Page
// =============================================================================

#[tokio::test]
async fn test_order_form_validation() {
    let mut h = open("/checkout/orders.html").await;

    send(&mut h, "order 1234 12/30").await;
    assert_eq!(h.session.page().form_errors, vec!["Invalid card number"]);
    assert!(h.session.page().alerts.is_empty());

    // card number is reported first when both are wrong
    send(&mut h, "order 1234 13/30").await;
    assert_eq!(h.session.page().form_errors, vec!["Invalid card number"]);

    send(&mut h, "order 1234567812345678 13/30").await;
    assert_eq!(h.session.page().form_errors, vec!["Invalid expiry date"]);
    assert!(h.session.page().alerts.is_empty());

    send(&mut h, "order 1234567812345678 12/30").await;
    assert!(h.session.page().form_errors.is_empty());
    assert_eq!(h.session.page().alerts, vec![CHECKOUT_PLACEHOLDER]);
}

#[tokio::test]
async fn test_order_summary_tracks_cart_and_currency() {
    let mut h = open("/checkout/orders.html").await;
    let summary = h.session.page().order_summary.clone().unwrap();
    assert!(summary.lines.is_empty());
    assert_eq!(summary.total, "$0.00");

    send(&mut h, "add tote-01").await;
    send(&mut h, "qty tote-01 2").await;
    let summary = h.session.page().order_summary.clone().unwrap();
    assert_eq!(summary.lines, vec!["Canvas Tote x 2  $48.00"]);

    send(&mut h, "currency EUR").await;
    let summary = h.session.page().order_summary.clone().unwrap();
    assert_eq!(summary.lines, vec!["Canvas Tote x 2  €45.60"]);
    assert_eq!(summary.total, "€45.60");

    let catalog = open("/index.html").await;
    assert!(catalog.session.page().order_summary.is_none());
}

// =============================================================================
// Notifications & Event Loop
// =============================================================================

#[tokio::test]
async fn test_notification_expires_through_the_event_channel() {
    let mut h = open("/index.html").await;
    send(&mut h, "add tote-01").await;
    assert_eq!(h.session.notifications().messages(), vec![ITEM_ADDED]);
    assert!(h.session.render().contains("[notification] Item added to cart"));

    let event = tokio::time::timeout(Duration::from_secs(5), h.events.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(event, PageEvent::DismissNotification(_)));
    assert!(!event.is_user_input());

    h.session.handle(event).await;
    assert!(h.session.notifications().messages().is_empty());
    assert_eq!(h.session.notifications().pending_timers(), 0);
}

#[tokio::test]
async fn test_run_stops_on_quit_and_renders_user_input_only() {
    let storage = Storage::new(StorageConfig::in_memory()).await.unwrap();
    let (tx, rx) = mpsc::channel(64);
    let mut session = Storefront::open(
        &config("/index.html"),
        &storage,
        PageTemplate::builtin().unwrap(),
        tx.clone(),
    )
    .await;

    tx.send(PageEvent::AddToCart {
        product_id: "scarf-05".to_string(),
    })
    .await
    .unwrap();
    tx.send(PageEvent::AutoplayTick).await.unwrap();
    tx.send(PageEvent::CartControl {
        product_id: "scarf-05".to_string(),
        control: ControlKind::Increment,
    })
    .await
    .unwrap();
    tx.send(PageEvent::Quit).await.unwrap();
    tx.send(PageEvent::Show).await.unwrap();

    let mut renders = Vec::new();
    session.run(rx, |s| renders.push(s.render())).await;

    assert_eq!(renders.len(), 2);
    assert_eq!(session.cart().snapshot().count, 2);
    assert_eq!(session.carousel().current(), 1);
    assert!(!session.carousel().is_autoplaying());
    assert_eq!(session.notifications().pending_timers(), 0);
}
