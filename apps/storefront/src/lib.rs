//! # Storefront Library
//!
//! Runtime for one storefront page: the cart, the currency display, the
//! hero carousel and transient notifications, driven by text commands.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & event loop)
//! ├── config.rs       ◄─── TOML + environment configuration
//! ├── error.rs        ◄─── App error type
//! ├── events.rs       ◄─── PageEvent and the command parser
//! ├── page.rs         ◄─── Headless page model and template
//! ├── session.rs      ◄─── Storefront session, event dispatch
//! ├── state/
//! │   ├── cart_store.rs      ◄─── Cart + persistence
//! │   ├── currency.rs        ◄─── Price projection
//! │   ├── carousel.rs        ◄─── Slider + autoplay task
//! │   └── notifications.rs   ◄─── Transient messages + timers
//! └── view/
//!     └── cart_view.rs       ◄─── Cart panel rendering
//! ```
//!
//! ## Event Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  stdin thread ───────┐                                                  │
//! │  (parse_line)        │                                                  │
//! │                      │                                                  │
//! │  autoplay task ──────┼──► mpsc<PageEvent> ──► Storefront::handle        │
//! │  (every 5s)          │     (bounded)           one event at a time      │
//! │                      │                                                  │
//! │  notification ───────┘                                                  │
//! │  timers (2s each)                                                       │
//! │                                                                         │
//! │  The page is printed after every event that came from stdin.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod page;
pub mod session;
pub mod state;
pub mod view;

use std::io::{BufRead, Write};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use error::AppResult;
use events::{parse_line, PageEvent};
use page::PageTemplate;
use session::{Storefront, EVENT_CHANNEL_CAPACITY};
use storefront_storage::{Storage, StorageConfig};

/// Runs the storefront until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize logging (stderr, RUST_LOG or default filter)             │
/// │  2. Load config: defaults → storefront.toml → STOREFRONT_* env          │
/// │  3. Open local storage, run migrations                                  │
/// │  4. Load the page template (file or built-in demo)                      │
/// │  5. Open the session: restore preferences, render, start autoplay       │
/// │  6. Start the stdin reader, run the event loop                          │
/// │  7. Stop timers, close storage                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting storefront");

    let config = StorefrontConfig::load(None)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

/// Opens storage and the session, then runs the event loop.
async fn serve(config: StorefrontConfig) -> AppResult<()> {
    let storage_path = config.storage_path()?;
    info!(?storage_path, "Storage path determined");
    let storage = Storage::new(StorageConfig::new(storage_path)).await?;

    let template = match &config.page.template {
        Some(path) => PageTemplate::load(path)?,
        None => PageTemplate::builtin()?,
    };

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let mut session = Storefront::open(&config, &storage, template, tx.clone()).await;
    print_page(&session);

    spawn_stdin_reader(tx);

    session.run(rx, print_page).await;

    storage.close().await;
    info!("Storefront stopped");
    Ok(())
}

/// Reads commands from stdin on a dedicated thread.
///
/// Blocking reads live outside the runtime so shutdown never waits on a
/// pending line. End of input sends `Quit`.
fn spawn_stdin_reader(events: mpsc::Sender<PageEvent>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            };

            match parse_line(&line) {
                Ok(parsed) => {
                    for event in parsed {
                        if events.blocking_send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Ignoring command"),
            }
        }

        debug!("Input closed");
        let _ = events.blocking_send(PageEvent::Quit);
    });
}

fn print_page(session: &Storefront) {
    let mut out = std::io::stdout().lock();
    if let Err(e) = writeln!(out, "{}", session.render()) {
        warn!(error = %e, "Failed to write page");
    }
}

/// Initializes the tracing subscriber. Logs go to stderr; stdout carries
/// the rendered page.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Trace for the storefront crates only
/// - Default: `info,storefront=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
