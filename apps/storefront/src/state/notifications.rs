//! # Notification Center
//!
//! Transient "Item added to cart" style messages.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  show("Item added to cart")                                            │
//! │       │                                                                 │
//! │       ├──► active: [.., Notification { id, message }]                   │
//! │       │                                                                 │
//! │       └──► spawn timer ── sleep(2000 ms) ──► PageEvent::Dismiss(id)     │
//! │                                                   │                     │
//! │  dismiss(id) ◄────────── event loop ◄─────────────┘                     │
//! │       └──► removed from active, timer handle released                  │
//! │                                                                         │
//! │  Each notification has its own timer, so a burst of cart operations   │
//! │  shows overlapping messages that expire independently. Dropping the    │
//! │  center aborts every pending timer.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::events::PageEvent;

/// A message currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub shown_at: DateTime<Utc>,
}

/// Owns the visible notifications and their expiry timers.
#[derive(Debug)]
pub struct NotificationCenter {
    duration: Duration,
    events: mpsc::Sender<PageEvent>,
    active: Vec<Notification>,
    timers: HashMap<Uuid, JoinHandle<()>>,
}

impl NotificationCenter {
    /// Creates a center whose timers post expiries to `events`.
    pub fn new(duration: Duration, events: mpsc::Sender<PageEvent>) -> Self {
        NotificationCenter {
            duration,
            events,
            active: Vec::new(),
            timers: HashMap::new(),
        }
    }

    /// Shows a message and schedules its removal. Must run inside a tokio
    /// runtime.
    pub fn show(&mut self, message: impl Into<String>) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.into(),
            shown_at: Utc::now(),
        };
        let id = notification.id;
        debug!(%id, message = %notification.message, "Showing notification");

        let events = self.events.clone();
        let duration = self.duration;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            // The loop may already be gone on shutdown.
            if events.send(PageEvent::DismissNotification(id)).await.is_err() {
                trace!(%id, "Event loop closed before notification expired");
            }
        });

        self.active.push(notification);
        self.timers.insert(id, timer);
        id
    }

    /// Removes a notification. Returns whether it was showing.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        if let Some(timer) = self.timers.remove(&id) {
            // no-op when the timer is the one that asked for the dismissal
            timer.abort();
        }

        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        let removed = self.active.len() != before;
        if removed {
            debug!(%id, "Notification dismissed");
        }
        removed
    }

    /// Notifications on screen, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Messages on screen, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.active.iter().map(|n| n.message.as_str()).collect()
    }

    /// Number of timers not yet released.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Removes everything and cancels all timers.
    pub fn clear(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        self.active.clear();
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        for timer in self.timers.values() {
            timer.abort();
        }
    }
}
