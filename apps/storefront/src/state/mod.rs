//! # Session State
//!
//! Each piece of page state has one owner:
//!
//! - [`CartStore`] - the cart and its persisted copy
//! - [`CurrencyDisplay`] - selected currency, price projection
//! - [`CarouselController`] - slide index, swipe tracking, autoplay task
//! - [`NotificationCenter`] - transient messages and their timers
//!
//! The [`Storefront`](crate::session::Storefront) session holds one of each.

pub mod carousel;
pub mod cart_store;
pub mod currency;
pub mod notifications;

pub use carousel::CarouselController;
pub use cart_store::{CartStore, CartUpdate};
pub use currency::CurrencyDisplay;
pub use notifications::{Notification, NotificationCenter};
