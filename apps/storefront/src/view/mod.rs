//! # Views
//!
//! Rendering of session state into the page.

pub mod cart_view;

pub use cart_view::{CartAction, CartControl, CartRow, CartView, ControlKind, EMPTY_CART_MESSAGE};
