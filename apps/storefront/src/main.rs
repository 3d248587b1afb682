//! # Storefront Entry Point
//!
//! Reads page commands from stdin and prints the rendered page to stdout.
//! Logs go to stderr.
//!
//! ```text
//! $ storefront
//! > add tote-01
//! > currency EUR
//! > swipe 300 240
//! > quit
//! ```
//!
//! The setup lives in lib.rs so the integration tests can drive a session.

use std::process::ExitCode;

fn main() -> ExitCode {
    match storefront_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront failed");
            eprintln!("storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
