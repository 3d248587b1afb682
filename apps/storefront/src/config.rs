//! # Storefront Configuration
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`storefront.toml`)
//! 3. Environment variables
//!
//! ## Config File Format
//! ```toml
//! [storage]
//! path = "/var/lib/storefront/storefront.db"
//!
//! [page]
//! path = "/orders.html"
//! template = "demos/page.json"
//!
//! [carousel]
//! autoplay_ms = 5000
//! swipe_threshold_px = 50.0
//!
//! [notifications]
//! duration_ms = 2000
//!
//! [cart]
//! restore_on_start = false
//! ```
//!
//! ## Environment Overrides
//! | Variable                      | Setting                        |
//! |-------------------------------|--------------------------------|
//! | `STOREFRONT_CONFIG`           | config file location           |
//! | `STOREFRONT_STORAGE_PATH`     | `storage.path`                 |
//! | `STOREFRONT_PAGE_PATH`        | `page.path`                    |
//! | `STOREFRONT_TEMPLATE`         | `page.template`                |
//! | `STOREFRONT_AUTOPLAY_MS`      | `carousel.autoplay_ms`         |
//! | `STOREFRONT_SWIPE_THRESHOLD`  | `carousel.swipe_threshold_px`  |
//! | `STOREFRONT_NOTIFICATION_MS`  | `notifications.duration_ms`    |
//! | `STOREFRONT_RESTORE_CART`     | `cart.restore_on_start`        |

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use storefront_core::{AUTOPLAY_INTERVAL_MS, NOTIFICATION_DURATION_MS, SWIPE_THRESHOLD_PX};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Storage file name inside the platform data directory.
pub const STORAGE_FILE_NAME: &str = "storefront.db";

// =============================================================================
// Sections
// =============================================================================

/// Where local storage lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Unset means `<data dir>/storefront.db`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Which page is being shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSettings {
    /// Location path of the page. Containing `orders.html` selects the
    /// order summary page.
    #[serde(default = "default_page_path")]
    pub path: String,

    /// JSON page template. Unset means the built-in demo page.
    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_page_path() -> String {
    "/index.html".to_string()
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            path: default_page_path(),
            template: None,
        }
    }
}

/// Carousel timing and touch sensitivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselSettings {
    #[serde(default = "default_autoplay_ms")]
    pub autoplay_ms: u64,

    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f64,
}

fn default_autoplay_ms() -> u64 {
    AUTOPLAY_INTERVAL_MS
}

fn default_swipe_threshold() -> f64 {
    SWIPE_THRESHOLD_PX
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            autoplay_ms: default_autoplay_ms(),
            swipe_threshold_px: default_swipe_threshold(),
        }
    }
}

/// Cart notification display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_notification_ms")]
    pub duration_ms: u64,
}

fn default_notification_ms() -> u64 {
    NOTIFICATION_DURATION_MS
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_ms(),
        }
    }
}

/// Cart startup behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSettings {
    /// Load the persisted cart instead of starting empty.
    #[serde(default)]
    pub restore_on_start: bool,
}

// =============================================================================
// StorefrontConfig
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub page: PageSettings,

    #[serde(default)]
    pub carousel: CarouselSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.carousel.autoplay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "carousel.autoplay_ms must be greater than 0".into(),
            ));
        }

        if self.notifications.duration_ms == 0 {
            return Err(AppError::InvalidConfig(
                "notifications.duration_ms must be greater than 0".into(),
            ));
        }

        let threshold = self.carousel.swipe_threshold_px;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AppError::InvalidConfig(format!(
                "carousel.swipe_threshold_px must be a positive number, got {}",
                threshold
            )));
        }

        if self.page.path.trim().is_empty() {
            return Err(AppError::InvalidConfig("page.path must not be empty".into()));
        }

        Ok(())
    }

    /// Applies overrides read through `lookup` (the process environment in
    /// [`load`](Self::load)).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("STOREFRONT_STORAGE_PATH") {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("STOREFRONT_PAGE_PATH") {
            self.page.path = path;
        }

        if let Some(template) = lookup("STOREFRONT_TEMPLATE") {
            self.page.template = Some(PathBuf::from(template));
        }

        if let Some(ms) = lookup("STOREFRONT_AUTOPLAY_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.carousel.autoplay_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric STOREFRONT_AUTOPLAY_MS"),
            }
        }

        if let Some(px) = lookup("STOREFRONT_SWIPE_THRESHOLD") {
            match px.parse::<f64>() {
                Ok(px) => self.carousel.swipe_threshold_px = px,
                Err(_) => warn!(value = %px, "Ignoring non-numeric STOREFRONT_SWIPE_THRESHOLD"),
            }
        }

        if let Some(ms) = lookup("STOREFRONT_NOTIFICATION_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.notifications.duration_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric STOREFRONT_NOTIFICATION_MS"),
            }
        }

        if let Some(flag) = lookup("STOREFRONT_RESTORE_CART") {
            match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.restore_on_start = true,
                "0" | "false" | "no" | "off" => self.cart.restore_on_start = false,
                _ => warn!(value = %flag, "Unknown STOREFRONT_RESTORE_CART value"),
            }
        }
    }

    /// Config file path: `STOREFRONT_CONFIG`, else the platform config dir.
    fn default_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("STOREFRONT_CONFIG") {
            return Some(PathBuf::from(path));
        }

        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the storage file, creating the platform data dir if needed.
    pub fn storage_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        let dirs = directories::ProjectDirs::from("com", "storefront", "storefront")
            .ok_or(AppError::NoPlatformDir("data"))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(STORAGE_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.carousel.autoplay_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.page.path, "/index.html");
        assert_eq!(config.carousel.autoplay_ms, 5_000);
        assert_eq!(config.notifications.duration_ms, 2_000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert!(!config.cart.restore_on_start);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [page]
            path = "/orders.html"

            [carousel]
            autoplay_ms = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.page.path, "/orders.html");
        assert_eq!(config.carousel.autoplay_ms, 1_000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.notifications.duration_ms, 2_000);
    }

    #[test]
    fn test_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(env(&[
            ("STOREFRONT_STORAGE_PATH", "/tmp/shop.db"),
            ("STOREFRONT_PAGE_PATH", "/shop/orders.html"),
            ("STOREFRONT_AUTOPLAY_MS", "250"),
            ("STOREFRONT_NOTIFICATION_MS", "nope"),
            ("STOREFRONT_RESTORE_CART", "TRUE"),
        ]));

        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/shop.db")));
        assert_eq!(config.page.path, "/shop/orders.html");
        assert_eq!(config.autoplay_interval(), Duration::from_millis(250));
        assert_eq!(config.notification_duration(), Duration::from_millis(2_000));
        assert!(config.cart.restore_on_start);
    }

    #[test]
    fn test_validation_rejects_zero_intervals() {
        let mut config = StorefrontConfig::default();
        config.carousel.autoplay_ms = 0;
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));

        let mut config = StorefrontConfig::default();
        config.carousel.swipe_threshold_px = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_storage_path_is_used() {
        let mut config = StorefrontConfig::default();
        config.storage.path = Some(PathBuf::from("/tmp/x.db"));
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/x.db"));
    }
}
