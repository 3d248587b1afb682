//! # Catalog
//!
//! Product cards as the page renders them, and the sort control that reorders
//! them by base price.
//!
//! A card only knows what its markup carries: an id, a heading, an image and
//! the raw `data-usd-price` text. Turning that into a [`LineItem`] is where
//! validation happens.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::cart::LineItem;
use crate::error::{CoreError, ValidationError};
use crate::money::{BasePrice, Money};

// =============================================================================
// Product Card
// =============================================================================

/// One product card from the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    /// `data-product-id`
    pub id: String,
    /// Card heading text
    pub name: String,
    /// Image source
    pub image: String,
    /// Raw `data-usd-price` attribute text
    pub usd_price: String,
}

impl ProductCard {
    /// Parses the card's USD base price at full markup precision.
    pub fn base_price(&self) -> Result<BasePrice, ValidationError> {
        BasePrice::parse(&self.usd_price)
    }

    /// Builds the line item an "Add to cart" click submits (quantity 1).
    /// The cart keeps whole cents.
    pub fn to_line_item(&self) -> Result<LineItem, ValidationError> {
        let unit_price = Money::parse_decimal(&self.usd_price)?;
        LineItem::new(&self.id, &self.name, unit_price, &self.image)
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

/// Price ordering chosen in the sort control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Cheapest first.
    #[default]
    Asc,
    /// Most expensive first.
    Desc,
}

impl SortDirection {
    /// Value stored under `preferredSort`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CoreError::UnknownSortDirection(s.to_string())),
        }
    }
}

/// Stable sort of `cards` by base price.
///
/// Cards whose price does not parse keep their relative order and go last in
/// either direction.
pub fn sort_by_base_price<T>(
    cards: &mut [T],
    direction: SortDirection,
    price_of: impl Fn(&T) -> Option<BasePrice>,
) {
    cards.sort_by(|a, b| match (price_of(a), price_of(b)) {
        (Some(pa), Some(pb)) => match direction {
            SortDirection::Asc => pa.cmp(&pb),
            SortDirection::Desc => pb.cmp(&pa),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
