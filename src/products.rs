//! Products
//!
//! Catalog entities as fetched from the remote catalog, plus the browsing
//! helpers (category sentinel, title search, price sorting) applied to them.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw catalog identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Average review score and number of reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score
    pub rate: f64,

    /// Number of reviews
    pub count: u32,
}

/// Product
///
/// Immutable once fetched. Carts hold shared references to it rather than
/// copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Unit price in major currency units (e.g. dollars)
    pub price: Decimal,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Category tag
    pub category: Category,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Optional review summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Category tag.
///
/// Categories are free-form strings owned by the catalog. The `all` sentinel
/// means "no filter" and is never sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Tag of the "no filter" sentinel.
    pub const ALL: &'static str = "all";

    /// Create a category from its tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The "no filter" sentinel.
    pub fn all() -> Self {
        Self(Self::ALL.to_string())
    }

    /// Whether this is the "no filter" sentinel.
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }

    /// Raw tag as used by the catalog.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable label. Unknown tags are shown verbatim.
    pub fn label(&self) -> &str {
        match self.0.as_str() {
            Self::ALL => "All",
            "electronics" => "Electronics",
            "jewelery" => "Jewelry",
            "men's clothing" => "Men's Clothing",
            "women's clothing" => "Women's Clothing",
            other => other,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::all()
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Prepend the `all` sentinel to the tags returned by the catalog.
///
/// A sentinel already present in `tags` is not duplicated.
pub fn with_all_category(tags: Vec<Category>) -> Vec<Category> {
    let mut categories = Vec::with_capacity(tags.len() + 1);

    categories.push(Category::all());
    categories.extend(tags.into_iter().filter(|tag| !tag.is_all()));

    categories
}

/// Product list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    /// Cheapest first
    PriceLowHigh,

    /// Most expensive first
    PriceHighLow,

    /// Backend order
    #[default]
    Popularity,
}

/// Error returned when parsing an unknown sort option.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort option `{0}` (expected price-low-high, price-high-low or popularity)")]
pub struct ParseProductSortError(String);

impl FromStr for ProductSort {
    type Err = ParseProductSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "price-low-high" | "price_low_high" => Ok(Self::PriceLowHigh),
            "price-high-low" | "price_high_low" => Ok(Self::PriceHighLow),
            "popularity" => Ok(Self::Popularity),
            other => Err(ParseProductSortError(other.to_string())),
        }
    }
}

/// Sort products in place. Equal prices keep their relative order.
pub fn sort_products(products: &mut [Product], sort: ProductSort) {
    match sort {
        ProductSort::PriceLowHigh => products.sort_by(|a, b| a.price.cmp(&b.price)),
        ProductSort::PriceHighLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
        ProductSort::Popularity => {}
    }
}

/// Products whose title contains `query`, ignoring case.
///
/// An empty query matches everything. Whitespace in the query is significant.
pub fn search_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();

    products
        .iter()
        .filter(|product| product.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;

    use super::{Category, Product, ProductId};

    /// Build a product with the given id and price in minor units (cents).
    pub(crate) fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            description: String::new(),
            category: Category::new("electronics"),
            image: String::new(),
            rating: None,
        }
    }
}
