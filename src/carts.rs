//! Carts
//!
//! A cart is an insertion-ordered list of line items, at most one per product,
//! each with a quantity of at least one. Operations never fail: unknown product
//! ids are ignored.

use std::{collections::HashSet, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Currency used by carts that do not specify one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Stored cart data that breaks the cart invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCartError {
    /// A line item with quantity zero.
    #[error("line item for product {0} has quantity zero")]
    ZeroQuantity(ProductId),

    /// Two line items for the same product.
    #[error("product {0} appears in more than one line item")]
    DuplicateProduct(ProductId),
}

#[derive(Deserialize)]
struct StoredLineItem {
    product: Arc<Product>,
    quantity: u32,
}

impl TryFrom<StoredLineItem> for CartLineItem {
    type Error = InvalidCartError;

    fn try_from(stored: StoredLineItem) -> Result<Self, Self::Error> {
        if stored.quantity == 0 {
            return Err(InvalidCartError::ZeroQuantity(stored.product.id));
        }

        Ok(Self {
            product: stored.product,
            quantity: stored.quantity,
        })
    }
}

#[derive(Deserialize)]
struct StoredCart {
    items: Vec<CartLineItem>,
    currency: String,
}

impl TryFrom<StoredCart> for Cart {
    type Error = InvalidCartError;

    fn try_from(stored: StoredCart) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(stored.items.len());

        for item in &stored.items {
            if !seen.insert(item.product_id()) {
                return Err(InvalidCartError::DuplicateProduct(item.product_id()));
            }
        }

        Ok(Self {
            items: stored.items,
            currency: stored.currency,
            generation: 0,
        })
    }
}

/// A product reference and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredLineItem")]
pub struct CartLineItem {
    product: Arc<Product>,
    quantity: u32,
}

impl CartLineItem {
    /// Line item with quantity one.
    pub fn new(product: Arc<Product>) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Line item with an explicit quantity, clamped to at least one.
    pub fn with_quantity(product: Arc<Product>, quantity: u32) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
        }
    }

    /// The referenced product.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Id of the referenced product.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
///
/// Deserializing rejects zero quantities and repeated product ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredCart")]
pub struct Cart {
    items: Vec<CartLineItem>,
    currency: String,

    /// Bumped by every mutation, so callers can detect a cart that changed
    /// underneath an in-flight operation.
    #[serde(skip)]
    generation: u64,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY)
    }
}

impl Cart {
    /// Create an empty cart in the given ISO 4217 currency.
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            currency: currency.into(),
            generation: 0,
        }
    }

    /// Add one unit of `product`.
    ///
    /// Merges into the existing line item for the same product id, otherwise
    /// appends a new line item with quantity one.
    pub fn add_item(&mut self, product: Arc<Product>) {
        if let Some(item) = self.find_mut(product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartLineItem::new(product));
        }

        self.touch();
    }

    /// Delete the line item for `product`, whatever its quantity.
    pub fn remove_item(&mut self, product: ProductId) {
        let before = self.items.len();

        self.items.retain(|item| item.product_id() != product);

        if self.items.len() != before {
            self.touch();
        }
    }

    /// Increase the quantity of `product` by one.
    pub fn increment_quantity(&mut self, product: ProductId) {
        if let Some(item) = self.find_mut(product) {
            item.quantity = item.quantity.saturating_add(1);
            self.touch();
        }
    }

    /// Decrease the quantity of `product` by one.
    ///
    /// At quantity one this does nothing; removing the line needs an explicit
    /// [`Cart::remove_item`].
    pub fn decrement_quantity(&mut self, product: ProductId) {
        if let Some(item) = self.find_mut(product)
            && item.quantity > 1
        {
            item.quantity -= 1;
            self.touch();
        }
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Line item for `product`, if present.
    pub fn item(&self, product: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.product_id() == product)
    }

    /// Quantity of `product`, zero when absent.
    pub fn quantity_of(&self, product: ProductId) -> u32 {
        self.item(product).map_or(0, CartLineItem::quantity)
    }

    /// Total number of units across all line items.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// ISO 4217 currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Mutation counter. Not persisted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn find_mut(&mut self, product: ProductId) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product)
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
