//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    carts::{Cart, CartLineItem, DEFAULT_CURRENCY, InvalidCartError},
    orders::{NewOrder, Order, OrderId},
    pricing::{
        PricingError, PricingSnapshot, TAX_RATE, compute_subtotal, compute_tax, compute_total,
        format_amount, to_minor_units,
    },
    products::{
        Category, Product, ProductId, ProductSort, Rating, search_products, sort_products,
        with_all_category,
    },
    sessions::{UserId, UserSession},
};
