//! Test Helpers

use std::sync::Arc;

use rust_decimal::Decimal;
use storefront::{
    carts::Cart,
    orders::NewOrder,
    pricing::PricingSnapshot,
    products::{Category, Product, ProductId},
    sessions::{UserId, UserSession},
};

use crate::domain::carts::CartStore;

pub(crate) fn product(id: u64, cents: i64) -> Arc<Product> {
    Arc::new(Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Decimal::new(cents, 2),
        description: format!("Description of product {id}"),
        category: Category::new("electronics"),
        image: format!("https://example.com/img/{id}.jpg"),
        rating: None,
    })
}

/// Cart holding `(product id, price in cents, quantity)` lines.
pub(crate) fn cart(lines: &[(u64, i64, u32)]) -> Cart {
    let mut cart = Cart::default();

    for &(id, cents, quantity) in lines {
        let product = product(id, cents);

        for _ in 0..quantity {
            cart.add_item(Arc::clone(&product));
        }
    }

    cart
}

pub(crate) fn cart_store(lines: &[(u64, i64, u32)]) -> CartStore {
    CartStore::new(cart(lines))
}

pub(crate) fn session(id: &str) -> UserSession {
    UserSession {
        id: UserId::new(id),
        email: format!("{id}@example.com"),
        display_name: None,
    }
}

pub(crate) fn new_order(user: &str, lines: &[(u64, i64, u32)]) -> NewOrder {
    let cart = cart(lines);

    NewOrder::from_cart(
        UserId::new(user),
        &cart,
        PricingSnapshot::for_cart(&cart),
        Some("pi_test".to_string()),
    )
}
