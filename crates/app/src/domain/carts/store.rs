//! Cart store.
//!
//! The single owner of the live cart. Every operation takes the lock, runs to
//! completion and releases it, so concurrent callers observe whole operations
//! only.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront::{
    carts::Cart,
    pricing::PricingSnapshot,
    products::{Product, ProductId},
};
use tracing::debug;

/// Shared handle to the live cart.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
}

impl CartStore {
    /// Store seeded with `cart`, typically restored from the local cache.
    pub fn new(cart: Cart) -> Self {
        Self {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Add one unit of `product`.
    pub fn add_item(&self, product: Arc<Product>) {
        let id = product.id;
        let mut cart = self.lock();

        cart.add_item(product);

        debug!(product = %id, quantity = cart.quantity_of(id), "added cart item");
    }

    /// Remove the line for `product`.
    pub fn remove_item(&self, product: ProductId) {
        self.lock().remove_item(product);

        debug!(product = %product, "removed cart item");
    }

    /// One more unit of `product`.
    pub fn increment_quantity(&self, product: ProductId) {
        self.lock().increment_quantity(product);
    }

    /// One fewer unit of `product`, never below one.
    pub fn decrement_quantity(&self, product: ProductId) {
        self.lock().decrement_quantity(product);
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.lock().clear();

        debug!("cleared cart");
    }

    /// Copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Pricing for the current contents, computed on every call.
    pub fn pricing(&self) -> PricingSnapshot {
        PricingSnapshot::for_cart(&self.lock())
    }

    /// Current mutation counter.
    pub fn generation(&self) -> u64 {
        self.lock().generation()
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use rust_decimal::Decimal;
    use storefront::products::Category;

    use super::*;

    fn product(id: u64, cents: i64) -> Arc<Product> {
        Arc::new(Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::new(cents, 2),
            description: String::new(),
            category: Category::new("jewelery"),
            image: String::new(),
            rating: None,
        })
    }

    #[test]
    fn pricing_tracks_mutations() {
        let store = CartStore::default();

        store.add_item(product(1, 10_00));
        store.add_item(product(1, 10_00));
        store.add_item(product(2, 5_00));

        assert_eq!(store.pricing().total, Decimal::new(27_00, 2));

        store.remove_item(ProductId::new(2));

        assert_eq!(store.pricing().subtotal, Decimal::new(20_00, 2));
    }

    #[test]
    fn clones_share_one_cart() {
        let store = CartStore::default();
        let other = store.clone();

        other.add_item(product(1, 1_00));

        assert_eq!(store.snapshot().quantity_of(ProductId::new(1)), 1);
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let store = CartStore::default();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();

                thread::spawn(move || {
                    for _ in 0..50 {
                        store.add_item(product(7, 1_00));
                    }
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().is_ok(), "worker thread panicked");
        }

        let cart = store.snapshot();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(7)), 400);
    }

    #[test]
    fn snapshot_is_detached() {
        let store = CartStore::default();
        store.add_item(product(1, 1_00));

        let snapshot = store.snapshot();
        store.clear();

        assert_eq!(snapshot.len(), 1);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn generation_advances_on_change() {
        let store = CartStore::default();
        let before = store.generation();

        store.add_item(product(1, 1_00));

        assert!(store.generation() > before);
    }
}
