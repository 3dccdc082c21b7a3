//! Order ledger service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use storefront::{
    orders::{NewOrder, Order},
    sessions::UserId,
};
use tracing::info;

use crate::domain::orders::{errors::OrdersLedgerError, repository::PgOrdersRepository};

/// Order ledger stored in `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgOrdersLedger {
    pool: PgPool,
    repository: PgOrdersRepository,
}

impl PgOrdersLedger {
    /// Ledger using `pool`, one transaction per call.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersLedger for PgOrdersLedger {
    #[tracing::instrument(
        name = "orders.ledger.place_order",
        skip(self, order),
        fields(user = %order.user_id, total = %order.total, items = order.items.len()),
        err
    )]
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersLedgerError> {
        let mut tx = self.pool.begin().await?;

        let placed = self.repository.place_order(&mut tx, &order).await?;

        tx.commit().await?;

        info!(order = %placed.id, "placed order");

        Ok(placed)
    }

    #[tracing::instrument(
        name = "orders.ledger.list_orders_for_user",
        skip(self),
        fields(user = %user),
        err
    )]
    async fn list_orders_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrdersLedgerError> {
        let mut tx = self.pool.begin().await?;

        let orders = self.repository.list_orders_for_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersLedger: Send + Sync {
    /// Write a new immutable order. The ledger assigns its identifier and
    /// creation timestamp.
    async fn place_order(&self, order: NewOrder) -> Result<Order, OrdersLedgerError>;

    /// Every order owned by `user`, most recent first. Empty when there are
    /// none.
    async fn list_orders_for_user(&self, user: &UserId) -> Result<Vec<Order>, OrdersLedgerError>;
}
