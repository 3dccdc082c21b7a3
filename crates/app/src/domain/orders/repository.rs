//! Orders Repository

use sqlx::{Postgres, Transaction, query_as, types::Json};
use storefront::{
    orders::{NewOrder, Order},
    sessions::UserId,
};

use crate::domain::orders::records::OrderRecord;

const PLACE_ORDER_SQL: &str = include_str!("sql/place_order.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("sql/list_orders_for_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<Order, sqlx::Error> {
        let record = query_as::<Postgres, OrderRecord>(PLACE_ORDER_SQL)
            .bind(order.user_id.as_str())
            .bind(Json(&order.items))
            .bind(order.subtotal)
            .bind(order.tax)
            .bind(order.total)
            .bind(&order.currency)
            .bind(order.payment_intent_id.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        Ok(record.0)
    }

    pub(crate) async fn list_orders_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &UserId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let records = query_as::<Postgres, OrderRecord>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user.as_str())
            .fetch_all(&mut **tx)
            .await?;

        Ok(records.into_iter().map(|record| record.0).collect())
    }
}
