//! Order Records

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, postgres::PgRow, types::Json};
use storefront::{
    carts::CartLineItem,
    orders::{Order, OrderId},
    sessions::UserId,
};
use uuid::Uuid;

/// Order row as stored in the `orders` table.
#[derive(Debug, Clone)]
pub(crate) struct OrderRecord(pub(crate) Order);

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let uuid: Uuid = row.try_get("uuid")?;
        let items: Json<Vec<CartLineItem>> = row.try_get("items")?;

        Ok(Self(Order {
            id: OrderId::new(uuid.to_string()),
            user_id: UserId::new(row.try_get::<String, _>("user_id")?),
            items: items.0,
            subtotal: row.try_get("subtotal")?,
            tax: row.try_get("tax")?,
            total: row.try_get("total")?,
            currency: row.try_get("currency")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            payment_intent_id: row.try_get("payment_intent_id")?,
        }))
    }
}
