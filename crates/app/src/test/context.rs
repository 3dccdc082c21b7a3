//! Test context for ledger integration tests.

use crate::domain::orders::PgOrdersLedger;

use super::db::TestDb;

pub(crate) struct TestContext {
    #[expect(dead_code, reason = "owns the database for the lifetime of the test")]
    pub(crate) db: TestDb,
    pub(crate) orders: PgOrdersLedger,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let db = TestDb::new().await;

        Self {
            orders: PgOrdersLedger::new(db.pool().clone()),
            db,
        }
    }
}
