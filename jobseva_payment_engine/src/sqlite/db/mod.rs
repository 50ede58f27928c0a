pub mod payments;
pub mod requests;

use sqlx::SqlitePool;

use crate::traits::LedgerError;

/// The `payments` and `fulfillment_requests` collections. Both carry a unique index over
/// `(order_id, payment_id)`; that index is what makes the ledger's create-if-absent writes
/// race-free (see [`crate::traits::FulfillmentLedgerDatabase`]).
const SCHEMA: [&str; 4] = [
    r#"CREATE TABLE IF NOT EXISTS payments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id    TEXT NOT NULL,
    payment_id  TEXT NOT NULL,
    job_id      TEXT NOT NULL,
    job_title   TEXT NOT NULL DEFAULT '',
    payer_email TEXT NOT NULL,
    payer_name  TEXT NOT NULL,
    payer_phone TEXT,
    amount      INTEGER NOT NULL,
    status      TEXT NOT NULL DEFAULT 'success',
    created_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    "CREATE UNIQUE INDEX IF NOT EXISTS payments_order_payment ON payments (order_id, payment_id)",
    r#"CREATE TABLE IF NOT EXISTS fulfillment_requests (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id    TEXT NOT NULL,
    payment_id  TEXT NOT NULL,
    job_id      TEXT NOT NULL,
    job_title   TEXT NOT NULL DEFAULT '',
    payer_email TEXT NOT NULL,
    payer_name  TEXT NOT NULL,
    payer_phone TEXT,
    amount      INTEGER NOT NULL,
    status      TEXT NOT NULL DEFAULT 'pending',
    created_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )"#,
    "CREATE UNIQUE INDEX IF NOT EXISTS requests_order_payment ON fulfillment_requests (order_id, payment_id)",
];

pub async fn create_tables(pool: &SqlitePool) -> Result<(), LedgerError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
