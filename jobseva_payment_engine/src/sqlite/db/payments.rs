use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord},
    traits::LedgerError,
};

const PAYMENT_COLUMNS: &str = "id, order_id, payment_id, job_id, job_title, payer_email, payer_name, payer_phone, \
                               amount, status, created_at";

/// Inserts a payment record, keyed by `(order_id, payment_id)`. The insert is conditioned on the
/// unique index over that pair, so a record that already exists is left untouched and returned
/// as-is. Returns true iff a new row was written.
pub async fn idempotent_insert(
    payment: NewPaymentRecord,
    conn: &mut SqliteConnection,
) -> Result<(PaymentRecord, bool), LedgerError> {
    let result = sqlx::query(
        r#"
            INSERT INTO payments (order_id, payment_id, job_id, job_title, payer_email, payer_name, payer_phone, amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (order_id, payment_id) DO NOTHING
        "#,
    )
    .bind(&payment.order_id)
    .bind(&payment.payment_id)
    .bind(&payment.job_id)
    .bind(&payment.job_title)
    .bind(&payment.payer.email)
    .bind(&payment.payer.name)
    .bind(&payment.payer.phone)
    .bind(payment.amount)
    .execute(&mut *conn)
    .await?;
    let inserted = result.rows_affected() > 0;
    if !inserted {
        debug!("🗃️ Payment record for ({}, {}) already exists. Nothing written.", payment.order_id, payment.payment_id);
    }
    let record = fetch_payment_record(&payment.order_id, &payment.payment_id, conn).await?.ok_or_else(|| {
        LedgerError::ReadBackError(format!(
            "payment record for ({}, {}) vanished after insert",
            payment.order_id, payment.payment_id
        ))
    })?;
    Ok((record, inserted))
}

pub async fn fetch_payment_record(
    order_id: &OrderId,
    payment_id: &PaymentId,
    conn: &mut SqliteConnection,
) -> Result<Option<PaymentRecord>, LedgerError> {
    let query =
        format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE order_id = $1 AND payment_id = $2 LIMIT 1");
    let record = sqlx::query_as::<_, PaymentRecord>(&query)
        .bind(order_id)
        .bind(payment_id)
        .fetch_one(&mut *conn)
        .await;
    match record {
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(e.into()),
        Ok(r) => Ok(Some(r)),
    }
}
