use log::{debug, warn};
use sqlx::SqliteConnection;

use crate::{
    db_types::{FulfillmentRequest, FulfillmentStatus, NewFulfillmentRequest, OrderId, PaymentId},
    traits::LedgerError,
};

const REQUEST_COLUMNS: &str = "id, order_id, payment_id, job_id, job_title, payer_email, payer_name, payer_phone, \
                               amount, status, created_at, updated_at";

/// The compare-and-create write at the heart of the ledger. The insert is conditioned on the
/// unique `(order_id, payment_id)` index rather than a prior read, so concurrent verification
/// attempts for the same payment can never both create a request. Returns the request for the pair
/// and true iff this call created it.
pub async fn conditional_insert(
    request: NewFulfillmentRequest,
    conn: &mut SqliteConnection,
) -> Result<(FulfillmentRequest, bool), LedgerError> {
    let result = sqlx::query(
        r#"
            INSERT INTO fulfillment_requests
                (order_id, payment_id, job_id, job_title, payer_email, payer_name, payer_phone, amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (order_id, payment_id) DO NOTHING
        "#,
    )
    .bind(&request.order_id)
    .bind(&request.payment_id)
    .bind(&request.job_id)
    .bind(&request.job_title)
    .bind(&request.payer.email)
    .bind(&request.payer.name)
    .bind(&request.payer.phone)
    .bind(request.amount)
    .execute(&mut *conn)
    .await?;
    let created = result.rows_affected() > 0;
    if !created {
        debug!(
            "🗃️ A fulfillment request for ({}, {}) already exists. Returning it unchanged.",
            request.order_id, request.payment_id
        );
    }
    let request = fetch_request_for_payment(&request.order_id, &request.payment_id, conn).await?.ok_or_else(|| {
        LedgerError::ReadBackError(format!(
            "fulfillment request for ({}, {}) vanished after insert",
            request.order_id, request.payment_id
        ))
    })?;
    Ok((request, created))
}

pub async fn fetch_request_for_payment(
    order_id: &OrderId,
    payment_id: &PaymentId,
    conn: &mut SqliteConnection,
) -> Result<Option<FulfillmentRequest>, LedgerError> {
    let query = format!(
        "SELECT {REQUEST_COLUMNS} FROM fulfillment_requests WHERE order_id = $1 AND payment_id = $2 LIMIT 1"
    );
    let request = sqlx::query_as::<_, FulfillmentRequest>(&query)
        .bind(order_id)
        .bind(payment_id)
        .fetch_one(&mut *conn)
        .await;
    match request {
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(e.into()),
        Ok(r) => Ok(Some(r)),
    }
}

pub async fn fetch_request_by_id(
    id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<FulfillmentRequest>, LedgerError> {
    let query = format!("SELECT {REQUEST_COLUMNS} FROM fulfillment_requests WHERE id = $1");
    let request = sqlx::query_as::<_, FulfillmentRequest>(&query).bind(id).fetch_one(&mut *conn).await;
    match request {
        Err(sqlx::Error::RowNotFound) => Ok(None),
        Err(e) => Err(e.into()),
        Ok(r) => Ok(Some(r)),
    }
}

/// Applies a status transition after validating it against the allowed-transition table. The
/// update is guarded on the status the decision was made against, so a concurrent transition
/// surfaces as an error instead of silently overwriting.
pub async fn advance_status(
    id: i64,
    new_status: FulfillmentStatus,
    conn: &mut SqliteConnection,
) -> Result<FulfillmentRequest, LedgerError> {
    let request = fetch_request_by_id(id, &mut *conn).await?.ok_or(LedgerError::RequestNotFound(id))?;
    if !request.status.can_transition_to(new_status) {
        warn!("🗃️ Rejecting fulfillment status transition {} → {new_status} for request #{id}", request.status);
        return Err(LedgerError::InvalidStatusTransition { from: request.status, to: new_status });
    }
    let result = sqlx::query(
        "UPDATE fulfillment_requests SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 AND status = $3",
    )
    .bind(new_status)
    .bind(id)
    .bind(request.status)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 0 {
        // Lost a race with another transition; report against the status that is now current.
        let current = fetch_request_by_id(id, &mut *conn).await?.ok_or(LedgerError::RequestNotFound(id))?;
        return Err(LedgerError::InvalidStatusTransition { from: current.status, to: new_status });
    }
    debug!("🗃️ Fulfillment request #{id} moved from {} to {new_status}", request.status);
    fetch_request_by_id(id, conn)
        .await?
        .ok_or_else(|| LedgerError::ReadBackError(format!("fulfillment request #{id} vanished after update")))
}
