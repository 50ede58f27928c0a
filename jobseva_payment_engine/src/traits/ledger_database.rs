use thiserror::Error;

use crate::db_types::{
    FulfillmentRequest,
    FulfillmentStatus,
    NewFulfillmentRequest,
    NewPaymentRecord,
    OrderId,
    PaymentId,
    PaymentRecord,
};

/// The persistence contract for the fulfillment request ledger.
///
/// Backends store two logical collections, `payments` and `fulfillment_requests`, both keyed by
/// the `(order_id, payment_id)` pair a verified gateway signature vouched for. Neither write
/// assumes the other happened; idempotency is per record.
#[allow(async_fn_in_trait)]
pub trait FulfillmentLedgerDatabase {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Persists a payment record for a verified payment.
    ///
    /// This call is idempotent: if a record for the `(order_id, payment_id)` pair already exists,
    /// it is returned unchanged. The boolean is true iff a new record was written.
    async fn insert_payment_record(&self, payment: NewPaymentRecord) -> Result<(PaymentRecord, bool), LedgerError>;

    /// Creates a fulfillment request with `pending` status, conditional on no request existing for
    /// the `(order_id, payment_id)` pair. The write itself must be the existence check (a
    /// compare-and-create against a unique key), so that two concurrent calls for the same pair
    /// can never both insert. The boolean is true iff a new request was created.
    async fn create_request_if_absent(
        &self,
        request: NewFulfillmentRequest,
    ) -> Result<(FulfillmentRequest, bool), LedgerError>;

    /// Fetches the payment record for the given `(order_id, payment_id)` pair, if one exists.
    async fn fetch_payment_record(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
    ) -> Result<Option<PaymentRecord>, LedgerError>;

    /// Fetches the fulfillment request for the given `(order_id, payment_id)` pair, if one exists.
    async fn fetch_request_for_payment(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
    ) -> Result<Option<FulfillmentRequest>, LedgerError>;

    /// Fetches a fulfillment request by its ledger id.
    async fn fetch_request_by_id(&self, id: i64) -> Result<Option<FulfillmentRequest>, LedgerError>;

    /// Moves a fulfillment request to `new_status` on behalf of the operations workflow.
    ///
    /// The transition is validated against [`FulfillmentStatus::can_transition_to`]; anything that
    /// is not a single forward step (or `refunded` from a non-terminal state) fails with
    /// [`LedgerError::InvalidStatusTransition`] and leaves the record untouched.
    async fn advance_request_status(
        &self,
        id: i64,
        new_status: FulfillmentStatus,
    ) -> Result<FulfillmentRequest, LedgerError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("The requested fulfillment request (ledger id {0}) does not exist")]
    RequestNotFound(i64),
    #[error("No payment record exists for order {order_id} / payment {payment_id}")]
    PaymentNotFound { order_id: OrderId, payment_id: PaymentId },
    #[error("Illegal fulfillment status transition: {from} → {to}")]
    InvalidStatusTransition { from: FulfillmentStatus, to: FulfillmentStatus },
    #[error("The ledger wrote a record but could not read it back: {0}")]
    ReadBackError(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}
