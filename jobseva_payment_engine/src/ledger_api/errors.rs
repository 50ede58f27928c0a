use thiserror::Error;

use crate::{
    db_types::{OrderId, PaymentId},
    traits::LedgerError,
};

#[derive(Debug, Clone, Error)]
pub enum LedgerApiError {
    /// The recomputed gateway signature did not match the one supplied. A security event, not a
    /// transient error: nothing was written and the call must not be retried.
    #[error("Signature verification failed for order {order_id} / payment {payment_id}")]
    InvalidSignature { order_id: OrderId, payment_id: PaymentId },
    #[error("{0}")]
    Database(#[from] LedgerError),
}
