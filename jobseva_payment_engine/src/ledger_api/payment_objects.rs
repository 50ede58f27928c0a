use jsp_common::Rupees;
use serde::{Deserialize, Serialize};

use crate::db_types::{NewFulfillmentRequest, NewPaymentRecord, OrderId, Payer, PaymentId};

/// Everything a gateway callback asserts about a completed charge. The signature is the only part
/// that is trusted — and only after it has been recomputed server-side. The rest is checkout
/// context the client echoes back so the ledger can record what was paid for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentClaim {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    /// Hex-encoded `HMAC-SHA256(secret, "{order_id}|{payment_id}")` as supplied by the gateway.
    pub signature: String,
    pub job_id: String,
    pub job_title: String,
    pub payer: Payer,
    pub amount: Rupees,
}

impl PaymentClaim {
    pub(crate) fn to_payment_record(&self) -> NewPaymentRecord {
        NewPaymentRecord {
            order_id: self.order_id.clone(),
            payment_id: self.payment_id.clone(),
            job_id: self.job_id.clone(),
            job_title: self.job_title.clone(),
            payer: self.payer.clone(),
            amount: self.amount,
        }
    }

    pub(crate) fn to_fulfillment_request(&self) -> NewFulfillmentRequest {
        NewFulfillmentRequest::from(self.to_payment_record())
    }
}
