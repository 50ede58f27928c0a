use std::fmt::Debug;

use jsp_common::Secret;
use log::*;

use crate::{
    db_types::{FulfillmentRequest, FulfillmentStatus, OrderId, PaymentId},
    helpers::verify_payment_signature,
    ledger_api::{errors::LedgerApiError, payment_objects::PaymentClaim},
    traits::FulfillmentLedgerDatabase,
};

/// `FulfillmentApi` is the primary API for turning verified gateway callbacks into trackable
/// fulfillment requests, and for advancing those requests on behalf of the operations workflow.
pub struct FulfillmentApi<B> {
    db: B,
    gateway_secret: Secret<String>,
}

impl<B> Debug for FulfillmentApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FulfillmentApi")
    }
}

impl<B> FulfillmentApi<B> {
    pub fn new(db: B, gateway_secret: Secret<String>) -> Self {
        Self { db, gateway_secret }
    }
}

impl<B> FulfillmentApi<B>
where B: FulfillmentLedgerDatabase
{
    /// Decide whether a payment callback is genuine and, if so, durably record it.
    ///
    /// The signature is recomputed from the shared gateway secret and checked first; nothing is
    /// written on a mismatch. On a match, a `PaymentRecord` is persisted and a
    /// `FulfillmentRequest` with `pending` status is created for the same
    /// `(order_id, payment_id)` pair. Both writes are conditional on the pair being absent, so the
    /// whole call is idempotent: replaying a verified callback returns the existing request
    /// instead of creating a duplicate. The same re-check heals the partial-failure case where an
    /// earlier call recorded the payment but crashed before creating the request.
    pub async fn record_verified_payment(&self, claim: PaymentClaim) -> Result<FulfillmentRequest, LedgerApiError> {
        let PaymentClaim { order_id, payment_id, signature, .. } = &claim;
        if !verify_payment_signature(&self.gateway_secret, order_id, payment_id, signature) {
            // Log ids only. The payload may be forged, so it gets no further trust than this.
            warn!("🔐️ Signature verification FAILED for order {order_id} / payment {payment_id}. No records written.");
            return Err(LedgerApiError::InvalidSignature {
                order_id: order_id.clone(),
                payment_id: payment_id.clone(),
            });
        }
        trace!("🔐️ Signature for order {order_id} / payment {payment_id} verified.");
        let (record, payment_inserted) = self.db.insert_payment_record(claim.to_payment_record()).await?;
        if payment_inserted {
            debug!("🔄️💰️ Payment {} recorded for order {} ({})", record.payment_id, record.order_id, record.amount);
        } else {
            info!("🔄️💰️ Payment {} for order {} was already recorded. Re-checking its request.", record.payment_id, record.order_id);
        }
        let (request, created) = self.db.create_request_if_absent(claim.to_fulfillment_request()).await?;
        if created {
            info!(
                "🔄️📦️ Fulfillment request #{} created for payment {} (job {}).",
                request.id, request.payment_id, request.job_id
            );
        } else {
            info!(
                "🔄️📦️ Fulfillment request #{} already exists for payment {}. Returning it.",
                request.id, request.payment_id
            );
        }
        Ok(request)
    }

    /// Moves a fulfillment request forward through its lifecycle. Illegal transitions are rejected
    /// by the backend; see [`FulfillmentStatus::can_transition_to`].
    pub async fn advance_request_status(
        &self,
        id: i64,
        new_status: FulfillmentStatus,
    ) -> Result<FulfillmentRequest, LedgerApiError> {
        trace!("🔄️📦️ Request #{id} is being moved to {new_status}");
        let request = self.db.advance_request_status(id, new_status).await?;
        debug!("🔄️📦️ Request #{id} is now {}", request.status);
        Ok(request)
    }

    /// Fetches the fulfillment request created for a verified payment, if any.
    pub async fn request_for_payment(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
    ) -> Result<Option<FulfillmentRequest>, LedgerApiError> {
        Ok(self.db.fetch_request_for_payment(order_id, payment_id).await?)
    }
}
