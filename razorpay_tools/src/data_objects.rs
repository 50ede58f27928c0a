use jsp_common::Rupees;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The order-creation payload for `POST /v1/orders`. Amounts are in paise on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: Value,
}

impl OrderRequest {
    /// Builds an order for the given fee, tagging the gateway record with the job and payer the
    /// charge is for. `receipt` is our own identifier for reconciliation on the gateway dashboard.
    pub fn new(amount: Rupees, currency: &str, receipt: String, job_id: &str, payer_email: &str) -> Self {
        Self {
            amount: amount.to_paise(),
            currency: currency.to_string(),
            receipt,
            notes: json!({ "job_id": job_id, "payer_email": payer_email }),
        }
    }
}

/// The gateway's view of a created order, echoed back to the client so it can open the checkout
/// widget. `amount` is in paise, as the widget expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: i64,
}
