use jobseva_payment_engine::{
    db_types::{OrderId, Payer, PaymentId},
    PaymentClaim,
};
use jsp_common::Rupees;
use serde::{Deserialize, Serialize};

use crate::errors::ServerError;

/// Largest fee we will ever ask the gateway to charge, in whole rupees. The schedule tops out in
/// the hundreds; anything near this ceiling is a client bug. It also keeps the paise conversion
/// far away from `i64` overflow.
const MAX_ORDER_AMOUNT: i64 = 500_000;

/// Checkout request from the front end, sent before the payment widget opens. The mixed field
/// casing mirrors what the widget integration sends.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderParams {
    /// The form-filling fee in whole rupees.
    pub amount: i64,
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "jobTitle", default)]
    pub job_title: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userPhone", default)]
    pub user_phone: Option<String>,
}

impl NewOrderParams {
    /// Checked before any outbound gateway call. A malformed checkout request never leaves the
    /// server.
    pub fn validate(&self) -> Result<Rupees, ServerError> {
        if self.amount <= 0 {
            return Err(ServerError::InvalidRequestBody(format!("amount must be positive, not {}", self.amount)));
        }
        if self.amount > MAX_ORDER_AMOUNT {
            return Err(ServerError::InvalidRequestBody(format!(
                "amount exceeds the {MAX_ORDER_AMOUNT} rupee ceiling: {}",
                self.amount
            )));
        }
        for (field, value) in [("jobId", &self.job_id), ("userEmail", &self.user_email), ("userName", &self.user_name)]
        {
            if value.trim().is_empty() {
                return Err(ServerError::InvalidRequestBody(format!("{field} must not be empty")));
            }
        }
        Ok(Rupees::from(self.amount))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderCreatedResult {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// In paise, as the checkout widget expects.
    pub amount: i64,
    /// The public gateway key id the widget needs to open the charge UI.
    pub key: String,
    pub currency: String,
}

/// Payment callback from the checkout widget. The `razorpay_*` fields are named by the gateway;
/// the rest is the same checkout context as [`NewOrderParams`], echoed back so the ledger can
/// record what was paid for.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentParams {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "jobTitle", default)]
    pub job_title: String,
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "userPhone", default)]
    pub user_phone: Option<String>,
    pub amount: i64,
}

impl VerifyPaymentParams {
    pub fn into_claim(self) -> PaymentClaim {
        let mut payer = Payer::new(self.user_email, self.user_name);
        if let Some(phone) = self.user_phone {
            payer = payer.with_phone(phone);
        }
        PaymentClaim {
            order_id: OrderId::from(self.razorpay_order_id),
            payment_id: PaymentId::from(self.razorpay_payment_id),
            signature: self.razorpay_signature,
            job_id: self.job_id,
            job_title: self.job_title,
            payer,
            amount: Rupees::from(self.amount),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyResult {
    pub success: bool,
    #[serde(rename = "paymentId")]
    pub payment_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeResult {
    pub category: String,
    /// In whole rupees. The checkout screen shows this figure as-is.
    pub amount: i64,
    pub currency: String,
}
