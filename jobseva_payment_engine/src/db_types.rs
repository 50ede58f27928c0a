use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use jsp_common::Rupees;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        OrderId        -------------------------------------------------------
/// The gateway-assigned order identifier, e.g. `order_MkCt4dr9iQ1flu`.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------       PaymentId       -------------------------------------------------------
/// The gateway-assigned payment identifier, e.g. `pay_MkCuiJ7OQu2rIs`.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct PaymentId(pub String);

impl FromStr for PaymentId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for PaymentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PaymentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------         Payer         -------------------------------------------------------
/// The student paying for the form-filling service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

impl Payer {
    pub fn new<S1: Into<String>, S2: Into<String>>(email: S1, name: S2) -> Self {
        Self { email: email.into(), name: name.into(), phone: None }
    }

    pub fn with_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

//--------------------------------------     PaymentStatus     -------------------------------------------------------
/// Payment records are only ever written for verified payments, so the sole status is `success`.
/// Refund and dispute handling live outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "success"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------  FulfillmentStatus    -------------------------------------------------------
/// Lifecycle of a fulfillment request. Transitions only ever move forward:
///
/// `pending → assigned → in_progress → completed`
///
/// `refunded` is terminal and reachable from any non-terminal state. Everything else is rejected by
/// [`FulfillmentStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    /// The request has been created off the back of a verified payment. Nobody is working on it yet.
    Pending,
    /// An operator has picked up the request.
    Assigned,
    /// The application form is being filled in.
    InProgress,
    /// The application has been submitted on the student's behalf.
    Completed,
    /// The request was cancelled by the operations workflow and the fee refunded.
    Refunded,
}

impl FulfillmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FulfillmentStatus::Completed | FulfillmentStatus::Refunded)
    }

    /// The allowed-transition table. Single forward steps only, plus `refunded` from any
    /// non-terminal state.
    pub fn can_transition_to(&self, next: FulfillmentStatus) -> bool {
        use FulfillmentStatus::*;
        matches!(
            (*self, next),
            (Pending, Assigned) | (Assigned, InProgress) | (InProgress, Completed)
        ) || (next == Refunded && !self.is_terminal())
    }
}

impl Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfillmentStatus::Pending => write!(f, "pending"),
            FulfillmentStatus::Assigned => write!(f, "assigned"),
            FulfillmentStatus::InProgress => write!(f, "in_progress"),
            FulfillmentStatus::Completed => write!(f, "completed"),
            FulfillmentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl FromStr for FulfillmentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "refunded" => Ok(Self::Refunded),
            s => Err(ConversionError(format!("Invalid fulfillment status: {s}"))),
        }
    }
}

//--------------------------------------   NewPaymentRecord    -------------------------------------------------------
/// A verified payment about to be written to the ledger. Only ever constructed after the gateway
/// signature for `(order_id, payment_id)` has been recomputed and matched.
#[derive(Debug, Clone)]
pub struct NewPaymentRecord {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub job_id: String,
    pub job_title: String,
    pub payer: Payer,
    pub amount: Rupees,
}

impl NewPaymentRecord {
    pub fn new(order_id: OrderId, payment_id: PaymentId, job_id: String, payer: Payer, amount: Rupees) -> Self {
        Self { order_id, payment_id, job_id, job_title: String::new(), payer, amount }
    }

    pub fn with_job_title<S: Into<String>>(mut self, title: S) -> Self {
        self.job_title = title.into();
        self
    }
}

//--------------------------------------     PaymentRecord     -------------------------------------------------------
/// An immutable record of a verified payment. Never mutated or deleted once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentRecord {
    pub id: i64,
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub job_id: String,
    pub job_title: String,
    pub payer_email: String,
    pub payer_name: String,
    pub payer_phone: Option<String>,
    pub amount: Rupees,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

//------------------------------------ NewFulfillmentRequest   -------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewFulfillmentRequest {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub job_id: String,
    pub job_title: String,
    pub payer: Payer,
    pub amount: Rupees,
}

impl From<NewPaymentRecord> for NewFulfillmentRequest {
    fn from(p: NewPaymentRecord) -> Self {
        Self {
            order_id: p.order_id,
            payment_id: p.payment_id,
            job_id: p.job_id,
            job_title: p.job_title,
            payer: p.payer,
            amount: p.amount,
        }
    }
}

//--------------------------------------  FulfillmentRequest   -------------------------------------------------------
/// The trackable service request created 1:1 with a verified payment. The verification path only
/// ever creates these with `pending` status; all later mutation happens through
/// [`crate::traits::FulfillmentLedgerDatabase::advance_request_status`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FulfillmentRequest {
    pub id: i64,
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub job_id: String,
    pub job_title: String,
    pub payer_email: String,
    pub payer_name: String,
    pub payer_phone: Option<String>,
    pub amount: Rupees,
    pub status: FulfillmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::FulfillmentStatus::{self, *};

    const ALL: [FulfillmentStatus; 5] = [Pending, Assigned, InProgress, Completed, Refunded];

    #[test]
    fn forward_transitions_are_allowed() {
        assert!(Pending.can_transition_to(Assigned));
        assert!(Assigned.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn refunded_is_reachable_from_non_terminal_states_only() {
        assert!(Pending.can_transition_to(Refunded));
        assert!(Assigned.can_transition_to(Refunded));
        assert!(InProgress.can_transition_to(Refunded));
        assert!(!Completed.can_transition_to(Refunded));
        assert!(!Refunded.can_transition_to(Refunded));
    }

    #[test]
    fn no_backward_or_skipping_transitions() {
        assert!(!Pending.can_transition_to(InProgress));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Assigned.can_transition_to(Pending));
        assert!(!Assigned.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Assigned));
        assert!(!Completed.can_transition_to(Pending));
        for s in ALL {
            // A status never transitions to itself
            assert!(!s.can_transition_to(s));
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for next in ALL {
            assert!(!Completed.can_transition_to(next));
            assert!(!Refunded.can_transition_to(next));
        }
    }

    #[test]
    fn wire_format_is_snake_case() {
        for (s, expect) in
            ALL.iter().zip(["pending", "assigned", "in_progress", "completed", "refunded"])
        {
            assert_eq!(s.to_string(), expect);
            assert_eq!(expect.parse::<FulfillmentStatus>().unwrap(), *s);
            assert_eq!(serde_json::to_string(s).unwrap(), format!("\"{expect}\""));
        }
    }
}
