use chrono::Utc;
use jobseva_payment_engine::{
    db_types::{
        FulfillmentRequest,
        FulfillmentStatus,
        NewFulfillmentRequest,
        NewPaymentRecord,
        OrderId,
        PaymentId,
        PaymentRecord,
        PaymentStatus,
    },
    traits::{FulfillmentLedgerDatabase, LedgerError},
};
use jsp_common::Rupees;
use mockall::mock;

mock! {
    pub LedgerDb {}
    impl FulfillmentLedgerDatabase for LedgerDb {
        fn url(&self) -> &str;
        async fn insert_payment_record(&self, payment: NewPaymentRecord) -> Result<(PaymentRecord, bool), LedgerError>;
        async fn create_request_if_absent(&self, request: NewFulfillmentRequest) -> Result<(FulfillmentRequest, bool), LedgerError>;
        async fn fetch_payment_record(&self, order_id: &OrderId, payment_id: &PaymentId) -> Result<Option<PaymentRecord>, LedgerError>;
        async fn fetch_request_for_payment(&self, order_id: &OrderId, payment_id: &PaymentId) -> Result<Option<FulfillmentRequest>, LedgerError>;
        async fn fetch_request_by_id(&self, id: i64) -> Result<Option<FulfillmentRequest>, LedgerError>;
        async fn advance_request_status(&self, id: i64, new_status: FulfillmentStatus) -> Result<FulfillmentRequest, LedgerError>;
    }
}

pub fn stored_payment(order_id: &str, payment_id: &str) -> PaymentRecord {
    PaymentRecord {
        id: 1,
        order_id: OrderId::from(order_id.to_string()),
        payment_id: PaymentId::from(payment_id.to_string()),
        job_id: "UPSC-2025-071".into(),
        job_title: "Assistant Section Officer".into(),
        payer_email: "asha@example.com".into(),
        payer_name: "Asha Kumari".into(),
        payer_phone: None,
        amount: Rupees::from(750),
        status: PaymentStatus::Success,
        created_at: Utc::now(),
    }
}

pub fn stored_request(order_id: &str, payment_id: &str) -> FulfillmentRequest {
    FulfillmentRequest {
        id: 1,
        order_id: OrderId::from(order_id.to_string()),
        payment_id: PaymentId::from(payment_id.to_string()),
        job_id: "UPSC-2025-071".into(),
        job_title: "Assistant Section Officer".into(),
        payer_email: "asha@example.com".into(),
        payer_name: "Asha Kumari".into(),
        payer_phone: None,
        amount: Rupees::from(750),
        status: FulfillmentStatus::Pending,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
