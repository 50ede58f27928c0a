use actix_web::{http::StatusCode, web, web::ServiceConfig};
use jobseva_payment_engine::{
    db_types::{OrderId, PaymentId},
    helpers::sign_payment,
    traits::LedgerError,
    FulfillmentApi,
};
use jsp_common::Secret;
use serde_json::{json, Value};

use super::{
    helpers::post_request,
    mocks::{stored_payment, stored_request, MockLedgerDb},
};
use crate::routes::VerifyPaymentRoute;

fn gateway_secret() -> Secret<String> {
    Secret::new("endpoint-test-secret".to_string())
}

fn valid_signature() -> String {
    let order_id = OrderId::from("order_abc".to_string());
    let payment_id = PaymentId::from("pay_123".to_string());
    sign_payment(&gateway_secret(), &order_id, &payment_id)
}

fn callback_body(signature: &str) -> Value {
    json!({
        "razorpay_order_id": "order_abc",
        "razorpay_payment_id": "pay_123",
        "razorpay_signature": signature,
        "jobId": "UPSC-2025-071",
        "jobTitle": "Assistant Section Officer",
        "userEmail": "asha@example.com",
        "userName": "Asha Kumari",
        "amount": 750
    })
}

#[actix_web::test]
async fn valid_callback_returns_payment_id() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request(&callback_body(&valid_signature()), "/verify", configure_first_callback).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"paymentId":"pay_123"}"#);
}

#[actix_web::test]
async fn replayed_callback_returns_the_existing_request() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request(&callback_body(&valid_signature()), "/verify", configure_replay).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"paymentId":"pay_123"}"#);
}

#[actix_web::test]
async fn tampered_signature_is_rejected_without_writes() {
    let _ = env_logger::try_init().ok();
    // Valid hex, wrong digest. The backing mock has no expectations, so any write attempt panics.
    let forged = "ad4bf3a342f0df1597d70f014028946c8415ebd222e631696cac627a3fe88bab";
    let (status, body) = post_request(&callback_body(forged), "/verify", configure_untouched).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Payment signature verification failed","success":false}"#);
}

#[actix_web::test]
async fn storage_failure_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request(&callback_body(&valid_signature()), "/verify", configure_db_down).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("backend"), "unexpected body: {body}");
}

#[actix_web::test]
async fn missing_fields_are_a_bad_request() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "razorpay_order_id": "order_abc", "razorpay_payment_id": "pay_123" });
    let (status, _) = post_request(&body, "/verify", configure_untouched).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

fn configure_first_callback(cfg: &mut ServiceConfig) {
    let mut db = MockLedgerDb::new();
    db.expect_insert_payment_record().returning(|_| Ok((stored_payment("order_abc", "pay_123"), true)));
    db.expect_create_request_if_absent().returning(|_| Ok((stored_request("order_abc", "pay_123"), true)));
    register(cfg, db);
}

fn configure_replay(cfg: &mut ServiceConfig) {
    let mut db = MockLedgerDb::new();
    db.expect_insert_payment_record().returning(|_| Ok((stored_payment("order_abc", "pay_123"), false)));
    db.expect_create_request_if_absent().returning(|_| Ok((stored_request("order_abc", "pay_123"), false)));
    register(cfg, db);
}

fn configure_untouched(cfg: &mut ServiceConfig) {
    register(cfg, MockLedgerDb::new());
}

fn configure_db_down(cfg: &mut ServiceConfig) {
    let mut db = MockLedgerDb::new();
    db.expect_insert_payment_record()
        .returning(|_| Err(LedgerError::DatabaseError("connection refused".to_string())));
    register(cfg, db);
}

fn register(cfg: &mut ServiceConfig, db: MockLedgerDb) {
    let api = FulfillmentApi::new(db, gateway_secret());
    cfg.service(VerifyPaymentRoute::<MockLedgerDb>::new()).app_data(web::Data::new(api));
}
