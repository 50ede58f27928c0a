use actix_web::{http::StatusCode, web, web::ServiceConfig};
use jsp_common::Secret;
use razorpay_tools::{RazorpayApi, RazorpayConfig};
use serde_json::json;

use super::helpers::{get_request, post_request};
use crate::routes::{create_order, fee, health};

#[actix_web::test]
async fn health_check() {
    let (status, body) = get_request("/health", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}

#[actix_web::test]
async fn fee_lookup_for_known_categories() {
    let (status, body) = get_request("/fee/UPSC", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"category":"UPSC","amount":750,"currency":"INR"}"#);

    let (status, body) = get_request("/fee/railway", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"category":"railway","amount":300,"currency":"INR"}"#);
}

#[actix_web::test]
async fn fee_lookup_for_unknown_category_is_the_default() {
    let (status, body) = get_request("/fee/gram-panchayat-peon", configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"category":"gram-panchayat-peon","amount":300,"currency":"INR"}"#);
}

#[actix_web::test]
async fn order_with_non_positive_amount_is_rejected() {
    let body = json!({
        "amount": 0,
        "jobId": "RRB-2025-113",
        "userEmail": "asha@example.com",
        "userName": "Asha Kumari"
    });
    let (status, body) = post_request(&body, "/order", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("amount must be positive"), "unexpected body: {body}");
}

#[actix_web::test]
async fn order_with_oversized_amount_is_rejected() {
    // Large enough that an unchecked rupee → paise conversion would overflow i64. Must be turned
    // away at validation, well before any arithmetic or outbound call.
    let body = json!({
        "amount": i64::MAX / 100 + 1,
        "jobId": "RRB-2025-113",
        "userEmail": "asha@example.com",
        "userName": "Asha Kumari"
    });
    let (status, body) = post_request(&body, "/order", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ceiling"), "unexpected body: {body}");
}

#[actix_web::test]
async fn order_with_blank_job_id_is_rejected() {
    let body = json!({
        "amount": 300,
        "jobId": "   ",
        "userEmail": "asha@example.com",
        "userName": "Asha Kumari"
    });
    let (status, body) = post_request(&body, "/order", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("jobId must not be empty"), "unexpected body: {body}");
}

#[actix_web::test]
async fn order_with_missing_fields_is_rejected() {
    // No userEmail or userName; deserialization itself fails
    let body = json!({ "amount": 300, "jobId": "RRB-2025-113" });
    let (status, _) = post_request(&body, "/order", configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unreachable_gateway_is_a_server_error() {
    let _ = env_logger::try_init().ok();
    let body = json!({
        "amount": 300,
        "jobId": "RRB-2025-113",
        "userEmail": "asha@example.com",
        "userName": "Asha Kumari"
    });
    let (status, body) = post_request(&body, "/order", configure).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("gateway"), "unexpected body: {body}");
}

fn configure(cfg: &mut ServiceConfig) {
    // Key pair is fake and the api url points at a closed local port, so any test that actually
    // reaches the outbound call fails fast with a connection error.
    let config = RazorpayConfig::new("rzp_test_0000000000".to_string(), Secret::new("not-a-real-secret".to_string()))
        .with_api_url("http://127.0.0.1:1");
    let gateway = RazorpayApi::new(config).expect("client builds with static config");
    cfg.service(health).service(fee).service(create_order).app_data(web::Data::new(gateway));
}
