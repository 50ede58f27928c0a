//! # Payment signature format
//!
//! When a buyer completes a charge, Razorpay hands the client a `(order_id, payment_id, signature)`
//! triple. The signature is
//!
//! ```text
//!     HMAC-SHA256(key_secret, "{order_id}|{payment_id}")
//! ```
//!
//! hex-encoded. Because the gateway signs the order id and payment id *together*, neither value can
//! be swapped out independently of the other. The server recomputes the HMAC with its own copy of
//! the shared secret and compares in constant time; this recomputation is the sole authority for
//! "this payment is genuine". Client-supplied status fields or amount matches are never a
//! substitute.

use hmac::{Hmac, Mac};
use jsp_common::Secret;
use sha2::Sha256;

use crate::db_types::{OrderId, PaymentId};

type HmacSha256 = Hmac<Sha256>;

/// The message the gateway signs: `{order_id}|{payment_id}`.
pub fn signature_message(order_id: &OrderId, payment_id: &PaymentId) -> String {
    format!("{}|{}", order_id.as_str(), payment_id.as_str())
}

/// Recomputes the gateway signature for the given ids and compares it against the supplied
/// hex-encoded signature in constant time. Malformed hex simply fails verification.
pub fn verify_payment_signature(
    secret: &Secret<String>,
    order_id: &OrderId,
    payment_id: &PaymentId,
    signature: &str,
) -> bool {
    let supplied = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let mut mac = match HmacSha256::new_from_slice(secret.reveal().as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(signature_message(order_id, payment_id).as_bytes());
    // Mac::verify_slice is a constant-time comparison
    mac.verify_slice(&supplied).is_ok()
}

/// Produces the hex-encoded signature the gateway would emit for the given ids. Used by tests and
/// operator tooling; the server itself only ever verifies.
pub fn sign_payment(secret: &Secret<String>, order_id: &OrderId, payment_id: &PaymentId) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.reveal().as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(signature_message(order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod test {
    use super::*;

    fn secret() -> Secret<String> {
        Secret::new("form-seva-test-secret".to_string())
    }

    fn ids() -> (OrderId, PaymentId) {
        (OrderId::from("order_abc".to_string()), PaymentId::from("pay_123".to_string()))
    }

    // HMAC-SHA256("form-seva-test-secret", "order_abc|pay_123")
    const EXPECTED: &str = "00bb80c8589862051fdf55f33f2b7b33b776ff275f635b832f9bbf0bfccf1d19";

    #[test]
    fn message_format() {
        let (order_id, payment_id) = ids();
        assert_eq!(signature_message(&order_id, &payment_id), "order_abc|pay_123");
    }

    #[test]
    fn valid_signature_verifies() {
        let (order_id, payment_id) = ids();
        assert_eq!(sign_payment(&secret(), &order_id, &payment_id), EXPECTED);
        assert!(verify_payment_signature(&secret(), &order_id, &payment_id, EXPECTED));
    }

    #[test]
    fn any_single_character_mutation_fails() {
        let (order_id, payment_id) = ids();
        let mut tampered = EXPECTED.to_string();
        tampered.replace_range(0..1, "1");
        assert!(!verify_payment_signature(&secret(), &order_id, &payment_id, &tampered));

        let wrong_order = OrderId::from("order_abd".to_string());
        assert!(!verify_payment_signature(&secret(), &wrong_order, &payment_id, EXPECTED));

        let wrong_payment = PaymentId::from("pay_124".to_string());
        assert!(!verify_payment_signature(&secret(), &order_id, &wrong_payment, EXPECTED));
        // The signature for the mutated payment id is a different digest entirely
        assert_eq!(
            sign_payment(&secret(), &order_id, &wrong_payment),
            "ad4bf3a342f0df1597d70f014028946c8415ebd222e631696cac627a3fe88bab"
        );
    }

    #[test]
    fn malformed_hex_fails_without_panicking() {
        let (order_id, payment_id) = ids();
        assert!(!verify_payment_signature(&secret(), &order_id, &payment_id, "not-hex-at-all"));
        assert!(!verify_payment_signature(&secret(), &order_id, &payment_id, ""));
        // Valid hex, wrong length
        assert!(!verify_payment_signature(&secret(), &order_id, &payment_id, "00bb80"));
    }

    #[test]
    fn signatures_are_secret_dependent() {
        let (order_id, payment_id) = ids();
        let other = Secret::new("a-different-secret".to_string());
        assert!(!verify_payment_signature(&other, &order_id, &payment_id, EXPECTED));
    }
}
