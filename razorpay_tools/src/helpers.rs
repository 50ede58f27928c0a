use rand::{distributions::Alphanumeric, Rng};

/// Generates a receipt identifier for a new gateway order, e.g. `jsr_k3t9vq2m81az`. Receipts only
/// need to be unique enough for dashboard reconciliation; they carry no security weight.
pub fn new_receipt_id() -> String {
    let suffix: String =
        rand::thread_rng().sample_iter(&Alphanumeric).take(12).map(|c| (c as char).to_ascii_lowercase()).collect();
    format!("jsr_{suffix}")
}
