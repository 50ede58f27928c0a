//! Service fee schedule.
//!
//! Fees are keyed on the job's category label as it appears in the listing. The label is free-form
//! text supplied by the listings feed, so unknown categories fall back to [`DEFAULT_SERVICE_FEE`]
//! rather than failing the checkout.

use jsp_common::Rupees;

/// Charged for any category without an explicit entry in the schedule.
pub const DEFAULT_SERVICE_FEE: i64 = 300;

/// Maps a job category to the form-filling fee in whole rupees. Pure and total: every input
/// resolves to a fee. Matching is case-insensitive.
pub fn fee_for_category(category: &str) -> Rupees {
    let fee = match category.trim().to_ascii_lowercase().as_str() {
        "upsc" => 750,
        "state psc" => 600,
        "ssc" => 500,
        "banking" => 400,
        "defence" => 400,
        "teaching" => 350,
        "railway" => 300,
        _ => DEFAULT_SERVICE_FEE,
    };
    Rupees::from(fee)
}
