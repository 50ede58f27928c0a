//! A small client for the Razorpay Orders API.
//!
//! The gateway handles the buyer-facing charge; this crate only creates the gateway-side order
//! that binds a later verification call to a specific charge context. Orders are not persisted
//! locally — the gateway's own records are authoritative.

mod api;
mod config;
mod data_objects;
mod error;
mod helpers;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{OrderRequest, RazorpayOrder};
pub use error::RazorpayApiError;
pub use helpers::new_receipt_id;
