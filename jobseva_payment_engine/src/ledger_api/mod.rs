//! # Fulfillment ledger public API
//!
//! The programmatic surface of the payment engine. An API instance is created by supplying a
//! database backend that implements [`crate::traits::FulfillmentLedgerDatabase`]:
//!
//! ```rust,ignore
//! use jobseva_payment_engine::{FulfillmentApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/jobseva.db", 25).await?;
//! let api = FulfillmentApi::new(db, gateway_secret);
//! let request = api.record_verified_payment(claim).await?;
//! ```

mod errors;
mod fulfillment_api;
mod payment_objects;

pub use errors::LedgerApiError;
pub use fulfillment_api::FulfillmentApi;
pub use payment_objects::PaymentClaim;
