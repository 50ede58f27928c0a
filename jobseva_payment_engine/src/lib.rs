//! JobSeva Payment Engine
//!
//! Core logic for the JobSeva form-filling service: deciding, with cryptographic certainty,
//! whether a gateway payment callback is genuine, and durably turning a verified payment into a
//! trackable fulfillment request. It is provider-agnostic with respect to storage.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`] implements the [`mod@traits`] contracts).
//!    You should never need to access the database directly; use the public API instead. The
//!    exception is the data types, defined in [`mod@db_types`], which are public.
//! 2. The public API ([`FulfillmentApi`]): signature verification and the
//!    payment → fulfillment-request flow, plus status advancement for the operations workflow.
//! 3. Pure helpers: the fee schedule ([`mod@fees`]) and the payment signature scheme
//!    ([`mod@helpers`]).

pub mod db_types;
pub mod fees;
pub mod helpers;
mod ledger_api;
mod sqlite;
pub mod traits;

pub use ledger_api::{FulfillmentApi, LedgerApiError, PaymentClaim};
pub use sqlite::SqliteDatabase;
