//! Interface contracts for fulfillment ledger database *backends*.
//!
//! The document store behind the ledger is treated as an external collaborator: per-record reads
//! and writes only, no cross-record transactions. The one concession backends must make is that
//! creating a record keyed by `(order_id, payment_id)` has to be a *conditional* create — an
//! insert that is a no-op when a record for that key already exists — because two verification
//! calls for the same payment may race (a client double-submit, or a webhook racing a client-side
//! confirmation). A read followed by an unconditioned write has a race window and is not an
//! acceptable implementation.
//!
//! * [`FulfillmentLedgerDatabase`] defines the behaviour backends must expose to support the
//!   verification → ledger flow and the operations workflow's status updates.

mod ledger_database;

pub use ledger_database::{FulfillmentLedgerDatabase, LedgerError};
