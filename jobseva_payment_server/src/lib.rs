//! # JobSeva payment server
//!
//! The thin HTTP layer over the payment engine. It is responsible for:
//! * Creating gateway-side orders for checkout (`POST /order`).
//! * Receiving payment callbacks, verifying their signatures and recording fulfillment requests
//!   (`POST /verify`).
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information. The gateway key pair is required; the server refuses to start without it.
//!
//! ## Routes
//! * `/health`: liveness check, returns 200 OK.
//! * `/fee/{category}`: the form-filling fee for a job category.
//! * `/order`: creates a gateway order for the checkout widget.
//! * `/verify`: verifies a payment callback and creates the fulfillment request.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
