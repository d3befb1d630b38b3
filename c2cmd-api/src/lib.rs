//! HTTP client for the AgentC2 review surface.
//!
//! Thin request/response layer over `/api/reviews`: no caching, no retries —
//! every call is a fresh request and every failure maps onto the two-way
//! error taxonomy in [`error`]. Reconciliation and retry policy live with the
//! caller; the next scheduled poll is the only automatic retry in the system.

pub mod client;
pub mod error;

pub use client::ReviewsClient;
pub use error::ApiError;
