//! Network layer: request/result message types and the background worker.

pub mod types;
pub mod worker;
