//! Domain types for a single drop-in payment attempt.

pub mod outcome;
pub mod payment;
pub mod ports;
pub mod return_scheme;
pub mod server_response;
