//! Application layer orchestrating a payment attempt.
//!
//! This module defines the `PaymentCoordinator`, which drives the drop-in UI,
//! forwards the resulting nonce to the merchant server and hands a single
//! `PaymentResult` back to whoever started the attempt.

pub mod coordinator;
