use super::payment::{ConfirmationPayload, DropInRequest};
use super::return_scheme::ReturnUrlScheme;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// What the drop-in UI hands back once the user is done with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropInResult {
    pub is_cancelled: bool,
    /// One-time token for the tokenized payment method.
    pub nonce: Option<String>,
}

impl DropInResult {
    pub fn with_nonce(nonce: impl Into<String>) -> Self {
        Self {
            is_cancelled: false,
            nonce: Some(nonce.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            is_cancelled: true,
            nonce: None,
        }
    }
}

/// An error reported by the drop-in UI, carrying the SDK's own description.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{description}")]
pub struct DropInError {
    pub description: String,
}

impl DropInError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// The externally supplied payment-method collection UI, bound to a host surface.
///
/// `present` resolves exactly once per call with either a result or an error.
#[async_trait]
pub trait PaymentCollector: Send + Sync {
    async fn set_return_url_scheme(&self, scheme: &ReturnUrlScheme);
    async fn present(
        &self,
        request: DropInRequest,
    ) -> std::result::Result<DropInResult, DropInError>;
    async fn dismiss(&self);
}

/// Delivers a confirmation to the merchant server and returns the raw response body.
#[async_trait]
pub trait ConfirmationGateway: Send + Sync {
    async fn confirm(&self, url: &Url, payload: &ConfirmationPayload) -> Result<Vec<u8>>;
}

pub type PaymentCollectorRef = Arc<dyn PaymentCollector>;
pub type ConfirmationGatewayRef = Arc<dyn ConfirmationGateway>;
