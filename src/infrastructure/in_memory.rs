use crate::domain::payment::{ConfirmationPayload, DropInRequest};
use crate::domain::ports::{
    ConfirmationGateway, DropInError, DropInResult, PaymentCollector,
};
use crate::domain::return_scheme::ReturnUrlScheme;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

#[derive(Default)]
struct CollectorLog {
    schemes: Vec<ReturnUrlScheme>,
    presented: Vec<DropInRequest>,
    dismissals: usize,
}

/// A stand-in for the drop-in UI that answers every presentation with a fixed outcome.
///
/// Records everything the coordinator asks of it. Clones share the same record,
/// so a test can keep one clone and hand the other to the coordinator.
#[derive(Clone)]
pub struct ScriptedCollector {
    outcome: std::result::Result<DropInResult, DropInError>,
    log: Arc<RwLock<CollectorLog>>,
}

impl ScriptedCollector {
    pub fn new(outcome: std::result::Result<DropInResult, DropInError>) -> Self {
        Self {
            outcome,
            log: Arc::default(),
        }
    }

    pub async fn registered_schemes(&self) -> Vec<ReturnUrlScheme> {
        self.log.read().await.schemes.clone()
    }

    pub async fn presented(&self) -> Vec<DropInRequest> {
        self.log.read().await.presented.clone()
    }

    pub async fn dismiss_count(&self) -> usize {
        self.log.read().await.dismissals
    }
}

#[async_trait]
impl PaymentCollector for ScriptedCollector {
    async fn set_return_url_scheme(&self, scheme: &ReturnUrlScheme) {
        self.log.write().await.schemes.push(scheme.clone());
    }

    async fn present(
        &self,
        request: DropInRequest,
    ) -> std::result::Result<DropInResult, DropInError> {
        self.log.write().await.presented.push(request);
        self.outcome.clone()
    }

    async fn dismiss(&self) {
        self.log.write().await.dismissals += 1;
    }
}

/// A confirmation as the merchant server would have received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedConfirmation {
    pub url: Url,
    pub body: String,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(Vec<u8>),
    Error(String),
}

/// An in-memory merchant server.
///
/// Answers with a default reply, or a per-nonce one when configured, and keeps
/// every confirmation it was sent. Clones share the record.
#[derive(Clone)]
pub struct InMemoryGateway {
    default_reply: Reply,
    replies: HashMap<String, Reply>,
    received: Arc<RwLock<Vec<RecordedConfirmation>>>,
}

impl InMemoryGateway {
    /// Answers every confirmation with `body`.
    pub fn responding(body: impl Into<Vec<u8>>) -> Self {
        Self::with_default(Reply::Body(body.into()))
    }

    /// Fails every confirmation as if the network were down.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(Reply::Error(message.into()))
    }

    /// Answers confirmations carrying `nonce` with `body` instead of the default.
    pub fn with_reply_for(mut self, nonce: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.replies.insert(nonce.into(), Reply::Body(body.into()));
        self
    }

    pub async fn confirmations(&self) -> Vec<RecordedConfirmation> {
        self.received.read().await.clone()
    }

    fn with_default(default_reply: Reply) -> Self {
        Self {
            default_reply,
            replies: HashMap::new(),
            received: Arc::default(),
        }
    }
}

#[async_trait]
impl ConfirmationGateway for InMemoryGateway {
    async fn confirm(&self, url: &Url, payload: &ConfirmationPayload) -> Result<Vec<u8>> {
        self.received.write().await.push(RecordedConfirmation {
            url: url.clone(),
            body: payload.to_form_body(),
        });

        match self.replies.get(&payload.nonce).unwrap_or(&self.default_reply) {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Error(message) => Err(PaymentError::Gateway(message.clone())),
        }
    }
}
