use crate::domain::outcome::{PaymentOutcome, PaymentResult};
use crate::domain::payment::{ConfirmationPayload, PaymentRequest};
use crate::domain::ports::{
    ConfirmationGatewayRef, DropInError, DropInResult, PaymentCollectorRef,
};
use crate::domain::return_scheme::ReturnUrlScheme;
use crate::domain::server_response::ServerResponse;
use crate::error::{PaymentError, Result};
use log::Level;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

const ONE_TOUCH_SCHEME_ERROR: &str = "the operation couldn't be completed. application does not support one touch callback url scheme";
const ONE_TOUCH_HELP: &str = "The operation couldn't be completed. Application does not support One Touch callback URL scheme \n To know more visit https://developers.braintreepayments.com/guides/paypal/client-side/ios/v4";

static NEXT_ATTEMPT: AtomicU64 = AtomicU64::new(1);

/// Settings shared by every attempt a coordinator runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Gates every log line the coordinator emits.
    pub log_enabled: bool,
    /// Host bundle identifier. When set, `<bundle_id>.payments` is registered as
    /// the app-switch return scheme before the UI is presented.
    pub bundle_id: Option<String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            log_enabled: true,
            bundle_id: None,
        }
    }
}

/// Process-unique identifier of one payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(u64);

impl AttemptId {
    fn next() -> Self {
        Self(NEXT_ATTEMPT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an attempt started with [`PaymentCoordinator::begin_payment`].
///
/// Resolves exactly once with the attempt's result. Dropping the handle does not
/// stop the attempt.
#[derive(Debug)]
pub struct PaymentAttempt {
    id: AttemptId,
    receiver: oneshot::Receiver<PaymentResult>,
}

impl PaymentAttempt {
    pub fn id(&self) -> AttemptId {
        self.id
    }
}

impl Future for PaymentAttempt {
    type Output = PaymentResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A closed channel means the attempt task died before resolving.
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|_| PaymentOutcome::Unknown.into()))
    }
}

enum Step {
    Resolve(PaymentResult),
    Confirm(String),
}

/// Runs drop-in payment attempts and confirms their nonces with the merchant server.
///
/// Holds no per-attempt state: every attempt owns its own result channel, so
/// attempts may overlap freely.
#[derive(Clone)]
pub struct PaymentCoordinator {
    gateway: ConfirmationGatewayRef,
    config: CoordinatorConfig,
}

impl PaymentCoordinator {
    /// Creates a new `PaymentCoordinator`.
    ///
    /// # Arguments
    ///
    /// * `gateway` - Transport for the server confirmation request.
    /// * `config` - Logging and app-switch settings.
    pub fn new(gateway: ConfirmationGatewayRef, config: CoordinatorConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Starts a payment and reports the result through `on_complete`.
    ///
    /// The request is validated before anything else happens: an empty or
    /// unparseable `server_url` is returned as an error, no UI is presented and
    /// `on_complete` is never called. The same holds when no Tokio runtime is
    /// running. Otherwise `on_complete(success, result)` runs exactly once, on a
    /// Tokio task.
    pub fn make_payment<F>(
        &self,
        collector: PaymentCollectorRef,
        tokenization_key: &str,
        amount: Decimal,
        currency_code: &str,
        server_url: &str,
        on_complete: F,
    ) -> Result<AttemptId>
    where
        F: FnOnce(bool, PaymentResult) + Send + 'static,
    {
        let request = PaymentRequest::new(tokenization_key, amount, currency_code, server_url)?;
        let attempt = self.begin_payment(collector, request)?;
        let id = attempt.id();

        tokio::spawn(async move {
            let result = attempt.await;
            on_complete(result.is_success(), result);
        });

        Ok(id)
    }

    /// Starts a payment on a Tokio task and returns a handle to its result.
    ///
    /// Fails with [`PaymentError::NoRuntime`] when called outside a runtime.
    pub fn begin_payment(
        &self,
        collector: PaymentCollectorRef,
        request: PaymentRequest,
    ) -> Result<PaymentAttempt> {
        let runtime = Handle::try_current().map_err(|_| PaymentError::NoRuntime)?;
        let id = AttemptId::next();
        let (sender, receiver) = oneshot::channel();
        let coordinator = self.clone();

        runtime.spawn(async move {
            let result = coordinator.run(id, collector, request).await;
            // The caller may have dropped the handle; the result is already logged.
            let _ = sender.send(result);
        });

        Ok(PaymentAttempt { id, receiver })
    }

    /// Runs a whole attempt in place: collect a nonce, then confirm it.
    pub async fn run_attempt(
        &self,
        collector: PaymentCollectorRef,
        request: PaymentRequest,
    ) -> PaymentResult {
        self.run(AttemptId::next(), collector, request).await
    }

    async fn run(
        &self,
        id: AttemptId,
        collector: PaymentCollectorRef,
        request: PaymentRequest,
    ) -> PaymentResult {
        if let Some(bundle_id) = &self.config.bundle_id {
            let scheme = ReturnUrlScheme::for_bundle(bundle_id);
            collector.set_return_url_scheme(&scheme).await;
        }

        let presented = collector.present(request.drop_in_request()).await;
        let step = self.classify(id, presented);
        collector.dismiss().await;

        let result = match step {
            Step::Resolve(result) => result,
            Step::Confirm(nonce) => self.confirm(id, &request, nonce).await,
        };

        self.log(
            Level::Info,
            id,
            format_args!(
                "Payment finished with code: {}, and message: {}",
                result.code(),
                result.message
            ),
        );
        result
    }

    fn classify(
        &self,
        id: AttemptId,
        presented: std::result::Result<DropInResult, DropInError>,
    ) -> Step {
        match presented {
            Err(err) => {
                if is_one_touch_scheme_error(&err.description) {
                    self.log(Level::Warn, id, format_args!("{}", ONE_TOUCH_HELP));
                }
                Step::Resolve(PaymentResult::new(PaymentOutcome::Unknown, err.description))
            }
            Ok(result) if result.is_cancelled => Step::Resolve(PaymentOutcome::Cancelled.into()),
            Ok(DropInResult {
                nonce: Some(nonce), ..
            }) => Step::Confirm(nonce),
            Ok(_) => {
                self.log(
                    Level::Warn,
                    id,
                    format_args!("Drop-in returned neither a nonce, a cancellation nor an error"),
                );
                Step::Resolve(PaymentOutcome::Unknown.into())
            }
        }
    }

    async fn confirm(&self, id: AttemptId, request: &PaymentRequest, nonce: String) -> PaymentResult {
        let payload = ConfirmationPayload::new(nonce, request.amount);
        self.log(
            Level::Debug,
            id,
            format_args!("Confirming payment with {}", request.server_url),
        );

        match self.gateway.confirm(&request.server_url, &payload).await {
            Err(err) => PaymentResult::new(PaymentOutcome::Unknown, err.to_string()),
            Ok(body) if body.is_empty() => PaymentOutcome::Unknown.into(),
            Ok(body) => ServerResponse::outcome(&body).into(),
        }
    }

    fn log(&self, level: Level, id: AttemptId, message: fmt::Arguments<'_>) {
        if self.config.log_enabled {
            log::log!(level, "[PAYMENT {}] {}", id, message);
        }
    }
}

fn is_one_touch_scheme_error(description: &str) -> bool {
    description.to_lowercase().replace('\u{2019}', "'") == ONE_TOUCH_SCHEME_ERROR
}
