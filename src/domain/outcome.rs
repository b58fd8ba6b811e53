use std::fmt;

/// The closed set of ways a payment attempt can end.
///
/// Every variant has a fixed numeric code and a fixed, non-localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentOutcome {
    Success,
    Failed,
    Cancelled,
    Unknown,
}

impl PaymentOutcome {
    pub fn code(&self) -> i32 {
        match self {
            PaymentOutcome::Success => 100,
            PaymentOutcome::Failed => 101,
            PaymentOutcome::Cancelled => 102,
            PaymentOutcome::Unknown => 103,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PaymentOutcome::Success => "Payment has been done!",
            PaymentOutcome::Failed => "Payment has been failed!",
            PaymentOutcome::Cancelled => "Payment has been cancelled!",
            PaymentOutcome::Unknown => "Something went wrong please try again!",
        }
    }
}

/// What the caller receives when an attempt concludes.
///
/// The message is the outcome's fixed message, except for `Unknown` results
/// raised by the collection UI or the transport, which carry the underlying
/// error description instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentResult {
    pub outcome: PaymentOutcome,
    pub message: String,
}

impl PaymentResult {
    pub fn new(outcome: PaymentOutcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        self.outcome.code()
    }

    pub fn is_success(&self) -> bool {
        self.outcome == PaymentOutcome::Success
    }
}

impl From<PaymentOutcome> for PaymentResult {
    fn from(outcome: PaymentOutcome) -> Self {
        Self::new(outcome, outcome.message())
    }
}

impl fmt::Display for PaymentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.code(), self.message)
    }
}
