use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::fmt;
use url::Url;
use url::form_urlencoded;

/// The monetary amount to charge.
///
/// Passed through to the drop-in UI as given; the processor decides whether it
/// is acceptable. Rendered with `Decimal`'s `Display` wherever it crosses a boundary, so the
/// scale the caller used is the scale the server sees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Everything needed for exactly one payment attempt.
///
/// Construction is the only validation point: a `PaymentRequest` always holds a
/// parsed server url.
#[derive(Clone, PartialEq)]
pub struct PaymentRequest {
    pub tokenization_key: String,
    pub amount: Amount,
    pub currency_code: String,
    pub server_url: Url,
}

impl PaymentRequest {
    pub fn new(
        tokenization_key: impl Into<String>,
        amount: Decimal,
        currency_code: impl Into<String>,
        server_url: &str,
    ) -> Result<Self> {
        let server_url = parse_server_url(server_url)?;
        Ok(Self {
            tokenization_key: tokenization_key.into(),
            amount: Amount::new(amount),
            currency_code: currency_code.into(),
            server_url,
        })
    }

    /// The configuration handed to the collection UI.
    pub fn drop_in_request(&self) -> DropInRequest {
        DropInRequest {
            amount: self.amount,
            currency_code: self.currency_code.clone(),
            authorization: self.tokenization_key.clone(),
        }
    }
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("tokenization_key", &"<redacted>")
            .field("amount", &self.amount)
            .field("currency_code", &self.currency_code)
            .field("server_url", &self.server_url.as_str())
            .finish()
    }
}

fn parse_server_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(PaymentError::InvalidServerUrl(raw.to_string()));
    }
    Url::parse(raw).map_err(|_| PaymentError::InvalidServerUrl(raw.to_string()))
}

/// Input for the drop-in payment-method collection UI.
#[derive(Debug, Clone, PartialEq)]
pub struct DropInRequest {
    pub amount: Amount,
    pub currency_code: String,
    /// Tokenization key (or client token) authorizing the UI against the processor.
    pub authorization: String,
}

/// Body of the confirmation request sent to the merchant server.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationPayload {
    pub nonce: String,
    pub amount: Amount,
}

impl ConfirmationPayload {
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    pub fn new(nonce: impl Into<String>, amount: Amount) -> Self {
        Self {
            nonce: nonce.into(),
            amount,
        }
    }

    /// Serializes as `nounce=<nonce>&amount=<amount>`.
    ///
    /// The `nounce` spelling is what merchant servers read; do not correct it.
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("nounce", &self.nonce)
            .append_pair("amount", &self.amount.to_string())
            .finish()
    }
}
