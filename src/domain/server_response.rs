use super::outcome::PaymentOutcome;
use serde_json::Value;

/// The JSON object the merchant server answers a confirmation with.
///
/// Only `status` is read; any other fields are ignored.
#[derive(Debug, PartialEq, Default)]
pub struct ServerResponse {
    pub status: Option<Value>,
}

impl ServerResponse {
    /// Parses a body that must be a JSON object. Arrays, scalars and anything
    /// that is not JSON yield `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            Value::Object(mut fields) => Some(Self {
                status: fields.remove("status"),
            }),
            _ => None,
        }
    }

    /// Classifies a non-empty confirmation body.
    ///
    /// Success only when the body is a JSON object whose `status` reads as `"1"`.
    /// Everything else, including bodies that are not JSON at all, is a failure.
    pub fn outcome(body: &[u8]) -> PaymentOutcome {
        match Self::parse(body) {
            Some(response) if response.is_approved() => PaymentOutcome::Success,
            _ => PaymentOutcome::Failed,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status.as_ref().and_then(status_text).as_deref() == Some("1")
    }
}

fn status_text(status: &Value) -> Option<String> {
    match status {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

// Integral floats read without a fraction: `1.0` is `1`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
