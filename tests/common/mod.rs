#![allow(dead_code)]

use dropin_confirm::application::coordinator::{CoordinatorConfig, PaymentCoordinator};
use dropin_confirm::domain::payment::PaymentRequest;
use dropin_confirm::domain::ports::ConfirmationGatewayRef;
use rust_decimal::Decimal;

pub const APPROVED: &str = r#"{"status":"1"}"#;
pub const DECLINED: &str = r#"{"status":"0"}"#;

pub fn quiet_coordinator(gateway: ConfirmationGatewayRef) -> PaymentCoordinator {
    let config = CoordinatorConfig {
        log_enabled: false,
        ..CoordinatorConfig::default()
    };
    PaymentCoordinator::new(gateway, config)
}

pub fn request(server_url: &str, amount: Decimal) -> PaymentRequest {
    PaymentRequest::new("sandbox_tokenization_key", amount, "USD", server_url)
        .expect("valid payment request")
}
