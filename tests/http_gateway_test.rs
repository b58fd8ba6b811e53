mod common;

use common::{APPROVED, DECLINED, quiet_coordinator, request};
use dropin_confirm::domain::outcome::PaymentOutcome;
use dropin_confirm::domain::ports::DropInResult;
use dropin_confirm::infrastructure::in_memory::ScriptedCollector;
use dropin_confirm::interfaces::http::confirmation_gateway::HttpConfirmationGateway;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn nonce_collector(nonce: &str) -> Arc<ScriptedCollector> {
    Arc::new(ScriptedCollector::new(Ok(DropInResult::with_nonce(nonce))))
}

#[tokio::test]
async fn test_posts_form_body_and_reads_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/checkout")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body("nounce=abc123&amount=12.5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(APPROVED)
        .expect(1)
        .create_async()
        .await;

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let url = format!("{}/checkout", server.url());
    let result = coordinator
        .run_attempt(nonce_collector("abc123"), request(&url, dec!(12.5)))
        .await;

    mock.assert_async().await;
    assert_eq!(result.outcome, PaymentOutcome::Success);
    assert_eq!(result.message, "Payment has been done!");
}

#[tokio::test]
async fn test_declined_status_is_failed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/checkout")
        .with_body(DECLINED)
        .create_async()
        .await;

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let url = format!("{}/checkout", server.url());
    let result = coordinator
        .run_attempt(nonce_collector("abc123"), request(&url, dec!(1)))
        .await;

    assert_eq!(result.outcome, PaymentOutcome::Failed);
    assert_eq!(result.code(), 101);
}

#[tokio::test]
async fn test_html_error_page_is_failed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/checkout")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let url = format!("{}/checkout", server.url());
    let result = coordinator
        .run_attempt(nonce_collector("abc123"), request(&url, dec!(1)))
        .await;

    assert_eq!(result.outcome, PaymentOutcome::Failed);
}

#[tokio::test]
async fn test_status_code_is_not_consulted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/checkout")
        .with_status(202)
        .with_body(APPROVED)
        .create_async()
        .await;

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let url = format!("{}/checkout", server.url());
    let result = coordinator
        .run_attempt(nonce_collector("abc123"), request(&url, dec!(1)))
        .await;

    assert!(result.is_success());
}

#[tokio::test]
async fn test_empty_body_is_unknown() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/checkout")
        .with_status(200)
        .create_async()
        .await;

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let url = format!("{}/checkout", server.url());
    let result = coordinator
        .run_attempt(nonce_collector("abc123"), request(&url, dec!(1)))
        .await;

    assert_eq!(result.outcome, PaymentOutcome::Unknown);
    assert_eq!(result.message, "Something went wrong please try again!");
}

#[tokio::test]
async fn test_unreachable_server_is_unknown_with_error_description() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/checkout", listener.local_addr().unwrap());
    // Free the port so the connection is refused.
    drop(listener);

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let result = coordinator
        .run_attempt(nonce_collector("abc123"), request(&url, dec!(1)))
        .await;

    assert_eq!(result.outcome, PaymentOutcome::Unknown);
    assert_ne!(result.message, PaymentOutcome::Unknown.message());
}

#[tokio::test]
async fn test_cancelled_drop_in_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let coordinator = quiet_coordinator(Arc::new(HttpConfirmationGateway::new()));
    let url = format!("{}/checkout", server.url());
    let collector = Arc::new(ScriptedCollector::new(Ok(DropInResult::cancelled())));
    let result = coordinator
        .run_attempt(collector, request(&url, dec!(1)))
        .await;

    mock.assert_async().await;
    assert_eq!(result.outcome, PaymentOutcome::Cancelled);
}
