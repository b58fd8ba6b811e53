use clap::Parser;
use dropin_confirm::application::coordinator::{CoordinatorConfig, PaymentCoordinator};
use dropin_confirm::domain::payment::PaymentRequest;
use dropin_confirm::domain::ports::DropInResult;
use dropin_confirm::infrastructure::in_memory::ScriptedCollector;
use dropin_confirm::interfaces::http::confirmation_gateway::HttpConfirmationGateway;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::process::ExitCode;
use std::sync::Arc;

/// Runs one drop-in payment attempt against a merchant server, with a scripted
/// nonce standing in for the payment UI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Merchant endpoint that confirms the nonce
    #[arg(long, env = "DROPIN_SERVER_URL")]
    server_url: String,

    /// Amount to charge
    #[arg(long, env = "DROPIN_AMOUNT")]
    amount: Decimal,

    #[arg(long, env = "DROPIN_CURRENCY", default_value = "USD")]
    currency: String,

    #[arg(
        long,
        env = "DROPIN_TOKENIZATION_KEY",
        default_value = "sandbox_tokenization_key"
    )]
    tokenization_key: String,

    /// Nonce the scripted drop-in hands back
    #[arg(long, env = "DROPIN_NONCE", default_value = "fake-valid-nonce")]
    nonce: String,

    /// Simulate the user cancelling the drop-in
    #[arg(long)]
    cancel: bool,

    /// Bundle id used to build the app-switch return scheme
    #[arg(long, env = "DROPIN_BUNDLE_ID")]
    bundle_id: Option<String>,

    /// Turn off coordinator logging
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let request = PaymentRequest::new(
        &cli.tokenization_key,
        cli.amount,
        &cli.currency,
        &cli.server_url,
    )
    .into_diagnostic()?;

    let config = CoordinatorConfig {
        log_enabled: !cli.quiet,
        bundle_id: cli.bundle_id,
    };
    let coordinator = PaymentCoordinator::new(Arc::new(HttpConfirmationGateway::new()), config);

    let drop_in = if cli.cancel {
        DropInResult::cancelled()
    } else {
        DropInResult::with_nonce(cli.nonce)
    };
    let collector = ScriptedCollector::new(Ok(drop_in));

    let result = coordinator
        .begin_payment(Arc::new(collector), request)
        .into_diagnostic()?
        .await;
    println!("{}", result);

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
