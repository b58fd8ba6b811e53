use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid server payment url: {0:?}")]
    InvalidServerUrl(String),
    #[error("Payments must be started from within a Tokio runtime")]
    NoRuntime,
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("Gateway error: {0}")]
    Gateway(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
