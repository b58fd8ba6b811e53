use crate::domain::payment::ConfirmationPayload;
use crate::domain::ports::ConfirmationGateway;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// Posts confirmations to the merchant server over HTTP.
///
/// No timeout or retry is configured beyond what the `reqwest::Client` carries.
/// The response status code is not inspected; only the body decides the outcome.
#[derive(Clone, Default)]
pub struct HttpConfirmationGateway {
    client: reqwest::Client,
}

impl HttpConfirmationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with a proxy or custom timeout.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfirmationGateway for HttpConfirmationGateway {
    async fn confirm(&self, url: &Url, payload: &ConfirmationPayload) -> Result<Vec<u8>> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, ConfirmationPayload::CONTENT_TYPE)
            .body(payload.to_form_body())
            .send()
            .await?;

        Ok(response.bytes().await?.to_vec())
    }
}
