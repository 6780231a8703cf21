//! EmailJS REST client.

use super::form::EmailRequest;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Provider answer: HTTP status plus the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub code: u16,
    pub text: String,
}

pub trait EmailTransport {
    fn send(
        &self,
        request: &EmailRequest,
    ) -> impl Future<Output = Result<DeliveryStatus, TransportError>> + Send;
}

pub struct EmailJsClient {
    client: Client,
    endpoint: String,
}

impl EmailJsClient {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_endpoint(EMAILJS_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl EmailTransport for EmailJsClient {
    async fn send(&self, request: &EmailRequest) -> Result<DeliveryStatus, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connection(format!("Cannot connect to {}", self.endpoint))
                } else {
                    TransportError::Http(e)
                }
            })?;

        let code = response.status().as_u16();
        let text = response.text().await?;
        Ok(DeliveryStatus { code, text })
    }
}
