//! Email delivery
//!
//! The relay only sees the `MailTransport` trait. `ResendTransport` is the
//! production implementation against the Resend HTTP API.
//!
//! # API Reference
//! - Endpoint: `POST {base_url}/emails`, bearer API key
//! - Success: `{"id": "..."}`
//! - Failure: `{"statusCode": 422, "name": "...", "message": "..."}`

use crate::error::DeliveryError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Resend API base URL
pub const RESEND_API_URL: &str = "https://api.resend.com";

/// Timeout for one send request
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One email ready to send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement of a sent email
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider message id
    pub id: String,
}

/// Delivers composed emails
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Transport name for logging
    fn name(&self) -> &'static str;

    /// Send one email
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Error body returned by Resend
#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
    name: Option<String>,
}

/// Resend HTTP API client
pub struct ResendTransport {
    http_client: Client,
    api_key: String,
    endpoint: String,
}

impl ResendTransport {
    /// Create a client against the public Resend API
    pub fn new(api_key: String) -> Result<Self, DeliveryError> {
        Self::with_base_url(api_key, RESEND_API_URL)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, DeliveryError> {
        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MailTransport for ResendTransport {
    fn name(&self) -> &'static str {
        "resend"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError> {
        debug!("POST {} ({} recipients)", self.endpoint, email.to.len());

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(format!("Email request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // Prefer the provider's own message, it is what the caller sees
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .ok()
                .and_then(|err| err.message.or(err.name))
                .unwrap_or_else(|| format!("Email provider returned HTTP {}", status.as_u16()));

            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<DeliveryReceipt>(&body)
            .map_err(|e| DeliveryError::InvalidResponse(e.to_string()))
    }
}
