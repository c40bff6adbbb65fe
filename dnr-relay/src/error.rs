//! Error types for dnr-relay
//!
//! `RelayError` is what a contact submission can fail with; it renders as the
//! JSON error body the site's contact form expects (`{"error": "..."}`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Fixed message for a submission missing a required field
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required";

/// Fixed message for a body that is not a contact submission
pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// Which of the two outbound emails a delivery error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStage {
    /// Lead notification to the business
    Notification,
    /// Acknowledgement to the customer
    Confirmation,
}

impl std::fmt::Display for DeliveryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStage::Notification => write!(f, "notification"),
            DeliveryStage::Confirmation => write!(f, "confirmation"),
        }
    }
}

/// Failure reported by the email delivery provider
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Request never got a response (connect, TLS, timeout)
    #[error("{0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Provider answered 2xx with a body we could not read
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Contact relay error
#[derive(Debug, Error)]
pub enum RelayError {
    /// Body could not be parsed as a contact submission (400)
    #[error("{}", INVALID_BODY_MESSAGE)]
    MalformedRequest(#[source] serde_json::Error),

    /// A required field is missing or blank (400)
    #[error("{}", REQUIRED_FIELDS_MESSAGE)]
    Validation,

    /// An email could not be sent (500)
    ///
    /// `notification_delivered` is true when the confirmation failed after
    /// the business notification already went out. That email cannot be
    /// recalled, so the lead did reach the business even though the
    /// submission as a whole is reported as failed.
    #[error("{source}")]
    Delivery {
        stage: DeliveryStage,
        notification_delivered: bool,
        #[source]
        source: DeliveryError,
    },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MalformedRequest(_) | RelayError::Validation => StatusCode::BAD_REQUEST,
            RelayError::Delivery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
