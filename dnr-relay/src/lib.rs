//! dnr-relay library - contact form email relay
//!
//! Turns a website contact-form submission into two emails: a lead
//! notification for the business and a confirmation for the customer.

use axum::http::{header, HeaderValue};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod compose;
pub mod config;
pub mod error;
pub mod relay;
pub mod submission;
pub mod transport;

pub use error::{DeliveryError, DeliveryStage, RelayError};
pub use relay::{ContactRelay, RelayReceipt, RelayResult, RelaySettings};
pub use submission::ContactSubmission;
pub use transport::{DeliveryReceipt, MailTransport, OutboundEmail, ResendTransport};

/// Headers the site's browser client may send
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Submission relay (immutable, shared by all requests)
    pub relay: ContactRelay,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(relay: ContactRelay) -> Self {
        Self {
            relay,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// Every response, errors and preflights included, allows any origin.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route(
            "/send-contact-email",
            post(api::send_contact_email).options(api::contact_preflight),
        )
        .route("/health", get(api::health))
        .route("/build_info", get(api::build_info))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}
