//! Contact form endpoint
//!
//! `POST /send-contact-email` relays one submission; `OPTIONS` on the same
//! path answers CORS preflights. CORS headers themselves are added to every
//! response by the router (see `build_router`).

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::RelayError;
use crate::AppState;

/// Success body
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// POST /send-contact-email
///
/// The body is read raw so that parse failures surface as the relay's own
/// `invalid request body` error rather than axum's JSON rejection.
pub async fn send_contact_email(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContactResponse>, RelayError> {
    let request_id = Uuid::new_v4();

    state
        .relay
        .handle_body(&body)
        .instrument(info_span!("contact", %request_id))
        .await?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Emails sent successfully".to_string(),
    }))
}

/// OPTIONS /send-contact-email
///
/// Answers immediately with no body, whatever the request carried.
pub async fn contact_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
