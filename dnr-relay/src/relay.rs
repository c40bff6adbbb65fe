//! Contact relay pipeline
//!
//! One submission goes through: parse → validate → deliver. Delivery is a
//! fixed two-stage pipeline, business notification first, customer
//! confirmation second, stopping at the first failure.
//!
//! A confirmation failure is still reported as a failed submission even
//! though the notification has already been delivered; there is no way to
//! recall it. The error records `notification_delivered = true` for that
//! case so the caller can tell the lead was not lost.

use crate::compose::{confirmation_email, notification_email};
use crate::error::{DeliveryStage, RelayError};
use crate::submission::ContactSubmission;
use crate::transport::{DeliveryReceipt, MailTransport, OutboundEmail};
use chrono::Datelike;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Addresses used for outbound mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    /// `From` header of both emails
    pub from_address: String,
    /// Inbox that receives lead notifications
    pub business_address: String,
}

/// Provider ids of the two emails sent for a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReceipt {
    pub notification: DeliveryReceipt,
    pub confirmation: DeliveryReceipt,
}

/// Result of relaying one submission
pub type RelayResult = Result<RelayReceipt, RelayError>;

/// Relays contact submissions into emails
///
/// Holds no per-request state; one instance serves all requests.
#[derive(Clone)]
pub struct ContactRelay {
    settings: RelaySettings,
    transport: Arc<dyn MailTransport>,
}

impl ContactRelay {
    pub fn new(settings: RelaySettings, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Parse a raw request body and relay it
    pub async fn handle_body(&self, body: &[u8]) -> RelayResult {
        let submission = ContactSubmission::from_json(body)?;
        self.handle(&submission).await
    }

    /// Validate a submission and send both emails
    pub async fn handle(&self, submission: &ContactSubmission) -> RelayResult {
        info!(
            name = %submission.name,
            email = %submission.email,
            phone = %submission.phone,
            vehicle_type = %submission.vehicle_type,
            "Received contact form submission"
        );

        submission.validate()?;

        // Stage 1: lead notification. Nothing has gone out if this fails.
        let notification = self
            .deliver(
                DeliveryStage::Notification,
                &notification_email(&self.settings, submission),
                false,
            )
            .await?;

        // Stage 2: customer confirmation. Reached only after stage 1
        // succeeded, so a failure here leaves the notification delivered.
        let year = chrono::Utc::now().year();
        let confirmation = self
            .deliver(
                DeliveryStage::Confirmation,
                &confirmation_email(&self.settings, submission, year),
                true,
            )
            .await?;

        Ok(RelayReceipt {
            notification,
            confirmation,
        })
    }

    /// Send one stage's email, tagging failures with the stage
    async fn deliver(
        &self,
        stage: DeliveryStage,
        email: &OutboundEmail,
        notification_delivered: bool,
    ) -> Result<DeliveryReceipt, RelayError> {
        match self.transport.send(email).await {
            Ok(receipt) => {
                info!(%stage, id = %receipt.id, transport = self.transport.name(), "Email sent");
                Ok(receipt)
            }
            Err(source) => {
                error!(%stage, transport = self.transport.name(), "Email send failed: {}", source);
                if notification_delivered {
                    warn!("Lead notification was already delivered; reporting failure to the customer anyway");
                }
                Err(RelayError::Delivery {
                    stage,
                    notification_delivered,
                    source,
                })
            }
        }
    }
}
