//! Shared test helpers: a scripted, recording mail transport

#![allow(dead_code)]

use async_trait::async_trait;
use dnr_relay::{
    build_router, AppState, ContactRelay, DeliveryError, DeliveryReceipt, MailTransport,
    OutboundEmail, RelaySettings,
};
use std::sync::{Arc, Mutex};

pub const BUSINESS_ADDRESS: &str = "leads@example.com";
pub const FROM_ADDRESS: &str = "DNR Transmissions <onboarding@resend.dev>";

/// Transport that records every send and fails on chosen attempts
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    /// 1-based send attempts that fail
    fail_on: Vec<usize>,
}

impl RecordingTransport {
    pub fn always_ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_on(attempts: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_on: attempts.to_vec(),
        })
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, DeliveryError> {
        let attempt = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(email.clone());
            sent.len()
        };

        if self.fail_on.contains(&attempt) {
            return Err(DeliveryError::Rejected {
                status: 422,
                message: format!("send {} rejected", attempt),
            });
        }

        Ok(DeliveryReceipt {
            id: format!("msg-{}", attempt),
        })
    }
}

pub fn settings() -> RelaySettings {
    RelaySettings {
        from_address: FROM_ADDRESS.to_string(),
        business_address: BUSINESS_ADDRESS.to_string(),
    }
}

pub fn relay_with(transport: Arc<RecordingTransport>) -> ContactRelay {
    ContactRelay::new(settings(), transport)
}

pub fn app_with(transport: Arc<RecordingTransport>) -> axum::Router {
    build_router(AppState::new(relay_with(transport)))
}
