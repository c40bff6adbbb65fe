//! HTTP API handlers for dnr-relay

pub mod contact;
pub mod status;

pub use contact::{contact_preflight, send_contact_email, ContactResponse};
pub use status::{build_info, health};
