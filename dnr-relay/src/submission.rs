//! Contact form submission
//!
//! Mirrors the JSON the site's contact form posts:
//! `{ name, email, phone, vehicleType, message }`, all strings.

use crate::error::RelayError;
use serde::{Deserialize, Deserializer};

/// One contact form submission
///
/// Missing and `null` fields deserialize to empty strings so that an absent
/// required field is reported as a validation error rather than a malformed
/// body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub vehicle_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContactSubmission {
    /// Parse a request body
    pub fn from_json(body: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(body).map_err(RelayError::MalformedRequest)
    }

    /// Check the required fields
    ///
    /// Name, email and message must contain something other than
    /// whitespace. The email format is not checked.
    pub fn validate(&self) -> Result<(), RelayError> {
        let required = [&self.name, &self.email, &self.message];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(RelayError::Validation);
        }
        Ok(())
    }
}
