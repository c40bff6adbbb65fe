//! # DNR Common Library
//!
//! Shared code for the DNR Transmissions site services:
//! - Common error type
//! - Easing curves used by the splash animation
//! - Layered configuration resolution (CLI > env > TOML > default)

pub mod config;
pub mod easing;
pub mod error;

pub use easing::Easing;
pub use error::{Error, Result};
