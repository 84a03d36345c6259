//! Compatibility verdicts
//!
//! A compatibility test ends in one of three states. `Undetermined` is never
//! folded into `Incompatible`: it means the registry's answer is unknown
//! (transport failure, unreadable body, 5xx or unexpected status).

mod classify;
mod message;

pub use classify::classify;
pub use message::{normalize_message, MAX_MESSAGE_CHARS};

use serde::Serialize;
use std::fmt;

/// Tri-state compatibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "Option<bool>")]
pub enum Compatibility {
    Compatible,
    Incompatible,
    Undetermined,
}

impl Compatibility {
    /// `Some(bool)` when the registry gave an answer
    pub fn as_option(&self) -> Option<bool> {
        match self {
            Compatibility::Compatible => Some(true),
            Compatibility::Incompatible => Some(false),
            Compatibility::Undetermined => None,
        }
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, Compatibility::Undetermined)
    }
}

impl From<bool> for Compatibility {
    fn from(compatible: bool) -> Self {
        if compatible {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible
        }
    }
}

impl From<Compatibility> for Option<bool> {
    fn from(value: Compatibility) -> Self {
        value.as_option()
    }
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::Compatible => f.write_str("compatible"),
            Compatibility::Incompatible => f.write_str("incompatible"),
            Compatibility::Undetermined => f.write_str("undetermined"),
        }
    }
}

/// Outcome of one compatibility test.
///
/// Serializes to `{"is_compatible", "error_code", "message", "http_status"}`.
/// The message is always normalized on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityResult {
    #[serde(rename = "is_compatible")]
    compatibility: Compatibility,
    error_code: i64,
    message: String,
    #[serde(rename = "http_status")]
    status_code: u16,
}

impl CompatibilityResult {
    pub fn new(
        compatibility: Compatibility,
        message: impl AsRef<str>,
        status_code: u16,
        error_code: i64,
    ) -> Self {
        Self {
            compatibility,
            error_code,
            message: normalize_message(message.as_ref()),
            status_code,
        }
    }

    /// The registry answered; `error_code` is 0
    pub fn determined(compatible: bool, message: impl AsRef<str>, status_code: u16) -> Self {
        Self::new(compatible.into(), message, status_code, 0)
    }

    /// The registry rejected the request with a recognised error body
    pub fn rejected(message: impl AsRef<str>, status_code: u16, error_code: i64) -> Self {
        Self::new(Compatibility::Incompatible, message, status_code, error_code)
    }

    pub fn undetermined(message: impl AsRef<str>, status_code: u16, error_code: i64) -> Self {
        Self::new(Compatibility::Undetermined, message, status_code, error_code)
    }

    /// Local failure before or while reaching the registry
    pub fn internal_error(message: impl AsRef<str>) -> Self {
        Self::undetermined(message, 500, 500)
    }

    /// Caller input was rejected; nothing was sent to the registry
    pub fn bad_request(message: impl AsRef<str>) -> Self {
        Self::undetermined(message, 400, 400)
    }

    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    pub fn is_compatible(&self) -> Option<bool> {
        self.compatibility.as_option()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn error_code(&self) -> i64 {
        self.error_code
    }

    pub fn is_bad_request(&self) -> bool {
        self.status_code == 400
    }
}
