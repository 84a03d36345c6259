//! Registry response classification
//!
//! Maps `(status, body)` from the compatibility endpoint to a
//! [`CompatibilityResult`]. Dispatch is a status lookup table; a body that
//! does not match the shape expected for its status is `Undetermined`,
//! never `Incompatible`.

use serde::Deserialize;
use tracing::{debug, warn};

use super::CompatibilityResult;

type StatusHandler = fn(u16, &[u8]) -> CompatibilityResult;

/// Known status codes. Anything else goes to [`unexpected_status`].
const STATUS_HANDLERS: &[(u16, StatusHandler)] = &[
    (200, compatibility_verdict),
    (404, registry_error),
    (422, registry_error),
    (500, registry_internal_error),
];

/// `200` body
#[derive(Debug, Deserialize)]
struct VerdictBody {
    is_compatible: bool,
    /// Present when the request asked for `verbose=true`
    #[serde(default)]
    messages: Vec<String>,
}

/// `404` / `422` body
#[derive(Debug, Deserialize)]
struct RegistryErrorBody {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    message: String,
}

/// Classify a compatibility-endpoint response
pub fn classify(status: u16, body: &[u8]) -> CompatibilityResult {
    let handler = STATUS_HANDLERS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, handler)| *handler)
        .unwrap_or(unexpected_status);

    handler(status, body)
}

fn compatibility_verdict(status: u16, body: &[u8]) -> CompatibilityResult {
    match serde_json::from_slice::<VerdictBody>(body) {
        Ok(verdict) => {
            debug!(is_compatible = verdict.is_compatible, "registry verdict");
            CompatibilityResult::determined(verdict.is_compatible, verdict.messages.join("; "), status)
        }
        Err(e) => {
            warn!(status, error = %e, "unparseable compatibility response");
            CompatibilityResult::undetermined(
                format!("error parsing compatibility response: {}", e),
                status,
                i64::from(status),
            )
        }
    }
}

fn registry_error(status: u16, body: &[u8]) -> CompatibilityResult {
    match serde_json::from_slice::<RegistryErrorBody>(body) {
        Ok(error) => {
            debug!(status, error_code = error.error_code, message = %error.message, "registry rejected schema");
            CompatibilityResult::rejected(error.message, status, error.error_code)
        }
        Err(e) => {
            warn!(status, error = %e, "unparseable registry error response");
            CompatibilityResult::undetermined(
                format!("error parsing error response: {}", e),
                status,
                i64::from(status),
            )
        }
    }
}

fn registry_internal_error(status: u16, _body: &[u8]) -> CompatibilityResult {
    warn!(status, "registry internal error");
    CompatibilityResult::undetermined(
        "internal server error - attempt to validate schema failed",
        status,
        0,
    )
}

fn unexpected_status(status: u16, body: &[u8]) -> CompatibilityResult {
    warn!(status, "unexpected status from compatibility endpoint");
    CompatibilityResult::undetermined(
        format!(
            "unexpected status code: {}, response: {}",
            status,
            String::from_utf8_lossy(body)
        ),
        status,
        i64::from(status),
    )
}
