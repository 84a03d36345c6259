//! Compatibility testing against the registry
//!
//! Sequence for one test: wrap the candidate JSON in a [`SchemaEnvelope`],
//! build the [`CompatibilityRequest`], dispatch it, classify the response.
//!
//! Caller-input failures (bad JSON, empty JSON, empty subject, version < 1)
//! come back as `Err` and are never sent. Every failure after that point
//! is folded into an `Undetermined` [`CompatibilityResult`].

use reqwest::Url;
use tracing::{info, warn};

use crate::client::RegistryTransport;
use crate::compatibility::{classify, CompatibilityResult};
use crate::envelope::SchemaEnvelope;
use crate::error::Result;
use crate::request::CompatibilityRequest;

/// Runs compatibility tests through a [`RegistryTransport`]
#[derive(Debug, Clone)]
pub struct CompatibilityTester<T> {
    transport: T,
    base_url: Url,
    verbose: bool,
}

impl<T: RegistryTransport> CompatibilityTester<T> {
    pub fn new(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
            verbose: false,
        }
    }

    /// Request incompatibility explanations from the registry
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Test `raw_json` against `subject` at `version`.
    ///
    /// # Errors
    ///
    /// [`crate::BoardError::InvalidInput`] or [`crate::BoardError::InvalidRequest`]
    /// when the input is rejected locally.
    pub async fn test_compatibility(
        &self,
        subject: &str,
        version: i32,
        raw_json: &str,
    ) -> Result<CompatibilityResult> {
        let envelope = SchemaEnvelope::from_json_text(raw_json)?;
        let request =
            CompatibilityRequest::build(&self.base_url, subject, version, envelope)?.verbose(self.verbose);

        let response = match self.transport.dispatch(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(subject, version, error = %e, "compatibility request failed");
                return Ok(CompatibilityResult::internal_error(e.to_string()));
            }
        };

        let result = classify(response.status, &response.body);
        info!(
            subject,
            version,
            status = result.status_code(),
            verdict = %result.compatibility(),
            "compatibility tested"
        );
        Ok(result)
    }
}
