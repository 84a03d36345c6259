//! Compatibility-check request description
//!
//! Built without performing I/O; [`crate::client::RegistryTransport`]
//! implementations dispatch it.

use reqwest::Url;

use crate::envelope::SchemaEnvelope;
use crate::error::{BoardError, Result};

/// Media type the registry's v1 REST API negotiates on
pub const REGISTRY_MEDIA_TYPE: &str = "application/vnd.schemaregistry.v1+json";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// `POST {base}/compatibility/subjects/{subject}/versions/{version}`
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityRequest {
    url: Url,
    subject: String,
    version: i32,
    envelope: SchemaEnvelope,
}

impl CompatibilityRequest {
    /// Build a request against `base` for `subject` at `version`.
    ///
    /// `subject` must be non-empty and `version` positive.
    pub fn build(base: &Url, subject: &str, version: i32, envelope: SchemaEnvelope) -> Result<Self> {
        if subject.trim().is_empty() {
            return Err(BoardError::InvalidRequest("subject must not be empty".to_string()));
        }
        if version <= 0 {
            return Err(BoardError::InvalidRequest(format!(
                "version must be positive, got {}",
                version
            )));
        }

        let version_segment = version.to_string();
        let url = endpoint(
            base,
            &["compatibility", "subjects", subject, "versions", &version_segment],
        )?;

        Ok(Self {
            url,
            subject: subject.to_string(),
            version,
            envelope,
        })
    }

    /// Ask the registry to explain incompatibilities
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.url.query_pairs_mut().append_pair("verbose", "true");
        }
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn envelope(&self) -> &SchemaEnvelope {
        &self.envelope
    }

    /// Content-negotiation headers, as `(name, value)` pairs
    pub fn headers(&self) -> [(&'static str, &'static str); 2] {
        [("Accept", REGISTRY_MEDIA_TYPE), ("Content-Type", JSON_CONTENT_TYPE)]
    }

    pub fn body(&self) -> Result<String> {
        self.envelope.to_body()
    }
}

/// Append escaped path segments to the registry base URL
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| BoardError::InvalidConfig(format!("registry URL cannot be a base: {}", base)))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}
