//! Schema registry HTTP client
//!
//! Thin pass-through over the registry's REST API plus the transport seam
//! used by [`crate::tester::CompatibilityTester`].
//!
//! # Design
//!
//! One `reqwest::Client` is built per [`RegistryClient`] with request and
//! connect timeouts from [`RegistryConfig`]. Cloning the client shares the
//! connection pool. Nothing is cached and nothing is retried.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{BoardError, Result};
use crate::request::{endpoint, CompatibilityRequest, REGISTRY_MEDIA_TYPE};
use crate::schema::{CompatibilityConfig, Schema, SubjectConfig};

/// Status and body of a registry response, before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends compatibility requests to the registry.
///
/// Returns `Err` only when no response was obtained; any HTTP status,
/// including 5xx, is an `Ok(RawResponse)`.
#[async_trait]
pub trait RegistryTransport: Send + Sync {
    async fn dispatch(&self, request: &CompatibilityRequest) -> Result<RawResponse>;
}

/// Client for the registry REST API
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: Url,
}

impl RegistryClient {
    /// Build a client from configuration
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /subjects`
    pub async fn list_subjects(&self) -> Result<Vec<String>> {
        let (status, body) = self.get(&["subjects"]).await?;
        let body = expect_ok(status, body)?;
        let subjects: Vec<String> = serde_json::from_slice(&body)?;
        debug!(count = subjects.len(), "listed subjects");
        Ok(subjects)
    }

    /// `GET /config/{subject}`; a 404 means the subject takes the global default
    pub async fn subject_config(&self, subject: &str) -> Result<SubjectConfig> {
        let (status, body) = self.get(&["config", subject]).await?;
        if status == StatusCode::NOT_FOUND {
            debug!(subject, "subject config not found, inherits global");
            return Ok(SubjectConfig::InheritsGlobal {
                subject: subject.to_string(),
            });
        }

        let body = expect_ok(status, body)?;
        let config: CompatibilityConfig = serde_json::from_slice(&body)?;
        Ok(SubjectConfig::Explicit {
            subject: subject.to_string(),
            config,
        })
    }

    /// Configs for every subject, in the given order
    pub async fn subject_configs(&self, subjects: &[String]) -> Result<Vec<SubjectConfig>> {
        let mut configs = Vec::with_capacity(subjects.len());
        for subject in subjects {
            configs.push(self.subject_config(subject).await?);
        }
        Ok(configs)
    }

    /// `GET /config`
    pub async fn global_config(&self) -> Result<CompatibilityConfig> {
        let (status, body) = self.get(&["config"]).await?;
        let body = expect_ok(status, body)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// All registered versions of `subject`, oldest first
    pub async fn schemas_for_subject(&self, subject: &str) -> Result<Vec<Schema>> {
        let (status, body) = self.get(&["schemas"]).await?;
        let body = expect_ok(status, body)?;
        let all: Vec<Schema> = serde_json::from_slice(&body)?;

        let mut schemas: Vec<Schema> = all.into_iter().filter(|s| s.subject == subject).collect();
        schemas.sort_by_key(|s| s.version);
        debug!(subject, count = schemas.len(), "fetched subject schemas");
        Ok(schemas)
    }

    /// `GET /schemas/ids/{id}`
    pub async fn schema_by_id(&self, id: u32) -> Result<Schema> {
        let id_segment = id.to_string();
        let (status, body) = self.get(&["schemas", "ids", &id_segment]).await?;
        if status == StatusCode::NOT_FOUND {
            return Err(BoardError::NotFound(format!("schema id {}", id)));
        }

        let body = expect_ok(status, body)?;
        let mut schema: Schema = serde_json::from_slice(&body)?;
        schema.id = id;
        Ok(schema)
    }

    async fn get(&self, segments: &[&str]) -> Result<(StatusCode, Vec<u8>)> {
        let url = endpoint(&self.base_url, segments)?;
        debug!(url = %url, "registry GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, REGISTRY_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| BoardError::Transport(format!("error reading response: {}", e)))?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl RegistryTransport for RegistryClient {
    async fn dispatch(&self, request: &CompatibilityRequest) -> Result<RawResponse> {
        let body = request.body()?;
        debug!(url = %request.url(), body = %body, "registry POST");

        let mut builder = self.client.post(request.url().clone()).body(body);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| BoardError::Transport(format!("error reading response: {}", e)))?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

fn expect_ok(status: StatusCode, body: Vec<u8>) -> Result<Vec<u8>> {
    if status == StatusCode::OK {
        return Ok(body);
    }
    let body = String::from_utf8_lossy(&body).into_owned();
    warn!(status = status.as_u16(), body = %body, "unexpected registry status");
    Err(BoardError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    })
}

fn transport_error(e: reqwest::Error) -> BoardError {
    if e.is_timeout() {
        BoardError::Transport(format!("request timed out: {}", e))
    } else {
        BoardError::Transport(format!("error making request: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = RegistryConfig {
            url: "mailto:registry@example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(RegistryClient::new(&config), Err(BoardError::InvalidConfig(_))));
    }

    #[test]
    fn test_expect_ok_passes_body_through() {
        assert_eq!(expect_ok(StatusCode::OK, b"[]".to_vec()).unwrap(), b"[]".to_vec());

        match expect_ok(StatusCode::SERVICE_UNAVAILABLE, b"down".to_vec()) {
            Err(BoardError::UnexpectedStatus { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("expected UnexpectedStatus, got {:?}", other),
        }
    }
}
