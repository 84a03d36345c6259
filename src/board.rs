//! Board facade
//!
//! The operations a presentation layer calls: browse subjects and configs,
//! test a candidate schema, validate a payload.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::client::RegistryClient;
use crate::compatibility::CompatibilityResult;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::schema::{CompatibilityConfig, Schema, SubjectConfig};
use crate::tester::CompatibilityTester;
use crate::validation::{self, ValidationOutcome};

/// Home-page data: global config plus every subject's config
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub global: CompatibilityConfig,
    pub subjects: Vec<SubjectConfig>,
}

/// A subject matched by [`Board::search_subjects`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectMatch {
    pub subject: String,
    pub score: i64,
}

/// Entry points over one registry
#[derive(Debug, Clone)]
pub struct Board {
    client: RegistryClient,
    tester: CompatibilityTester<RegistryClient>,
}

impl Board {
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        config.validate()?;
        let client = RegistryClient::new(&config.registry)?;
        let tester = CompatibilityTester::new(client.clone(), client.base_url().clone())
            .verbose(config.registry.verbose_compatibility);
        Ok(Self { client, tester })
    }

    pub fn client(&self) -> &RegistryClient {
        &self.client
    }

    pub async fn overview(&self) -> Result<Overview> {
        let subjects = self.client.list_subjects().await?;
        let global = self.client.global_config().await?;
        let subjects = self.client.subject_configs(&subjects).await?;
        Ok(Overview { global, subjects })
    }

    /// Fuzzy subject search, best match first. An empty query lists every subject.
    pub async fn search_subjects(&self, query: &str, limit: usize) -> Result<Vec<SubjectMatch>> {
        let subjects = self.client.list_subjects().await?;
        Ok(rank_subjects(subjects, query, limit))
    }

    pub async fn schemas(&self, subject: &str) -> Result<Vec<Schema>> {
        self.client.schemas_for_subject(subject).await
    }

    /// One version of a subject, checked against its schema id
    pub async fn find_schema(&self, subject: &str, version: u32, id: u32) -> Result<Schema> {
        self.client
            .schemas_for_subject(subject)
            .await?
            .into_iter()
            .find(|s| s.version == version && s.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("{} version {} (id {})", subject, version, id)))
    }

    /// Test a candidate schema. Always yields a result; rejected input is a
    /// 400 result and never reaches the registry.
    pub async fn test_schema(&self, subject: &str, version: i32, raw_json: &str) -> CompatibilityResult {
        match self.tester.test_compatibility(subject, version, raw_json).await {
            Ok(result) => result,
            Err(e) => {
                debug!(subject, version, error = %e, "schema test rejected locally");
                CompatibilityResult::bad_request(e.to_string())
            }
        }
    }

    /// Validate a payload (value or JSON-encoded text) against schema `schema_id`
    pub async fn validate_payload(&self, schema_id: u32, payload: Value) -> Result<ValidationOutcome> {
        let instance = validation::decode_payload(payload)?;
        let schema = self.client.schema_by_id(schema_id).await?;
        validation::validate(&instance, &schema)
    }
}

fn rank_subjects(subjects: Vec<String>, query: &str, limit: usize) -> Vec<SubjectMatch> {
    let query = query.trim();
    if query.is_empty() {
        return subjects
            .into_iter()
            .take(limit)
            .map(|subject| SubjectMatch { subject, score: 0 })
            .collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut results: Vec<SubjectMatch> = subjects
        .into_iter()
        .filter_map(|subject| {
            matcher
                .fuzzy_match(&subject, query)
                .map(|score| SubjectMatch { subject, score })
        })
        .collect();

    // Sort by score descending; stable, so ties keep registry order
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<String> {
        ["orders-value", "payments-value", "orders-key", "customers-value"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_empty_query_lists_all_in_order() {
        let matches = rank_subjects(subjects(), "  ", 10);
        let names: Vec<_> = matches.iter().map(|m| m.subject.as_str()).collect();
        assert_eq!(names, ["orders-value", "payments-value", "orders-key", "customers-value"]);
    }

    #[test]
    fn test_query_filters_and_ranks() {
        let matches = rank_subjects(subjects(), "ORDERS", 10);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.subject.starts_with("orders")));
    }

    #[test]
    fn test_limit_applies() {
        let matches = rank_subjects(subjects(), "value", 2);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_no_match() {
        assert!(rank_subjects(subjects(), "zzz", 10).is_empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = BoardConfig::default();
        config.registry.url = "not a url".to_string();
        assert!(Board::from_config(&config).is_err());
    }
}
