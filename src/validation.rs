//! Payload validation against registered JSON schemas
//!
//! Purely local: operates on schema text already fetched from the registry
//! and a decoded payload. Errors are reported in the order the `jsonschema`
//! engine yields them, one line per violated constraint.
//!
//! References inside the schema document (`#/definitions/..`) resolve as
//! usual. External references are never fetched; each one that is reached
//! during validation is reported as an error.

use std::sync::Arc;

use jsonschema::{JSONSchema, SchemaResolver, SchemaResolverError};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::compatibility::normalize_message;
use crate::error::{BoardError, Result};
use crate::schema::{Schema, SchemaType};

/// Result of validating one payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    valid: bool,
    errors: Vec<String>,
}

impl ValidationOutcome {
    fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn invalid(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty(), "invalid outcome without errors");
        Self { valid: false, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// All errors on one normalized line, for single-message surfaces
    pub fn summary(&self) -> String {
        if self.valid {
            "Payload validates against schema".to_string()
        } else {
            normalize_message(&self.errors.join("; "))
        }
    }
}

/// Refuses every external reference; nothing leaves the process.
struct OfflineResolver;

impl SchemaResolver for OfflineResolver {
    fn resolve(
        &self,
        _root_schema: &Value,
        url: &Url,
        _original_reference: &str,
    ) -> std::result::Result<Arc<Value>, SchemaResolverError> {
        Err(anyhow::anyhow!("external reference {} is not fetched", url))
    }
}

/// Decode a payload that may arrive as JSON-encoded text.
///
/// A string is parsed as JSON; any other value is already the instance.
pub fn decode_payload(payload: Value) -> Result<Value> {
    match payload {
        Value::String(text) => serde_json::from_str(&text)
            .map_err(|e| BoardError::InvalidInput(format!("value of payload is not valid JSON: {}", e))),
        other => Ok(other),
    }
}

/// Validate `payload` against `schema`.
///
/// # Errors
///
/// - [`BoardError::UnsupportedSchemaType`] if `schema` is not a JSON schema
/// - [`BoardError::InvalidSchema`] if its text is not a compilable JSON Schema
pub fn validate(payload: &Value, schema: &Schema) -> Result<ValidationOutcome> {
    if schema.schema_type != SchemaType::Json {
        return Err(BoardError::UnsupportedSchemaType(schema.schema_type));
    }

    let document: Value = serde_json::from_str(&schema.schema_text)
        .map_err(|e| BoardError::InvalidSchema(format!("schema {} is not JSON: {}", schema.id, e)))?;
    let compiled = JSONSchema::options()
        .with_resolver(OfflineResolver)
        .compile(&document)
        .map_err(|e| BoardError::InvalidSchema(format!("schema {}: {}", schema.id, e)))?;

    let errors: Vec<String> = match compiled.validate(payload) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|error| format!("{}: {}", location(&error.instance_path.to_string()), error))
            .collect(),
    };

    let outcome = if errors.is_empty() {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::invalid(errors)
    };
    Ok(outcome)
}

/// Validate a payload that may still be JSON-encoded text
pub fn validate_raw(payload: Value, schema: &Schema) -> Result<ValidationOutcome> {
    let instance = decode_payload(payload)?;
    validate(&instance, schema)
}

/// `/address/street` -> `address.street`; the empty pointer is `(root)`
fn location(pointer: &str) -> String {
    let path = pointer.trim_start_matches('/');
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.split('/')
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TEST_SCHEMA: &str = r#"{
        "additionalProperties": false,
        "properties": {
            "test": {
                "description": "A required test string",
                "type": "string"
            }
        },
        "required": ["test"],
        "type": "object"
    }"#;

    fn schema() -> Schema {
        Schema::json(1, "test-value", 1, TEST_SCHEMA)
    }

    #[test]
    fn test_valid_payload() {
        let outcome = validate(&json!({"test": "value"}), &schema()).unwrap();
        assert!(outcome.is_valid());
        assert!(outcome.errors().is_empty());
    }

    #[test]
    fn test_additional_property_named() {
        let outcome = validate(&json!({"test": "value", "extra": 1}), &schema()).unwrap();
        assert!(!outcome.is_valid());
        assert_eq!(outcome.errors().len(), 1);
        assert!(outcome.errors()[0].contains("extra"));
        assert!(outcome.errors()[0].starts_with("(root): "));
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let outcome = validate(&json!({"test": 1}), &schema()).unwrap();
        assert!(!outcome.is_valid());
        assert!(outcome.errors().iter().any(|e| e.starts_with("test: ") && e.contains("string")));
    }

    #[test]
    fn test_missing_required() {
        let outcome = validate(&json!({}), &schema()).unwrap();
        assert!(!outcome.is_valid());
        assert!(outcome.errors()[0].contains("test"));
    }

    #[test]
    fn test_string_payload_decoded() {
        let outcome = validate_raw(json!(r#"{"test": "value"}"#), &schema()).unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_undecodable_string_is_caller_error() {
        let err = validate_raw(json!("{\"name 123///"), &schema()).unwrap_err();
        assert!(matches!(err, BoardError::InvalidInput(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_non_json_schema_type_rejected() {
        let mut avro = schema();
        avro.schema_type = SchemaType::Avro;
        assert!(matches!(
            validate(&json!({"test": "value"}), &avro),
            Err(BoardError::UnsupportedSchemaType(SchemaType::Avro))
        ));
    }

    #[test]
    fn test_broken_schema_text() {
        let broken = Schema::json(9, "s", 1, "{not json");
        assert!(matches!(validate(&json!({}), &broken), Err(BoardError::InvalidSchema(_))));

        let uncompilable = Schema::json(9, "s", 1, r#"{"type": 12}"#);
        assert!(matches!(validate(&json!({}), &uncompilable), Err(BoardError::InvalidSchema(_))));
    }

    #[test]
    fn test_errors_are_stable() {
        let payload = json!({"test": 1, "extra": true, "more": null});
        let first = validate(&payload, &schema()).unwrap();
        let second = validate(&payload, &schema()).unwrap();
        assert_eq!(first, second);
        assert!(first.errors().len() >= 2);
    }

    #[test]
    fn test_location_formatting() {
        assert_eq!(location(""), "(root)");
        assert_eq!(location("/address/street"), "address.street");
        assert_eq!(location("/items/0"), "items.0");
        assert_eq!(location("/a~1b"), "a/b");
    }

    #[test]
    fn test_summary() {
        assert_eq!(ValidationOutcome::valid().summary(), "Payload validates against schema");
        let outcome = ValidationOutcome::invalid(vec!["a".into(), "b".into()]);
        assert_eq!(outcome.summary(), "a; b");
    }

    #[test]
    fn test_long_summary_is_normalized() {
        let outcome = ValidationOutcome::invalid(vec!["x".repeat(80), "y".repeat(80)]);
        let summary = outcome.summary();
        assert_eq!(summary.chars().count(), 103);
        assert!(summary.ends_with("..."));
        assert_eq!(outcome.errors()[0].len(), 80);
    }

    #[test]
    #[should_panic(expected = "invalid outcome without errors")]
    #[cfg(debug_assertions)]
    fn test_invalid_requires_errors() {
        ValidationOutcome::invalid(Vec::new());
    }

    #[test]
    fn test_local_ref_resolves() {
        let with_defs = Schema::json(
            4,
            "s",
            1,
            r##"{
                "definitions": {"name": {"type": "string"}},
                "properties": {"name": {"$ref": "#/definitions/name"}}
            }"##,
        );
        assert!(validate(&json!({"name": "ok"}), &with_defs).unwrap().is_valid());

        let outcome = validate(&json!({"name": 5}), &with_defs).unwrap();
        assert!(!outcome.is_valid());
        assert!(outcome.errors()[0].starts_with("name: "));
    }

    #[test]
    fn test_remote_ref_is_not_fetched() {
        let remote = Schema::json(
            5,
            "s",
            1,
            r#"{"properties": {"a": {"$ref": "http://127.0.0.1:1/defs/a.json"}}}"#,
        );
        let outcome = validate(&json!({"a": 1}), &remote).unwrap();

        assert!(!outcome.is_valid());
        assert!(outcome.errors().iter().any(|e| e.contains("is not fetched")));
        assert!(!outcome.errors().iter().any(|e| e.contains("Connection refused")));
    }
}
