//! Candidate schema envelope
//!
//! Wraps user-supplied JSON schema text in the body the registry expects on
//! its compatibility endpoint: `{"schema": "<text>", "schemaType": "JSON"}`.

use serde::Serialize;
use serde_json::Value;

use crate::error::{BoardError, Result};
use crate::schema::SchemaType;

/// Registry request body for a candidate JSON schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaEnvelope {
    /// The caller's original text, byte for byte
    #[serde(rename = "schema")]
    schema_text: String,
    #[serde(rename = "schemaType")]
    schema_type: SchemaType,
}

impl SchemaEnvelope {
    /// Validate `raw` and wrap it.
    ///
    /// Fails with [`BoardError::InvalidInput`] when `raw` is not JSON, or when it
    /// parses to an empty value (`""`, `{}`, `[]` or `null`).
    pub fn from_json_text(raw: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(raw)
            .map_err(|e| BoardError::InvalidInput(format!("invalid JSON input: {}", e)))?;

        if is_empty_json(&parsed) {
            return Err(BoardError::InvalidInput("empty JSON is not allowed".to_string()));
        }

        Ok(Self {
            schema_text: raw.to_string(),
            schema_type: SchemaType::Json,
        })
    }

    pub fn schema_text(&self) -> &str {
        &self.schema_text
    }

    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Serialized request body
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_original_text() {
        let raw = "{ \"type\" : \"object\",\n  \"properties\": {\"a\": {\"type\": \"string\"}} }";
        let envelope = SchemaEnvelope::from_json_text(raw).unwrap();
        assert_eq!(envelope.schema_text(), raw);
        assert_eq!(envelope.schema_type(), SchemaType::Json);
    }

    #[test]
    fn test_non_object_json_is_accepted() {
        for raw in ["[1, 2, 3]", "42", "true", "false", "\"hello\""] {
            let envelope = SchemaEnvelope::from_json_text(raw).unwrap();
            assert_eq!(envelope.schema_text(), raw);
        }
    }

    #[test]
    fn test_empty_values_rejected() {
        for raw in ["", "{}", "[]", "null", "\"\"", "  {}  "] {
            let err = SchemaEnvelope::from_json_text(raw).unwrap_err();
            assert!(matches!(err, BoardError::InvalidInput(_)), "{:?} accepted", raw);
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        for raw in [r#"{"field1": "value1""#, r#"{"field1": "value1", }"#, "not json"] {
            match SchemaEnvelope::from_json_text(raw) {
                Err(BoardError::InvalidInput(msg)) => assert!(msg.starts_with("invalid JSON input")),
                other => panic!("expected InvalidInput for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_body_wire_shape() {
        let envelope = SchemaEnvelope::from_json_text(r#"{"type":"string"}"#).unwrap();
        let body: Value = serde_json::from_str(&envelope.to_body().unwrap()).unwrap();
        assert_eq!(body["schema"], r#"{"type":"string"}"#);
        assert_eq!(body["schemaType"], "JSON");
    }
}
