//! Registry data model
//!
//! Read-only views of what the registry stores: schemas, subject configs and
//! the global config. Field names follow the registry's REST wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of schema as reported by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// The registry omits `schemaType` for Avro schemas
    #[default]
    Avro,
    Json,
    Protobuf,
}

impl SchemaType {
    /// Wire marker sent in `schemaType`
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Avro => "AVRO",
            SchemaType::Json => "JSON",
            SchemaType::Protobuf => "PROTOBUF",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Registry-wide schema id
    #[serde(default)]
    pub id: u32,
    /// Subject this version belongs to (absent on lookups by id)
    #[serde(default)]
    pub subject: String,
    /// Version within the subject (absent on lookups by id)
    #[serde(default)]
    pub version: u32,
    #[serde(rename = "schemaType", default)]
    pub schema_type: SchemaType,
    /// The schema document as text
    #[serde(rename = "schema")]
    pub schema_text: String,
}

impl Schema {
    /// Create a JSON schema entry
    pub fn json(id: u32, subject: impl Into<String>, version: u32, schema_text: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            version,
            schema_type: SchemaType::Json,
            schema_text: schema_text.into(),
        }
    }

    /// Pretty-print the schema text, falling back to the raw text if it is not JSON
    pub fn formatted(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.schema_text)
            .ok()
            .and_then(|v| serde_json::to_string_pretty(&v).ok())
            .unwrap_or_else(|| self.schema_text.clone())
    }
}

/// Compatibility configuration, either global or for one subject
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityConfig {
    #[serde(default)]
    pub compatibility_level: Option<String>,
    #[serde(default)]
    pub compatibility_group: Option<String>,
    #[serde(default, alias = "aliases")]
    pub alias: Option<String>,
    #[serde(default)]
    pub normalize: Option<bool>,
    #[serde(default)]
    pub default_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub override_metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub default_rule_set: Option<serde_json::Value>,
    #[serde(default)]
    pub override_rule_set: Option<serde_json::Value>,
}

impl CompatibilityConfig {
    pub fn level_display(&self) -> &str {
        non_empty_or(&self.compatibility_level, "None set")
    }

    pub fn group_display(&self) -> &str {
        non_empty_or(&self.compatibility_group, "None set")
    }

    pub fn alias_display(&self) -> &str {
        non_empty_or(&self.alias, "None")
    }
}

fn non_empty_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Configuration state of a single subject
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubjectConfig {
    /// The subject has its own configuration
    Explicit {
        subject: String,
        config: CompatibilityConfig,
    },
    /// No subject-level configuration; the global default applies
    InheritsGlobal { subject: String },
}

impl SubjectConfig {
    pub fn subject(&self) -> &str {
        match self {
            SubjectConfig::Explicit { subject, .. } | SubjectConfig::InheritsGlobal { subject } => subject,
        }
    }

    pub fn takes_global_default(&self) -> bool {
        matches!(self, SubjectConfig::InheritsGlobal { .. })
    }

    /// Effective level, resolving inherited subjects against the global config
    pub fn effective_level<'a>(&'a self, global: &'a CompatibilityConfig) -> &'a str {
        match self {
            SubjectConfig::Explicit { config, .. } => config.level_display(),
            SubjectConfig::InheritsGlobal { .. } => global.level_display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_type_defaults_to_avro() {
        let schema: Schema = serde_json::from_str(
            r#"{"subject": "orders-value", "version": 1, "id": 3, "schema": "{\"type\":\"string\"}"}"#,
        )
        .unwrap();
        assert_eq!(schema.schema_type, SchemaType::Avro);
        assert_eq!(schema.id, 3);
    }

    #[test]
    fn test_schema_by_id_shape() {
        let schema: Schema =
            serde_json::from_str(r#"{"schemaType": "JSON", "schema": "{\"type\":\"object\"}"}"#).unwrap();
        assert_eq!(schema.schema_type, SchemaType::Json);
        assert_eq!(schema.version, 0);
        assert!(schema.subject.is_empty());
    }

    #[test]
    fn test_formatted_falls_back_to_raw_text() {
        let schema = Schema::json(1, "s", 1, "not json");
        assert_eq!(schema.formatted(), "not json");

        let schema = Schema::json(1, "s", 1, r#"{"type":"object"}"#);
        assert!(schema.formatted().contains("\n"));
    }

    #[test]
    fn test_config_display_defaults() {
        let config: CompatibilityConfig =
            serde_json::from_str(r#"{"compatibilityLevel": "BACKWARD"}"#).unwrap();
        assert_eq!(config.level_display(), "BACKWARD");
        assert_eq!(config.group_display(), "None set");
        assert_eq!(config.alias_display(), "None");
    }

    #[test]
    fn test_inherited_subject_uses_global_level() {
        let global = CompatibilityConfig {
            compatibility_level: Some("FULL".to_string()),
            ..Default::default()
        };
        let inherited = SubjectConfig::InheritsGlobal { subject: "payments-value".to_string() };
        assert!(inherited.takes_global_default());
        assert_eq!(inherited.effective_level(&global), "FULL");
        assert_eq!(inherited.subject(), "payments-value");
    }
}
