//! Error types for the registry board

use thiserror::Error;

use crate::schema::SchemaType;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Registry board errors
#[derive(Error, Debug)]
pub enum BoardError {
    /// Caller supplied malformed or empty JSON. Never sent to the registry.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A request was built with arguments outside the caller contract.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid JSON schema: {0}")]
    InvalidSchema(String),

    #[error("payload validation is only supported for JSON schemas, got {0}")]
    UnsupportedSchemaType(SchemaType),

    #[error("not found: {0}")]
    NotFound(String),

    /// The registry could not be reached, or the response could not be read.
    #[error("registry unreachable: {0}")]
    Transport(String),

    #[error("unexpected status code: {status}, body: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl BoardError {
    /// HTTP status a presentation layer should report for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BoardError::InvalidInput(_)
            | BoardError::InvalidRequest(_)
            | BoardError::UnsupportedSchemaType(_) => 400,
            BoardError::NotFound(_) => 404,
            BoardError::UnexpectedStatus { .. } => 502,
            _ => 500,
        }
    }

    /// Whether the caller, not the registry or this process, is at fault
    pub fn is_caller_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_map_to_bad_request() {
        assert_eq!(BoardError::InvalidInput("empty".into()).status_code(), 400);
        assert_eq!(BoardError::InvalidRequest("version".into()).status_code(), 400);
        assert!(BoardError::UnsupportedSchemaType(SchemaType::Avro).is_caller_error());
    }

    #[test]
    fn test_upstream_errors_are_not_caller_errors() {
        let err = BoardError::UnexpectedStatus { status: 503, body: String::new() };
        assert_eq!(err.status_code(), 502);
        assert!(!err.is_caller_error());
        assert!(!BoardError::Transport("refused".into()).is_caller_error());
        assert!(BoardError::NotFound("schema 7".into()).is_caller_error());
    }
}
