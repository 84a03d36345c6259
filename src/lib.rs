//! Registry Board
//!
//! Core of a dashboard over a remote schema registry: browse subjects,
//! schemas and compatibility configuration, test whether a candidate JSON
//! schema is compatible with a registered version, and validate payloads
//! against registered JSON schemas.
//!
//! ## Features
//!
//! - **Tri-state verdicts**: compatible, incompatible, or undetermined; an
//!   unreadable or 5xx registry answer is never reported as incompatible
//! - **Input guarding**: malformed or empty candidate JSON is rejected locally
//! - **Payload validation**: JSON Schema checks with per-field error messages
//! - **Pass-through browsing**: subjects, schemas, global and subject configs
//!
//! ## Flow
//!
//! ```text
//! raw JSON ─▶ SchemaEnvelope ─▶ CompatibilityRequest ─▶ RegistryTransport
//!                                                          │
//!                           CompatibilityResult ◀─ classify(status, body)
//! ```

pub mod board;
pub mod client;
pub mod compatibility;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod request;
pub mod schema;
pub mod tester;
pub mod validation;

pub use board::{Board, Overview, SubjectMatch};
pub use client::{RawResponse, RegistryClient, RegistryTransport};
pub use compatibility::{classify, normalize_message, Compatibility, CompatibilityResult};
pub use config::BoardConfig;
pub use envelope::SchemaEnvelope;
pub use error::{BoardError, Result};
pub use request::CompatibilityRequest;
pub use schema::{CompatibilityConfig, Schema, SchemaType, SubjectConfig};
pub use tester::CompatibilityTester;
pub use validation::{validate, ValidationOutcome};
