//! Schemadoc Schemas - loading and structural validation of route schemas
//!
//! Route schemas describe an HTTP route with JSON-Schema-like nodes:
//! `params`, `querystring`, `headers` and `body` for the request, and
//! `response` keyed by status code. This crate reads them from JSON or YAML
//! and checks that every node is well formed before anything transforms it.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemadoc_schemas::{RouteSchemaValidator, SchemaValidator};
//! use serde_json::json;
//!
//! let validator = RouteSchemaValidator::new();
//! let route = json!({
//!     "params": {"type": "object", "properties": {"id": {"type": "string"}}},
//!     "response": {"200": {"type": "object", "properties": {"_id": {"type": "string"}}}}
//! });
//!
//! assert!(validator.validate(&route).is_ok());
//! ```
//!
//! ## Validation Modes
//!
//! - **Basic**: node kinds, `type` consistency and keyword shapes
//! - **Partial**: Basic plus compilation of every regular expression
//! - **Strict**: Partial plus JSON Schema meta-schema conformance
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod keywords;
pub mod kind;
pub mod loader;
pub mod validation;

pub use kind::{SchemaKind, UnknownKind};
pub use loader::{Format, LoaderError, LoaderResult, SchemaParser};
pub use validation::{
    is_status_code, RouteSchemaValidator, SchemaNodeValidator, SchemaValidator,
    Section, ValidationContext, ValidationError, ValidationErrors, ValidationHelpers,
    ValidationMode, ValidationResult, Violation,
};
