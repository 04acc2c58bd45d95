//! Structural validation for schema nodes and route schemas
//!
//! Three modes are supported:
//!
//! - **Basic**: structural rules (kinds, type consistency, keyword shapes)
//! - **Partial**: Basic plus regular expression compilation
//! - **Strict**: Partial plus JSON Schema meta-schema conformance
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod error;
pub mod node;
pub mod route;

pub use base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
pub use error::{ValidationError, ValidationErrors, ValidationResult, Violation};
pub use node::SchemaNodeValidator;
pub use route::{is_status_code, RouteSchemaValidator, Section};
