//! Schemadoc Core - public documentation schemas from internal route schemas
//!
//! This crate turns the JSON-Schema-like route schemas a service validates
//! requests with into the schemas it publishes in its API documentation.
//!
//! # Main Components
//!
//! - **Transformer**: [`SchemaDocTransformer`] removes or annotates identifier
//!   fields and strips internal keywords
//! - **Options**: [`TransformOptions`] with per-section [`IdentifierPolicy`]
//! - **Catalogs**: [`transform_catalog`] for named collections of routes
//! - **Error Handling**: [`Error`] built on `thiserror` and `anyhow`
//!
//! # Example
//!
//! ```
//! use schemadoc_core::{Result, SchemaDocTransformer};
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let transformer = SchemaDocTransformer::new();
//!     let doc = transformer.transform(&json!({
//!         "params": {"type": "object", "properties": {"id": {"type": "string"}}},
//!         "response": {"200": {"type": "object", "properties": {"_id": {}}}}
//!     }))?;
//!
//!     assert_eq!(doc["response"]["200"]["properties"]["_id"]["type"], "string");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod error;
pub mod options;
pub mod transformer;

// Re-export main types for convenience
pub use catalog::{
    transform_catalog, transform_catalog_with, validate_catalog, BatchConfig, CatalogReport, ReportMetadata,
    SchemaDocument, ROUTES_KEY,
};
pub use error::{Error, Result};
pub use options::{IdentifierAnnotation, IdentifierPolicy, TransformOptions};
pub use transformer::{SchemaDocTransformer, TransformStats};

pub use schemadoc_schemas::{Section, ValidationMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
