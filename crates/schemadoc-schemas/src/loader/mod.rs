//! Reading schema documents from disk
//!
//! Route schemas and route catalogs can be written as JSON or YAML; both are
//! loaded into `serde_json::Value` trees with key order preserved.
//!
//! # Example Usage
//!
//! ```no_run
//! use schemadoc_schemas::loader::SchemaParser;
//! use std::path::Path;
//!
//! let parser = SchemaParser::new();
//! let route = parser.parse_file(Path::new("routes/get-item.yaml"))?;
//! println!("{}", serde_json::to_string_pretty(&route)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
