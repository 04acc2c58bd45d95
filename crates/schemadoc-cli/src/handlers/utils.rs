//! Shared utilities for command handlers

use crate::error::Result;
use schemadoc_core::SchemaDocument;
use schemadoc_schemas::SchemaParser;
use std::path::Path;
use tracing::debug;

/// Load a route schema or catalog from a YAML or JSON file
pub fn load_document(path: &Path) -> Result<SchemaDocument> {
    let value = SchemaParser::new().parse_object_file(path)?;
    let document = SchemaDocument::detect(value)?;

    debug!(
        path = %path.display(),
        catalog = document.is_catalog(),
        "document loaded"
    );
    Ok(document)
}
