//! Parsing of JSON and YAML schema documents
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Parser for schema documents
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document, detecting format from the extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        debug!(path = %path.display(), bytes = content.len(), ?format, "parsing schema document");
        self.parse_content(&content, format, path)
    }

    /// Parse a document whose root must be an object
    pub fn parse_object_file(&self, path: &Path) -> LoaderResult<Value> {
        let value = self.parse_file(path)?;
        Self::require_object(&value, path)?;
        Ok(value)
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value).map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Reject documents whose root is not an object
    pub fn require_object(value: &Value, path: &Path) -> LoaderResult<()> {
        if value.is_object() {
            Ok(())
        } else {
            Err(LoaderError::invalid_document(
                path.to_path_buf(),
                "document root must be an object",
            ))
        }
    }

    /// Serialize a value back to string format
    pub fn serialize(&self, value: &Value, format: Format) -> LoaderResult<String> {
        match format {
            Format::Json => serde_json::to_string_pretty(value).map_err(|e| LoaderError::SerializeError {
                reason: format!("Failed to serialize JSON: {}", e),
            }),
            Format::Yaml => serde_yaml::to_string(value).map_err(|e| LoaderError::SerializeError {
                reason: format!("Failed to serialize YAML: {}", e),
            }),
        }
    }

    /// Write a value to `path`, in the format its extension names
    pub fn write_file(&self, path: &Path, value: &Value) -> LoaderResult<()> {
        let content = self.serialize(value, Format::from_path(path)?)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| LoaderError::io_error(parent.to_path_buf(), e))?;
        }

        std::fs::write(path, content).map_err(|e| LoaderError::io_error(path.to_path_buf(), e))
    }
}
