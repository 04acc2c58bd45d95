//! Base validation trait and common utilities
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationError, ValidationResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How much checking a validator performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Structural rules, regex compilation and meta-schema conformance
    Strict,
    /// Structural rules plus regex compilation
    Partial,
    /// Structural rules only
    Basic,
}

impl ValidationMode {
    /// Whether `pattern` values and `patternProperties` keys get compiled
    pub fn checks_patterns(self) -> bool {
        matches!(self, Self::Strict | Self::Partial)
    }

    /// Whether sections are checked against the JSON Schema meta-schema
    pub fn checks_meta_schema(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl Default for ValidationMode {
    fn default() -> Self {
        Self::Basic
    }
}

/// Tracks where in the document validation currently is
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    /// Validation mode
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Create a root context
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        Self {
            path: format!("{}.{}", self.path, path_segment.as_ref()),
            mode: self.mode,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: self.mode,
        }
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input: ?Sized;

    /// Validate with the validator's default mode (Basic)
    fn validate(&self, input: &Self::Input) -> ValidationResult<()> {
        let context = ValidationContext::new(ValidationMode::Basic);
        self.validate_with_context(input, &context)
    }

    /// Validate with specific context and mode
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationResult<()>;

    /// Validate in partial mode
    fn validate_partial(&self, input: &Self::Input) -> ValidationResult<()> {
        let context = ValidationContext::new(ValidationMode::Partial);
        self.validate_with_context(input, &context)
    }

    /// Validate with every rule enabled
    fn validate_strict(&self, input: &Self::Input) -> ValidationResult<()> {
        let context = ValidationContext::new(ValidationMode::Strict);
        self.validate_with_context(input, &context)
    }
}

/// Helper functions for common validation patterns
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// JSON kind name of a value, as used in violation messages
    pub fn kind_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Require `value` to be a JSON object
    pub fn expect_object<'a>(
        value: &'a Value,
        keyword: &str,
        context: &ValidationContext,
    ) -> ValidationResult<&'a serde_json::Map<String, Value>> {
        value.as_object().ok_or_else(|| {
            ValidationError::rule(
                &context.path,
                format!("{} must be an object", keyword),
                format!("{}_kind", keyword),
                "object",
                Self::kind_name(value),
            )
        })
    }

    /// Require `value` to be a JSON string
    pub fn expect_string<'a>(
        value: &'a Value,
        keyword: &str,
        context: &ValidationContext,
    ) -> ValidationResult<&'a str> {
        value.as_str().ok_or_else(|| {
            ValidationError::rule(
                &context.path,
                format!("{} must be a string", keyword),
                format!("{}_kind", keyword),
                "string",
                Self::kind_name(value),
            )
        })
    }

    /// Require `value` to be an array of strings
    pub fn expect_string_array(
        value: &Value,
        keyword: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        let items = value.as_array().ok_or_else(|| {
            ValidationError::rule(
                &context.path,
                format!("{} must be an array of strings", keyword),
                format!("{}_kind", keyword),
                "array",
                Self::kind_name(value),
            )
        })?;

        for (i, item) in items.iter().enumerate() {
            if !item.is_string() {
                return Err(ValidationError::rule(
                    &context.child_index(i).path,
                    format!("{} entries must be strings", keyword),
                    format!("{}_entry_kind", keyword),
                    "string",
                    Self::kind_name(item),
                ));
            }
        }

        Ok(())
    }

    /// Require `expression` to compile as a regular expression
    pub fn validate_regex(expression: &str, context: &ValidationContext) -> ValidationResult<()> {
        Regex::new(expression).map(|_| ()).map_err(|e| {
            ValidationError::rule(
                &context.path,
                format!("Invalid regular expression '{}': {}", expression, e),
                "regex_syntax",
                "compilable regular expression",
                expression,
            )
        })
    }
}
