//! Options controlling how route schemas are projected for documentation
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use regex::Regex;
use schemadoc_schemas::{Section, ValidationMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default identifier field name
pub const DEFAULT_IDENTIFIER_FIELD: &str = "_id";

/// Default description attached to annotated identifier fields
pub const DEFAULT_IDENTIFIER_DESCRIPTION: &str = "Hexadecimal identifier of the document in the collection";

/// Default pattern of identifier values: 24 hexadecimal characters
pub const DEFAULT_IDENTIFIER_PATTERN: &str = r"^[a-fA-F\d]{24}$";

/// Default example identifier value
pub const DEFAULT_IDENTIFIER_EXAMPLE: &str = "000000000000000000000000";

/// What happens to an identifier field found in a `properties` mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierPolicy {
    /// Drop the field and its `required` entry
    Remove,
    /// Keep the field and attach the canonical identifier metadata
    Annotate,
    /// Leave the field as it is
    Keep,
}

/// Metadata written onto annotated identifier fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierAnnotation {
    pub description: String,
    pub pattern: String,
    pub example: String,
}

impl Default for IdentifierAnnotation {
    fn default() -> Self {
        Self {
            description: DEFAULT_IDENTIFIER_DESCRIPTION.to_string(),
            pattern: DEFAULT_IDENTIFIER_PATTERN.to_string(),
            example: DEFAULT_IDENTIFIER_EXAMPLE.to_string(),
        }
    }
}

/// Transformer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Property names treated as storage identifiers
    pub identifier_fields: Vec<String>,
    /// Keywords stripped from every node
    pub internal_keywords: Vec<String>,
    /// Policy for `params`, `querystring`, `headers` and `body`
    pub request_policy: IdentifierPolicy,
    /// Policy for every `response.<code>` schema
    pub response_policy: IdentifierPolicy,
    /// Rewrite `type: [X, "null"]` as `type: X, nullable: true`
    pub nullable_type_arrays: bool,
    /// How thoroughly input is validated before transforming
    pub validation_mode: ValidationMode,
    /// Metadata for annotated identifiers
    pub annotation: IdentifierAnnotation,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            identifier_fields: vec![DEFAULT_IDENTIFIER_FIELD.to_string()],
            internal_keywords: vec!["$id".to_string()],
            request_policy: IdentifierPolicy::Remove,
            response_policy: IdentifierPolicy::Annotate,
            nullable_type_arrays: false,
            validation_mode: ValidationMode::Basic,
            annotation: IdentifierAnnotation::default(),
        }
    }
}

impl TransformOptions {
    /// Build options from a JSON value, defaulting missing fields
    pub fn from_value(value: Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value).map_err(|e| Error::Configuration {
            message: "transform options do not match the expected shape".to_string(),
            source: Some(anyhow::Error::new(e)),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Policy applied inside `section`
    pub fn policy_for(&self, section: Section) -> IdentifierPolicy {
        if section.is_response() {
            self.response_policy
        } else {
            self.request_policy
        }
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifier_fields.iter().any(|f| f == name)
    }

    pub fn is_internal_keyword(&self, keyword: &str) -> bool {
        self.internal_keywords.iter().any(|k| k == keyword)
    }

    /// Check the options are usable
    ///
    /// Names must be non-empty, the annotation pattern must compile and the
    /// annotation example must match it.
    pub fn validate(&self) -> Result<()> {
        if self.identifier_fields.iter().any(|f| f.is_empty()) {
            return Err(Error::configuration("identifier field names must not be empty"));
        }

        if self.internal_keywords.iter().any(|k| k.is_empty()) {
            return Err(Error::configuration("internal keywords must not be empty"));
        }

        let pattern = Regex::new(&self.annotation.pattern).map_err(|e| Error::Configuration {
            message: format!("identifier pattern '{}' does not compile", self.annotation.pattern),
            source: Some(anyhow::Error::new(e)),
        })?;

        if !pattern.is_match(&self.annotation.example) {
            return Err(Error::configuration(format!(
                "identifier example '{}' does not match pattern '{}'",
                self.annotation.example, self.annotation.pattern
            )));
        }

        Ok(())
    }

    pub fn with_identifier_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifier_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_internal_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.internal_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_request_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.request_policy = policy;
        self
    }

    pub fn with_response_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.response_policy = policy;
        self
    }

    pub fn with_nullable_type_arrays(mut self, enabled: bool) -> Self {
        self.nullable_type_arrays = enabled;
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_valid() {
        let options = TransformOptions::default();
        assert!(options.validate().is_ok());
        assert!(options.is_identifier("_id"));
        assert!(!options.is_identifier("id"));
        assert!(options.is_internal_keyword("$id"));
        assert_eq!(options.policy_for(Section::Params), IdentifierPolicy::Remove);
        assert_eq!(options.policy_for(Section::Response), IdentifierPolicy::Annotate);
    }

    #[test]
    fn test_from_value_fills_defaults() {
        let options = TransformOptions::from_value(json!({
            "identifier_fields": ["_id", "uuid"],
            "request_policy": "keep"
        }))
        .unwrap();

        assert!(options.is_identifier("uuid"));
        assert_eq!(options.request_policy, IdentifierPolicy::Keep);
        assert_eq!(options.response_policy, IdentifierPolicy::Annotate);
        assert_eq!(options.annotation, IdentifierAnnotation::default());
    }

    #[test]
    fn test_from_value_rejects_bad_policy() {
        let err = TransformOptions::from_value(json!({"request_policy": "shred"})).unwrap_err();
        assert!(matches!(err, Error::Configuration { source: Some(_), .. }));
    }

    #[test]
    fn test_example_must_match_pattern() {
        let mut options = TransformOptions::default();
        options.annotation.example = "not-hex".to_string();
        assert!(options.validate().is_err());

        options.annotation.pattern = "^(".to_string();
        assert!(matches!(options.validate(), Err(Error::Configuration { source: Some(_), .. })));
    }

    #[test]
    fn test_empty_names_rejected() {
        let options = TransformOptions::default().with_identifier_fields([""]);
        assert!(options.validate().is_err());

        let options = TransformOptions::default().with_internal_keywords([""]);
        assert!(options.validate().is_err());
    }
}
