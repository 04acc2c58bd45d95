//! Structural validation of a single schema node tree
//!
//! A node is either a boolean schema or an object whose keywords must agree
//! with its declared `type`. Validation is fail-fast: the first malformed
//! node is reported with its JSON path.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::keywords::{subschema_shape, SubschemaShape};
use crate::kind::SchemaKind;
use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers};
use crate::validation::error::{ValidationError, ValidationResult};
use serde_json::{Map, Value};
use tracing::trace;

/// Default limit on schema nesting
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Validator for one schema node tree
#[derive(Debug, Clone)]
pub struct SchemaNodeValidator {
    max_depth: usize,
}

impl Default for SchemaNodeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaNodeValidator {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply nodes may nest before validation gives up
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a `type` keyword into the kinds it declares
    ///
    /// Accepts a single kind name or a non-empty, duplicate-free array of
    /// kind names.
    pub fn parse_type(value: &Value, context: &ValidationContext) -> ValidationResult<Vec<SchemaKind>> {
        let parse_one = |name: &Value, ctx: &ValidationContext| -> ValidationResult<SchemaKind> {
            let name = ValidationHelpers::expect_string(name, "type", ctx)?;
            name.parse::<SchemaKind>().map_err(|e| {
                ValidationError::rule(
                    &ctx.path,
                    e.to_string(),
                    "type_value",
                    format!("one of: {}", SchemaKind::names().join(", ")),
                    name,
                )
            })
        };

        match value {
            Value::Array(names) => {
                if names.is_empty() {
                    return Err(ValidationError::rule(
                        &context.path,
                        "type array must not be empty",
                        "type_value",
                        "at least one kind",
                        "empty array",
                    ));
                }

                let mut kinds = Vec::with_capacity(names.len());
                for (i, name) in names.iter().enumerate() {
                    let kind = parse_one(name, &context.child_index(i))?;
                    if kinds.contains(&kind) {
                        return Err(ValidationError::rule(
                            &context.child_index(i).path,
                            format!("kind '{}' is listed twice", kind),
                            "type_unique",
                            "distinct kinds",
                            kind.as_str(),
                        ));
                    }
                    kinds.push(kind);
                }
                Ok(kinds)
            }
            other => Ok(vec![parse_one(other, context)?]),
        }
    }

    fn validate_node(&self, node: &Value, context: &ValidationContext, depth: usize) -> ValidationResult<()> {
        if depth > self.max_depth {
            return Err(ValidationError::rule(
                &context.path,
                format!("schema nests deeper than {} levels", self.max_depth),
                "max_depth",
                format!("at most {} levels", self.max_depth),
                format!("more than {}", self.max_depth),
            ));
        }

        match node {
            Value::Bool(_) => Ok(()),
            Value::Object(map) => self.validate_object(map, context, depth),
            other => Err(ValidationError::rule(
                &context.path,
                "schema node must be an object or a boolean",
                "schema_node_kind",
                "object or boolean",
                ValidationHelpers::kind_name(other),
            )),
        }
    }

    fn validate_object(
        &self,
        map: &Map<String, Value>,
        context: &ValidationContext,
        depth: usize,
    ) -> ValidationResult<()> {
        let kinds = match map.get("type") {
            Some(declared) => Some(Self::parse_type(declared, &context.child("type"))?),
            None => None,
        };

        for (keyword, value) in map {
            let child = context.child(keyword);
            match keyword.as_str() {
                "properties" => {
                    Self::require_kind(kinds.as_deref(), SchemaKind::Object, keyword, context)?;
                    let properties = ValidationHelpers::expect_object(value, keyword, &child)?;
                    for (name, subschema) in properties {
                        self.validate_node(subschema, &child.child(name), depth + 1)?;
                    }
                }
                "patternProperties" => {
                    Self::require_kind(kinds.as_deref(), SchemaKind::Object, keyword, context)?;
                    let patterns = ValidationHelpers::expect_object(value, keyword, &child)?;
                    for (pattern, subschema) in patterns {
                        let pattern_ctx = child.child(pattern);
                        if context.mode.checks_patterns() {
                            ValidationHelpers::validate_regex(pattern, &pattern_ctx)?;
                        }
                        self.validate_node(subschema, &pattern_ctx, depth + 1)?;
                    }
                }
                "items" => {
                    Self::require_kind(kinds.as_deref(), SchemaKind::Array, keyword, context)?;
                    match value {
                        Value::Array(tuple) => {
                            for (i, subschema) in tuple.iter().enumerate() {
                                self.validate_node(subschema, &child.child_index(i), depth + 1)?;
                            }
                        }
                        single => self.validate_node(single, &child, depth + 1)?,
                    }
                }
                "required" => ValidationHelpers::expect_string_array(value, keyword, &child)?,
                "examples" => {
                    if !value.is_array() {
                        return Err(ValidationError::rule(
                            &child.path,
                            "examples must be an array",
                            "examples_kind",
                            "array",
                            ValidationHelpers::kind_name(value),
                        ));
                    }
                }
                "description" => {
                    ValidationHelpers::expect_string(value, keyword, &child)?;
                }
                "pattern" => {
                    let pattern = ValidationHelpers::expect_string(value, keyword, &child)?;
                    if context.mode.checks_patterns() {
                        ValidationHelpers::validate_regex(pattern, &child)?;
                    }
                }
                k => match subschema_shape(k) {
                    Some(SubschemaShape::Single) => self.validate_node(value, &child, depth + 1)?,
                    Some(SubschemaShape::List) => {
                        let subschemas = value.as_array().filter(|a| !a.is_empty()).ok_or_else(|| {
                            ValidationError::rule(
                                &child.path,
                                format!("{} must be a non-empty array of schemas", k),
                                format!("{}_kind", k),
                                "non-empty array",
                                ValidationHelpers::kind_name(value),
                            )
                        })?;
                        for (i, subschema) in subschemas.iter().enumerate() {
                            self.validate_node(subschema, &child.child_index(i), depth + 1)?;
                        }
                    }
                    Some(SubschemaShape::Named) => {
                        let definitions = ValidationHelpers::expect_object(value, k, &child)?;
                        for (name, subschema) in definitions {
                            self.validate_node(subschema, &child.child(name), depth + 1)?;
                        }
                    }
                    Some(SubschemaShape::Dependencies) => {
                        let dependencies = ValidationHelpers::expect_object(value, k, &child)?;
                        for (name, dependency) in dependencies {
                            let dependency_ctx = child.child(name);
                            match dependency {
                                Value::Array(_) => {
                                    ValidationHelpers::expect_string_array(dependency, name, &dependency_ctx)?
                                }
                                subschema => self.validate_node(subschema, &dependency_ctx, depth + 1)?,
                            }
                        }
                    }
                    None => trace!(path = %child.path, "passing unknown keyword through"),
                },
            }
        }

        Ok(())
    }

    fn require_kind(
        kinds: Option<&[SchemaKind]>,
        required: SchemaKind,
        keyword: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        match kinds {
            Some(kinds) if !kinds.contains(&required) => {
                let declared = kinds.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(", ");
                Err(ValidationError::rule(
                    &context.path,
                    format!("{} is only allowed on {}-typed nodes, found type '{}'", keyword, required, declared),
                    "type_consistency",
                    format!("type including '{}'", required),
                    format!("type '{}'", declared),
                ))
            }
            _ => Ok(()),
        }
    }

    fn validate_meta_schema(node: &Value, context: &ValidationContext) -> ValidationResult<()> {
        jsonschema::meta::validate(node).map_err(|e| {
            ValidationError::rule(
                &context.path,
                format!("schema does not conform to the JSON Schema meta-schema: {}", e),
                "meta_schema",
                "valid JSON Schema",
                e.to_string(),
            )
        })
    }
}

impl SchemaValidator for SchemaNodeValidator {
    type Input = Value;

    fn validate_with_context(&self, input: &Value, context: &ValidationContext) -> ValidationResult<()> {
        self.validate_node(input, context, 0)?;

        if context.mode.checks_meta_schema() {
            Self::validate_meta_schema(input, context)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::base::ValidationMode;
    use serde_json::json;

    fn basic() -> ValidationContext {
        ValidationContext::new(ValidationMode::Basic)
    }

    #[test]
    fn test_valid_object_node() {
        let node = json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "description": "the name"},
                "tags": {"type": "array", "items": {"type": "string"}}
            },
            "patternProperties": {"^x-": true},
            "additionalProperties": false
        });
        assert!(SchemaNodeValidator::new().validate(&node).is_ok());
    }

    #[test]
    fn test_boolean_node_is_valid() {
        assert!(SchemaNodeValidator::new().validate(&json!(true)).is_ok());
    }

    #[test]
    fn test_scalar_node_rejected() {
        let err = SchemaNodeValidator::new().validate(&json!(42)).unwrap_err();
        assert_eq!(err.path, "$");
        assert!(err.rules().any(|r| r == "schema_node_kind"));
    }

    #[test]
    fn test_properties_on_array_node_rejected() {
        let node = json!({"type": "array", "properties": {"a": {"type": "string"}}});
        let err = SchemaNodeValidator::new().validate(&node).unwrap_err();
        assert!(err.rules().any(|r| r == "type_consistency"));
        assert!(err.message.contains("object-typed"));
    }

    #[test]
    fn test_items_on_object_node_rejected() {
        let node = json!({"type": "object", "items": {"type": "string"}});
        let err = SchemaNodeValidator::new().validate(&node).unwrap_err();
        assert!(err.rules().any(|r| r == "type_consistency"));
    }

    #[test]
    fn test_nullable_object_accepts_properties() {
        let node = json!({"type": ["object", "null"], "properties": {"a": true}});
        assert!(SchemaNodeValidator::new().validate(&node).is_ok());
    }

    #[test]
    fn test_unknown_type_rejected_with_path() {
        let node = json!({"type": "object", "properties": {"when": {"type": "date"}}});
        let err = SchemaNodeValidator::new().validate(&node).unwrap_err();
        assert_eq!(err.path, "$.properties.when.type");
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let err = SchemaNodeValidator::parse_type(&json!(["string", "string"]), &basic()).unwrap_err();
        assert!(err.rules().any(|r| r == "type_unique"));
    }

    #[test]
    fn test_empty_combinator_rejected() {
        let node = json!({"anyOf": []});
        let err = SchemaNodeValidator::new().validate(&node).unwrap_err();
        assert_eq!(err.path, "$.anyOf");
    }

    #[test]
    fn test_dependencies_entries() {
        let node = json!({
            "type": "object",
            "dependencies": {
                "card": ["billing_address"],
                "kind": {"properties": {"extra": {"type": "string"}}}
            }
        });
        assert!(SchemaNodeValidator::new().validate(&node).is_ok());

        let node = json!({"dependencies": {"card": ["billing_address", 3]}});
        let err = SchemaNodeValidator::new().validate(&node).unwrap_err();
        assert_eq!(err.path, "$.dependencies.card[1]");

        let node = json!({"dependencies": {"kind": {"type": "array", "properties": {}}}});
        let err = SchemaNodeValidator::new().validate(&node).unwrap_err();
        assert_eq!(err.path, "$.dependencies.kind");
        assert!(err.rules().any(|r| r == "type_consistency"));

        let err = SchemaNodeValidator::new().validate(&json!({"dependencies": []})).unwrap_err();
        assert_eq!(err.path, "$.dependencies");
    }

    #[test]
    fn test_pattern_checked_only_in_partial_mode() {
        let node = json!({"type": "string", "pattern": "^(open"});
        let validator = SchemaNodeValidator::new();
        assert!(validator.validate(&node).is_ok());
        assert!(validator.validate_partial(&node).is_err());
    }

    #[test]
    fn test_pattern_properties_keys_checked_in_partial_mode() {
        let node = json!({"type": "object", "patternProperties": {"[": {"type": "string"}}});
        let err = SchemaNodeValidator::new().validate_partial(&node).unwrap_err();
        assert!(err.rules().any(|r| r == "regex_syntax"));
    }

    #[test]
    fn test_max_depth() {
        let mut node = json!({"type": "string"});
        for _ in 0..5 {
            node = json!({"type": "object", "properties": {"nested": node}});
        }
        let validator = SchemaNodeValidator::new().with_max_depth(3);
        let err = validator.validate(&node).unwrap_err();
        assert!(err.rules().any(|r| r == "max_depth"));
        assert!(SchemaNodeValidator::new().validate(&node).is_ok());
    }

    #[test]
    fn test_strict_mode_checks_meta_schema() {
        let node = json!({"type": "object", "minProperties": -1});
        let validator = SchemaNodeValidator::new();
        assert!(validator.validate(&node).is_ok());
        let err = validator.validate_strict(&node).unwrap_err();
        assert!(err.rules().any(|r| r == "meta_schema"));
    }
}
