//! Validation of whole route schemas
//!
//! A route schema groups the request sections (`params`, `querystring`,
//! `headers`, `body`) and the `response` map keyed by status code. Keys the
//! validator does not recognise are left alone.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers};
use crate::validation::error::{ValidationError, ValidationResult};
use crate::validation::node::SchemaNodeValidator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A recognised section of a route schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Params,
    Querystring,
    Headers,
    Body,
    Response,
}

impl Section {
    /// Sections that describe the incoming request
    pub const REQUEST: [Section; 4] = [
        Section::Params,
        Section::Querystring,
        Section::Headers,
        Section::Body,
    ];

    /// Look a section up by its route-schema key
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "params" => Some(Section::Params),
            "querystring" => Some(Section::Querystring),
            "headers" => Some(Section::Headers),
            "body" => Some(Section::Body),
            "response" => Some(Section::Response),
            _ => None,
        }
    }

    /// The route-schema key of this section
    pub fn key(self) -> &'static str {
        match self {
            Section::Params => "params",
            Section::Querystring => "querystring",
            Section::Headers => "headers",
            Section::Body => "body",
            Section::Response => "response",
        }
    }

    pub fn is_response(self) -> bool {
        self == Section::Response
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whether `code` names a response: `200`, `2XX`/`2xx` or `default`
pub fn is_status_code(code: &str) -> bool {
    if code == "default" {
        return true;
    }

    let bytes = code.as_bytes();
    if bytes.len() != 3 || !(b'1'..=b'5').contains(&bytes[0]) {
        return false;
    }

    let digits = bytes[1..].iter().all(u8::is_ascii_digit);
    let range = bytes[1..].iter().all(|b| *b == b'X' || *b == b'x');
    digits || range
}

/// Validator for a complete route schema
#[derive(Debug, Clone, Default)]
pub struct RouteSchemaValidator {
    nodes: SchemaNodeValidator,
}

impl RouteSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom node validator for every section
    pub fn with_node_validator(nodes: SchemaNodeValidator) -> Self {
        Self { nodes }
    }

    fn validate_response(&self, response: &Value, context: &ValidationContext) -> ValidationResult<()> {
        let codes = ValidationHelpers::expect_object(response, "response", context)?;

        for (code, node) in codes {
            let code_ctx = context.child(code);
            if !is_status_code(code) {
                return Err(ValidationError::rule(
                    &code_ctx.path,
                    format!("'{}' is not a response status code", code),
                    "status_code",
                    "three-digit code, NXX range or 'default'",
                    code.as_str(),
                ));
            }
            self.nodes.validate_with_context(node, &code_ctx)?;
        }

        Ok(())
    }
}

impl SchemaValidator for RouteSchemaValidator {
    type Input = Value;

    fn validate_with_context(&self, input: &Value, context: &ValidationContext) -> ValidationResult<()> {
        let route = input.as_object().ok_or_else(|| {
            ValidationError::rule(
                &context.path,
                "route schema must be an object",
                "route_kind",
                "object",
                ValidationHelpers::kind_name(input),
            )
        })?;

        for (key, value) in route {
            match Section::from_key(key) {
                Some(Section::Response) => self.validate_response(value, &context.child(key))?,
                Some(_) => self.nodes.validate_with_context(value, &context.child(key))?,
                None => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_codes() {
        for code in ["200", "204", "404", "2XX", "5xx", "default"] {
            assert!(is_status_code(code), "{} should be accepted", code);
        }
        for code in ["20", "2000", "600", "OK", "2X0", ""] {
            assert!(!is_status_code(code), "{} should be rejected", code);
        }
    }

    #[test]
    fn test_section_keys_round_trip() {
        for section in Section::REQUEST {
            assert_eq!(Section::from_key(section.key()), Some(section));
            assert!(!section.is_response());
        }
        assert!(Section::Response.is_response());
        assert_eq!(Section::from_key("summary"), None);
    }

    #[test]
    fn test_valid_route() {
        let route = json!({
            "summary": "Get a document",
            "params": {"type": "object", "properties": {"id": {"type": "string"}}},
            "response": {"200": {"type": "object", "properties": {"_id": {"type": "string"}}}}
        });
        assert!(RouteSchemaValidator::new().validate(&route).is_ok());
    }

    #[test]
    fn test_bad_status_code() {
        let route = json!({"response": {"ok": {"type": "object"}}});
        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.response.ok");
    }

    #[test]
    fn test_malformed_section_reports_path() {
        let route = json!({"body": {"type": "string", "properties": {}}});
        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.body");
    }

    #[test]
    fn test_route_must_be_object() {
        let err = RouteSchemaValidator::new().validate(&json!([])).unwrap_err();
        assert!(err.rules().any(|r| r == "route_kind"));
    }
}
