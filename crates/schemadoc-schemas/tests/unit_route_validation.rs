//! Unit tests for route schema validation
//!
//! These cover the structural rules a route schema must satisfy before it
//! can be turned into documentation: section shapes, status codes and
//! type/keyword consistency at any depth.

use serde_json::json;
use schemadoc_schemas::{RouteSchemaValidator, SchemaValidator, ValidationMode, ValidationContext};

#[cfg(test)]
mod section_validation {
    use super::*;

    #[test]
    fn test_full_route_is_valid() {
        let route = json!({
            "summary": "Update an item",
            "tags": ["items"],
            "params": {
                "type": "object",
                "properties": {"id": {"type": "string", "description": "the item id"}},
                "required": ["id"]
            },
            "querystring": {
                "type": "object",
                "patternProperties": {"^x-": {"type": "string"}},
                "additionalProperties": false
            },
            "headers": {"type": "object", "properties": {"x-request-id": {"type": "string"}}},
            "body": {
                "type": "object",
                "properties": {
                    "foo": {"type": "string"},
                    "nested": {"type": "object", "properties": {"deep": {"type": ["string", "null"]}}}
                }
            },
            "response": {
                "200": {
                    "type": "object",
                    "properties": {"_id": {"type": "string"}, "foo": {"type": "string"}}
                },
                "4XX": {"type": "object", "properties": {"message": {"type": "string"}}},
                "default": true
            }
        });

        let validator = RouteSchemaValidator::new();
        assert!(validator.validate(&route).is_ok());
        assert!(validator.validate_partial(&route).is_ok());
    }

    #[test]
    fn test_response_must_be_object() {
        let route = json!({"response": [{"type": "object"}]});
        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.response");
    }

    #[test]
    fn test_unknown_route_keys_pass_through() {
        let route = json!({"x-internal": 42, "operationId": "getItem"});
        assert!(RouteSchemaValidator::new().validate(&route).is_ok());
    }
}

#[cfg(test)]
mod malformed_nodes {
    use super::*;

    #[test]
    fn test_deep_type_inconsistency_reports_full_path() {
        let route = json!({
            "response": {
                "200": {
                    "type": "object",
                    "properties": {
                        "items": {
                            "type": "array",
                            "items": {
                                "type": "string",
                                "properties": {"_id": {"type": "string"}}
                            }
                        }
                    }
                }
            }
        });

        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.response.200.properties.items.items");
        assert!(err.to_string().contains("type_consistency"));
    }

    #[test]
    fn test_additional_properties_must_be_schema() {
        let route = json!({"body": {"type": "object", "additionalProperties": "yes"}});
        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.body.additionalProperties");
    }

    #[test]
    fn test_required_must_list_strings() {
        let route = json!({"body": {"type": "object", "required": "foo"}});
        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.body.required");
    }

    #[test]
    fn test_description_must_be_string() {
        let route = json!({"params": {"type": "object", "properties": {"id": {"description": 7}}}});
        let err = RouteSchemaValidator::new().validate(&route).unwrap_err();
        assert_eq!(err.path, "$.params.properties.id.description");
    }

    #[test]
    fn test_context_prefix_is_respected() {
        let route = json!({"body": 5});
        let context = ValidationContext::new(ValidationMode::Basic).child("routes").child("create");
        let err = RouteSchemaValidator::new()
            .validate_with_context(&route, &context)
            .unwrap_err();
        assert_eq!(err.path, "$.routes.create.body");
    }
}
