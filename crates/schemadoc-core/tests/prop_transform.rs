//! Property-based tests for the documentation schema transformer
//!
//! Transforming twice must equal transforming once, nothing but identifier
//! fields and internal keywords may change, and no internal keyword
//! survives anywhere in the output.

use proptest::prelude::*;
use schemadoc_core::SchemaDocTransformer;
use serde_json::{json, Map, Value};

/// Well-formed schema nodes without identifier fields or internal keywords
fn plain_node_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(json!({"type": "string"})),
        Just(json!({"type": "integer", "description": "a count"})),
        Just(json!({"type": ["string", "null"]})),
        Just(json!({"enum": ["a", "b"]})),
        Just(json!(true)),
    ];

    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(("[a-z]{1,8}", inner.clone()), 0..4).prop_map(|fields| {
                let properties: Map<String, Value> = fields.into_iter().collect();
                json!({"type": "object", "properties": properties, "additionalProperties": false})
            }),
            inner.clone().prop_map(|items| json!({"type": "array", "items": items})),
            proptest::collection::vec(inner, 1..3).prop_map(|any| json!({"anyOf": any})),
        ]
    })
}

/// Well-formed schema nodes that may carry `_id` fields and `$id` keywords
fn node_with_identifiers_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(json!({"type": "string"})),
        Just(json!({"type": "integer"})),
        Just(json!({"type": ["string", "null"]})),
        Just(json!({"$id": "#leaf", "type": "string"})),
        Just(json!({})),
        Just(json!(true)),
    ];

    leaf.prop_recursive(4, 48, 4, |inner| {
        let name = prop_oneof![2 => "[a-z]{1,8}", 1 => Just("_id".to_string())];
        prop_oneof![
            (proptest::collection::vec((name, inner.clone()), 0..4), any::<bool>()).prop_map(
                |(fields, tagged)| {
                    let required: Vec<String> = fields.iter().map(|(n, _)| n.clone()).collect();
                    let properties: Map<String, Value> = fields.into_iter().collect();
                    let mut node = json!({"type": "object", "required": required, "properties": properties});
                    if tagged {
                        node["$id"] = json!("#object");
                    }
                    node
                }
            ),
            inner.clone().prop_map(|items| json!({"type": "array", "items": items})),
            proptest::collection::vec(inner, 1..3).prop_map(|all| json!({"allOf": all})),
        ]
    })
}

fn route(node: Value) -> Value {
    json!({
        "summary": "generated",
        "params": node.clone(),
        "body": node.clone(),
        "response": {"200": node.clone(), "default": node}
    })
}

fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}

proptest! {
    #[test]
    fn prop_transform_is_idempotent(node in node_with_identifiers_strategy()) {
        let transformer = SchemaDocTransformer::new();
        let once = transformer.transform(&route(node)).unwrap();
        let twice = transformer.transform(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_plain_schemas_are_unchanged(node in plain_node_strategy()) {
        let input = route(node);
        let (output, stats) = SchemaDocTransformer::new().transform_with_stats(&input).unwrap();
        prop_assert_eq!(&output, &input);
        prop_assert_eq!(stats.total_changes(), 0);
    }

    #[test]
    fn prop_internal_keywords_never_survive(node in node_with_identifiers_strategy()) {
        let output = SchemaDocTransformer::new().transform(&route(node)).unwrap();
        prop_assert!(!contains_key(&output, "$id"));
        prop_assert!(!contains_key(&output["params"], "_id"));
        prop_assert!(!contains_key(&output["body"], "_id"));
    }

    #[test]
    fn prop_request_sections_never_mention_identifiers(node in node_with_identifiers_strategy()) {
        let output = SchemaDocTransformer::new().transform(&route(node)).unwrap();
        prop_assert!(!output["params"].to_string().contains("\"_id\""));
        prop_assert!(!output["body"].to_string().contains("\"_id\""));
    }
}
