//! Projection of internal route schemas into public documentation schemas
//!
//! The [`SchemaDocTransformer`] walks a route schema depth-first and builds a
//! fresh tree in which:
//!
//! - identifier fields (`_id` by default) are removed from request sections
//!   together with their `required` entries
//! - identifier fields anywhere inside a response are kept and annotated
//!   with a description, an example and the 24-hex pattern
//! - internal keywords (`$id` by default) are stripped from every node
//! - everything else keeps its shape and key order
//!
//! # Module Organization
//!
//! - [`context`] - section, policy and path of the node being visited
//! - [`stats`] - counters describing what a run changed
//!
//! # Example
//!
//! ```
//! use schemadoc_core::SchemaDocTransformer;
//! use serde_json::json;
//!
//! let transformer = SchemaDocTransformer::new();
//! let route = json!({
//!     "body": {
//!         "type": "object",
//!         "required": ["_id", "name"],
//!         "properties": {"_id": {"type": "string"}, "name": {"type": "string"}}
//!     },
//!     "response": {
//!         "200": {"type": "object", "properties": {"_id": {"type": "string"}}}
//!     }
//! });
//!
//! let doc = transformer.transform(&route).unwrap();
//! assert_eq!(doc["body"]["required"], json!(["name"]));
//! assert!(doc["body"]["properties"].get("_id").is_none());
//! assert_eq!(doc["response"]["200"]["properties"]["_id"]["examples"], json!(["000000000000000000000000"]));
//! ```
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

pub mod context;
pub mod stats;


pub use context::NodeScope;
pub use stats::TransformStats;

use crate::error::{Error, Result};
use crate::options::{IdentifierPolicy, TransformOptions};
use schemadoc_schemas::keywords::{subschema_shape, SubschemaShape};
use schemadoc_schemas::{
    RouteSchemaValidator, SchemaNodeValidator, SchemaValidator, Section, ValidationContext,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

/// Converts internal route schemas into documentation schemas
///
/// The transformer holds only its options and validators, so one instance
/// can be shared freely between threads. Inputs are never mutated.
#[derive(Debug, Clone)]
pub struct SchemaDocTransformer {
    options: TransformOptions,
    routes: RouteSchemaValidator,
    nodes: SchemaNodeValidator,
}

impl Default for SchemaDocTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDocTransformer {
    /// Create a transformer with the default options
    pub fn new() -> Self {
        Self {
            options: TransformOptions::default(),
            routes: RouteSchemaValidator::new(),
            nodes: SchemaNodeValidator::new(),
        }
    }

    /// Create a transformer with custom options
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the options fail
    /// [`TransformOptions::validate`].
    pub fn with_options(options: TransformOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            ..Self::new()
        })
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform a route schema into its documentation form
    ///
    /// The input is validated first; the first malformed node aborts the
    /// run with [`Error::MalformedSchema`] carrying its JSON path.
    pub fn transform(&self, route: &Value) -> Result<Value> {
        self.transform_with_stats(route).map(|(doc, _)| doc)
    }

    /// Transform a route schema and report what changed
    #[instrument(level = "debug", skip_all)]
    pub fn transform_with_stats(&self, route: &Value) -> Result<(Value, TransformStats)> {
        let context = ValidationContext::new(self.options.validation_mode);
        self.routes.validate_with_context(route, &context)?;

        let sections = route
            .as_object()
            .ok_or_else(|| Error::invalid_document("route schema must be an object"))?;

        let mut stats = TransformStats::new();
        let mut doc = Map::with_capacity(sections.len());

        for (key, value) in sections {
            let transformed = match Section::from_key(key) {
                Some(Section::Response) => self.transform_response(value, &mut stats),
                Some(section) => {
                    let scope = NodeScope::new(section, self.options.policy_for(section), format!("$.{}", key));
                    self.transform_node_inner(value, &scope, &mut stats)
                }
                None => {
                    trace!(key = %key, "passing route key through");
                    value.clone()
                }
            };
            doc.insert(key.clone(), transformed);
        }

        debug!(
            nodes = stats.nodes_visited,
            removed = stats.identifiers_removed,
            annotated = stats.identifiers_annotated,
            stripped = stats.internal_keywords_stripped,
            "route schema transformed"
        );

        Ok((Value::Object(doc), stats))
    }

    /// Transform one schema node as if it sat at the root of `section`
    ///
    /// For [`Section::Response`] the node is a single response schema, not
    /// the map of status codes.
    pub fn transform_node(&self, node: &Value, section: Section) -> Result<Value> {
        let path = format!("$.{}", section);
        let context = ValidationContext::new(self.options.validation_mode).child(section.key());
        self.nodes.validate_with_context(node, &context)?;

        let scope = NodeScope::new(section, self.options.policy_for(section), path);
        let mut stats = TransformStats::new();
        Ok(self.transform_node_inner(node, &scope, &mut stats))
    }

    fn transform_response(&self, response: &Value, stats: &mut TransformStats) -> Value {
        let Some(codes) = response.as_object() else {
            return response.clone();
        };

        let policy = self.options.policy_for(Section::Response);
        let out = codes
            .iter()
            .map(|(code, node)| {
                let scope = NodeScope::new(Section::Response, policy, format!("$.response.{}", code));
                (code.clone(), self.transform_node_inner(node, &scope, stats))
            })
            .collect();

        Value::Object(out)
    }

    fn transform_node_inner(&self, node: &Value, scope: &NodeScope, stats: &mut TransformStats) -> Value {
        stats.nodes_visited += 1;

        match node {
            Value::Object(map) => Value::Object(self.transform_object(map, scope, stats)),
            other => other.clone(),
        }
    }

    fn transform_object(
        &self,
        map: &Map<String, Value>,
        scope: &NodeScope,
        stats: &mut TransformStats,
    ) -> Map<String, Value> {
        let mut out = Map::with_capacity(map.len());
        let mut removed = Vec::new();

        for (keyword, value) in map {
            if self.options.is_internal_keyword(keyword) {
                trace!(path = %scope.path, keyword = %keyword, "stripping internal keyword");
                stats.internal_keywords_stripped += 1;
                continue;
            }

            let child = scope.child(keyword);
            let transformed = match (keyword.as_str(), value) {
                ("properties", Value::Object(properties)) => {
                    Value::Object(self.transform_properties(properties, &child, &mut removed, stats))
                }
                ("patternProperties", Value::Object(patterns)) => {
                    Value::Object(self.transform_named(patterns, &child, stats))
                }
                ("items", Value::Array(tuple)) => Value::Array(self.transform_list(tuple, &child, stats)),
                ("items", single) => self.transform_node_inner(single, &child, stats),
                (k, v) => match (subschema_shape(k), v) {
                    (Some(SubschemaShape::Single), node) => self.transform_node_inner(node, &child, stats),
                    (Some(SubschemaShape::List), Value::Array(list)) => {
                        Value::Array(self.transform_list(list, &child, stats))
                    }
                    (Some(SubschemaShape::Named), Value::Object(named)) => {
                        Value::Object(self.transform_named(named, &child, stats))
                    }
                    (Some(SubschemaShape::Dependencies), Value::Object(dependencies)) => {
                        Value::Object(self.transform_dependencies(dependencies, &child, stats))
                    }
                    _ => v.clone(),
                },
            };
            out.insert(keyword.clone(), transformed);
        }

        if !removed.is_empty() {
            Self::prune_required(&mut out, &removed);
        }

        if self.options.nullable_type_arrays && Self::rewrite_nullable(&mut out) {
            stats.nullable_rewrites += 1;
        }

        out
    }

    /// Apply the identifier policy to one `properties` mapping
    ///
    /// Names of removed properties are pushed onto `removed` so the owning
    /// node can prune its `required` list.
    fn transform_properties<'a>(
        &self,
        properties: &'a Map<String, Value>,
        scope: &NodeScope,
        removed: &mut Vec<&'a str>,
        stats: &mut TransformStats,
    ) -> Map<String, Value> {
        let mut out = Map::with_capacity(properties.len());

        for (name, subschema) in properties {
            let child = scope.child(name);

            if !self.options.is_identifier(name) {
                out.insert(name.clone(), self.transform_node_inner(subschema, &child, stats));
                continue;
            }

            match scope.policy {
                IdentifierPolicy::Remove => {
                    debug!(path = %child.path, "removing identifier field");
                    stats.identifiers_removed += 1;
                    removed.push(name.as_str());
                }
                IdentifierPolicy::Annotate => {
                    let mut node = self.transform_node_inner(subschema, &child, stats);
                    if self.annotate(&mut node) {
                        debug!(path = %child.path, "annotating identifier field");
                        stats.identifiers_annotated += 1;
                    }
                    out.insert(name.clone(), node);
                }
                IdentifierPolicy::Keep => {
                    out.insert(name.clone(), self.transform_node_inner(subschema, &child, stats));
                }
            }
        }

        out
    }

    fn transform_list(&self, list: &[Value], scope: &NodeScope, stats: &mut TransformStats) -> Vec<Value> {
        list.iter()
            .enumerate()
            .map(|(i, node)| self.transform_node_inner(node, &scope.child_index(i), stats))
            .collect()
    }

    fn transform_named(
        &self,
        named: &Map<String, Value>,
        scope: &NodeScope,
        stats: &mut TransformStats,
    ) -> Map<String, Value> {
        named
            .iter()
            .map(|(name, node)| (name.clone(), self.transform_node_inner(node, &scope.child(name), stats)))
            .collect()
    }

    /// Property-name lists pass through; schema entries are transformed
    fn transform_dependencies(
        &self,
        dependencies: &Map<String, Value>,
        scope: &NodeScope,
        stats: &mut TransformStats,
    ) -> Map<String, Value> {
        dependencies
            .iter()
            .map(|(name, dependency)| {
                let transformed = match dependency {
                    Value::Array(_) => dependency.clone(),
                    subschema => self.transform_node_inner(subschema, &scope.child(name), stats),
                };
                (name.clone(), transformed)
            })
            .collect()
    }

    /// Write the identifier metadata onto a string-typed or untyped node
    ///
    /// Existing keywords are overwritten where they stand. Returns `false`
    /// and leaves the node alone when it declares a non-string type.
    fn annotate(&self, node: &mut Value) -> bool {
        let Value::Object(map) = node else {
            return false;
        };

        let annotatable = match map.get("type") {
            None => true,
            Some(Value::String(kind)) => kind == "string",
            Some(Value::Array(kinds)) => kinds.iter().any(|k| k == "string"),
            Some(_) => false,
        };
        if !annotatable {
            return false;
        }

        let annotation = &self.options.annotation;
        if !map.contains_key("type") {
            map.insert("type".to_string(), Value::from("string"));
        }
        map.insert("description".to_string(), Value::from(annotation.description.as_str()));
        map.insert(
            "examples".to_string(),
            Value::Array(vec![Value::from(annotation.example.as_str())]),
        );
        map.insert("pattern".to_string(), Value::from(annotation.pattern.as_str()));
        true
    }

    /// Drop removed names from `required`; an emptied list is dropped too
    fn prune_required(node: &mut Map<String, Value>, removed: &[&str]) {
        let emptied = match node.get_mut("required") {
            Some(Value::Array(required)) => {
                required.retain(|name| name.as_str().map_or(true, |n| !removed.contains(&n)));
                required.is_empty()
            }
            _ => false,
        };

        if emptied {
            node.shift_remove("required");
        }
    }

    /// Rewrite `type: [X, "null"]` into `type: X, nullable: true`
    fn rewrite_nullable(node: &mut Map<String, Value>) -> bool {
        let kind = match node.get("type") {
            Some(Value::Array(kinds)) if kinds.len() == 2 && kinds.iter().any(|k| k == "null") => {
                match kinds.iter().find(|k| *k != "null") {
                    Some(Value::String(kind)) => kind.clone(),
                    _ => return false,
                }
            }
            _ => return false,
        };

        node.insert("type".to_string(), Value::String(kind));
        node.insert("nullable".to_string(), Value::Bool(true));
        true
    }
}
