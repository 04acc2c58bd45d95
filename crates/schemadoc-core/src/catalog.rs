//! Batch transformation of route catalogs
//!
//! A catalog is `{"routes": {"<name>": <route schema>, ...}}`. Every route is
//! transformed independently; failures are collected with paths re-rooted
//! under `$.routes.<name>` instead of aborting the batch.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::transformer::{SchemaDocTransformer, TransformStats};
use crate::VERSION;
use schemadoc_schemas::{
    RouteSchemaValidator, SchemaValidator, ValidationContext, ValidationError, ValidationErrors, ValidationHelpers,
    ValidationMode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Key holding the routes of a catalog
pub const ROUTES_KEY: &str = "routes";

/// A loaded document: one route schema or a catalog of them
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDocument {
    Route(Value),
    Catalog(Map<String, Value>),
}

impl SchemaDocument {
    /// Tell routes and catalogs apart
    ///
    /// A document whose only key is `routes`, holding an object, is a
    /// catalog. Any other object is a single route schema.
    pub fn detect(document: Value) -> Result<Self> {
        match document {
            Value::Object(mut map) => {
                if map.len() == 1 && matches!(map.get(ROUTES_KEY), Some(Value::Object(_))) {
                    if let Some(Value::Object(routes)) = map.remove(ROUTES_KEY) {
                        return Ok(Self::Catalog(routes));
                    }
                }
                Ok(Self::Route(Value::Object(map)))
            }
            other => Err(Error::invalid_document(format!(
                "expected a route schema or a route catalog object, found {}",
                ValidationHelpers::kind_name(&other)
            ))),
        }
    }

    pub fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }
}

/// How a batch reacts to failing routes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Stop at the first failing route
    pub fail_fast: bool,
    /// Stop after this many failures (0 = unlimited)
    pub max_errors: usize,
}

impl BatchConfig {
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Whether the batch should stop after `failed` failures
    pub fn should_stop(&self, failed: usize) -> bool {
        (self.fail_fast && failed > 0) || (self.max_errors > 0 && failed >= self.max_errors)
    }
}

/// Generation details recorded alongside a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp
    pub generated_at: String,
    /// Library version that produced the report
    pub version: String,
    pub route_count: usize,
    pub failed_count: usize,
}

/// Outcome of transforming a catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogReport {
    /// Successfully transformed routes, in input order
    pub routes: Map<String, Value>,
    pub stats: TransformStats,
    pub errors: ValidationErrors,
    pub metadata: ReportMetadata,
}

impl CatalogReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// The transformed catalog as a document
    pub fn into_document(self) -> Value {
        let mut document = Map::with_capacity(1);
        document.insert(ROUTES_KEY.to_string(), Value::Object(self.routes));
        Value::Object(document)
    }
}

/// Transform every route of a catalog
pub fn transform_catalog(
    transformer: &SchemaDocTransformer,
    routes: &Map<String, Value>,
    config: &BatchConfig,
) -> CatalogReport {
    transform_catalog_with(transformer, routes, config, |_, _| {})
}

/// Transform every route of a catalog, calling `on_route` after each one
///
/// The callback receives the route name and whether it succeeded.
pub fn transform_catalog_with<F>(
    transformer: &SchemaDocTransformer,
    routes: &Map<String, Value>,
    config: &BatchConfig,
    mut on_route: F,
) -> CatalogReport
where
    F: FnMut(&str, bool),
{
    let mut transformed = Map::with_capacity(routes.len());
    let mut stats = TransformStats::new();
    let mut errors = ValidationErrors::new();

    for (name, route) in routes {
        let prefix = format!("$.{}.{}", ROUTES_KEY, name);

        match transformer.transform_with_stats(route) {
            Ok((doc, route_stats)) => {
                debug!(route = %name, changes = route_stats.total_changes(), "route transformed");
                stats.merge(&route_stats);
                transformed.insert(name.clone(), doc);
                on_route(name, true);
            }
            Err(e) => {
                warn!(route = %name, error = %e, "route failed to transform");
                errors.add(route_error(e, &prefix));
                on_route(name, false);

                if config.should_stop(errors.len()) {
                    info!(failed = errors.len(), "stopping catalog transformation early");
                    break;
                }
            }
        }
    }

    let metadata = ReportMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        version: VERSION.to_string(),
        route_count: routes.len(),
        failed_count: errors.len(),
    };

    CatalogReport {
        routes: transformed,
        stats,
        errors,
        metadata,
    }
}

/// Validate every route of a catalog without transforming it
///
/// Errors carry `$.routes.<name>` paths. `config` decides when to stop.
pub fn validate_catalog(routes: &Map<String, Value>, mode: ValidationMode, config: &BatchConfig) -> ValidationErrors {
    let validator = RouteSchemaValidator::new();
    let context = ValidationContext::new(mode).child(ROUTES_KEY);
    let mut errors = ValidationErrors::new();

    for (name, route) in routes {
        if let Err(error) = validator.validate_with_context(route, &context.child(name)) {
            debug!(route = %name, path = %error.path, "route is malformed");
            errors.add(error);

            if config.should_stop(errors.len()) {
                info!(failed = errors.len(), "stopping catalog validation early");
                break;
            }
        }
    }

    errors
}

fn route_error(error: Error, prefix: &str) -> ValidationError {
    match error {
        Error::MalformedSchema { source, .. } => source.rebase(prefix),
        other => ValidationError::new(prefix, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> Map<String, Value> {
        match json!({
            "getDocument": {
                "params": {"type": "object", "properties": {"id": {"type": "string"}}},
                "response": {"200": {"type": "object", "properties": {"_id": {"type": "string"}}}}
            },
            "broken": {"body": {"type": "array", "properties": {}}},
            "createDocument": {
                "body": {"type": "object", "required": ["_id"], "properties": {"_id": {"type": "string"}}}
            },
            "alsoBroken": []
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_detect() {
        let doc = SchemaDocument::detect(json!({"routes": {"a": {}}})).unwrap();
        assert!(doc.is_catalog());

        let doc = SchemaDocument::detect(json!({"routes": {}, "summary": "x"})).unwrap();
        assert!(!doc.is_catalog());

        let doc = SchemaDocument::detect(json!({"body": {"type": "object"}})).unwrap();
        assert_eq!(doc, SchemaDocument::Route(json!({"body": {"type": "object"}})));

        assert!(matches!(SchemaDocument::detect(json!([1])), Err(Error::InvalidDocument { .. })));
    }

    #[test]
    fn test_collects_all_failures() {
        let transformer = SchemaDocTransformer::new();
        let report = transform_catalog(&transformer, &catalog(), &BatchConfig::default());

        assert!(!report.is_success());
        assert_eq!(report.routes.keys().collect::<Vec<_>>(), ["getDocument", "createDocument"]);
        assert_eq!(report.errors.len(), 2);

        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["$.routes.broken.body", "$.routes.alsoBroken"]);

        assert_eq!(report.stats.identifiers_removed, 1);
        assert_eq!(report.stats.identifiers_annotated, 1);
        assert_eq!(report.metadata.route_count, 4);
        assert_eq!(report.metadata.failed_count, 2);
        assert_eq!(report.metadata.version, VERSION);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let transformer = SchemaDocTransformer::new();
        let mut seen = Vec::new();
        let report = transform_catalog_with(
            &transformer,
            &catalog(),
            &BatchConfig::default().with_fail_fast(),
            |name, ok| seen.push((name.to_string(), ok)),
        );

        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            seen,
            vec![("getDocument".to_string(), true), ("broken".to_string(), false)]
        );
    }

    #[test]
    fn test_validate_catalog_honours_batch_config() {
        let errors = validate_catalog(&catalog(), ValidationMode::Basic, &BatchConfig::default());
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["$.routes.broken.body", "$.routes.alsoBroken"]);

        let errors = validate_catalog(&catalog(), ValidationMode::Basic, &BatchConfig::default().with_fail_fast());
        assert_eq!(errors.len(), 1);

        let errors = validate_catalog(&catalog(), ValidationMode::Basic, &BatchConfig::default().with_max_errors(2));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_into_document() {
        let transformer = SchemaDocTransformer::new();
        let mut routes = catalog();
        routes.retain(|name, _| name == "createDocument");

        let report = transform_catalog(&transformer, &routes, &BatchConfig::default().with_max_errors(1));
        assert!(report.is_success());
        assert_eq!(
            report.into_document(),
            json!({"routes": {"createDocument": {"body": {"type": "object", "properties": {}}}}})
        );
    }
}
