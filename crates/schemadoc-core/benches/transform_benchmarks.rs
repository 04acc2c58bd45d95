//! Benchmarks for the documentation schema transformer
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schemadoc_core::{
    transform_catalog, BatchConfig, SchemaDocTransformer, TransformOptions, ValidationMode,
};
use serde_json::{json, Map, Value};

fn create_route() -> Value {
    json!({
        "summary": "Update a document",
        "params": {
            "type": "object",
            "required": ["id"],
            "properties": {"id": {"type": "string"}}
        },
        "body": {
            "type": "object",
            "required": ["_id", "name"],
            "properties": {
                "_id": {"type": "string"},
                "name": {"type": "string", "pattern": "^[a-z]+$"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        },
        "response": {
            "200": {
                "$id": "reply",
                "type": "object",
                "properties": {
                    "_id": {"type": "string"},
                    "name": {"type": "string"},
                    "owner": {"type": "object", "properties": {"_id": {}}}
                }
            }
        }
    })
}

/// A body nested `depth` objects deep, each level carrying an identifier
fn create_nested_route(depth: usize) -> Value {
    let mut node = json!({"type": "object", "properties": {"_id": {"type": "string"}}});
    for level in 0..depth {
        let mut properties = Map::new();
        properties.insert("_id".to_string(), json!({"type": "string"}));
        properties.insert(format!("level{}", level), node);
        node = json!({"type": "object", "required": ["_id"], "properties": properties});
    }
    json!({"body": node.clone(), "response": {"200": node}})
}

fn bench_single_route(c: &mut Criterion) {
    let route = create_route();
    let transformer = SchemaDocTransformer::new();

    c.bench_function("transform_route_basic", |b| {
        b.iter(|| transformer.transform(black_box(&route)))
    });

    let strict = SchemaDocTransformer::with_options(
        TransformOptions::default().with_validation_mode(ValidationMode::Partial),
    )
    .unwrap();
    c.bench_function("transform_route_partial", |b| {
        b.iter(|| strict.transform(black_box(&route)))
    });
}

fn bench_nesting(c: &mut Criterion) {
    let transformer = SchemaDocTransformer::new();
    let mut group = c.benchmark_group("transform_nesting");

    for depth in [4, 16, 64] {
        let route = create_nested_route(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &route, |b, route| {
            b.iter(|| transformer.transform(black_box(route)))
        });
    }

    group.finish();
}

fn bench_catalog(c: &mut Criterion) {
    let transformer = SchemaDocTransformer::new();
    let routes: Map<String, Value> = (0..100).map(|i| (format!("route{}", i), create_route())).collect();

    c.bench_function("transform_catalog_100", |b| {
        b.iter(|| transform_catalog(&transformer, black_box(&routes), &BatchConfig::default()))
    });
}

criterion_group!(benches, bench_single_route, bench_nesting, bench_catalog);
criterion_main!(benches);
