//! Transform command handler

use crate::cli::{OutputFormat, TransformArgs};
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::{stats_rows, OutputWriter};
use schemadoc_core::{transform_catalog_with, SchemaDocTransformer, SchemaDocument, TransformOptions, TransformStats};
use schemadoc_schemas::{Format, SchemaParser};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::utils::load_document;

/// Handle the transform command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("transform_command", &format!("file: {}", args.file.display()));

    // Reject an unwritable destination before doing any work
    if let Some(path) = &args.save_to {
        Format::from_path(path).map_err(|_| {
            Error::invalid_args(format!(
                "--save-to must end in .json, .yaml or .yml, got '{}'",
                path.display()
            ))
        })?;
    }

    let options = build_options(&args, config);
    debug!(?options, "effective transform options");
    let transformer = SchemaDocTransformer::with_options(options)?;

    output.info(&format!("Transforming {}", args.file.display()))?;
    let document = load_document(&args.file)?;

    let (result, stats) = match document {
        SchemaDocument::Route(route) => {
            if args.fail_fast {
                warn!("--fail-fast only applies to route catalogs");
            }
            transform_route(&transformer, &route, output)?
        }
        SchemaDocument::Catalog(routes) => transform_catalog(&transformer, &routes, &args, config, output)?,
    };

    info!(changes = stats.total_changes(), "transformation finished");

    let machine = output.format() != OutputFormat::Human;
    match &args.save_to {
        Some(path) => {
            SchemaParser::new()
                .write_file(path, &result)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output.success(&format!("✓ Documentation schema written to {}", path.display()))?;
            if args.stats && machine {
                output.stats(&stats)?;
            }
        }
        None if args.stats && machine => output.data(&TransformOutput {
            document: &result,
            stats: &stats,
        })?,
        None => output.data(&result)?,
    }

    if args.stats && !machine {
        output.section("Statistics")?;
        output.table(&["Counter", "Value"], stats_rows(&stats))?;
    }

    Ok(())
}

/// Document and statistics as one machine-readable value
#[derive(Serialize)]
struct TransformOutput<'a> {
    document: &'a Value,
    stats: &'a TransformStats,
}

/// Merge config-file options with command-line flags
///
/// Flags win. Repeated list flags replace the configured list entirely.
fn build_options(args: &TransformArgs, config: &Config) -> TransformOptions {
    let mut options = config.transform.clone();

    if !args.identifier_fields.is_empty() {
        options.identifier_fields = args.identifier_fields.clone();
    }
    if !args.internal_keywords.is_empty() {
        options.internal_keywords = args.internal_keywords.clone();
    }
    if let Some(policy) = args.request_policy {
        options.request_policy = policy.into();
    }
    if let Some(policy) = args.response_policy {
        options.response_policy = policy.into();
    }
    if args.nullable {
        options.nullable_type_arrays = true;
    }
    if let Some(mode) = args.strict {
        options.validation_mode = mode.into();
    }

    options
}

fn transform_route(
    transformer: &SchemaDocTransformer,
    route: &Value,
    output: &mut OutputWriter,
) -> Result<(Value, TransformStats)> {
    let spinner = output.spinner("Transforming route schema");
    let result = transformer.transform_with_stats(route);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let (doc, stats) = result?;
    output.success("✓ Route schema transformed")?;
    Ok((doc, stats))
}

fn transform_catalog(
    transformer: &SchemaDocTransformer,
    routes: &serde_json::Map<String, Value>,
    args: &TransformArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<(Value, TransformStats)> {
    let mut batch = config.batch.clone();
    if args.fail_fast {
        batch = batch.with_fail_fast();
    }

    output.info(&format!("Found route catalog with {} route(s)", routes.len()))?;

    let progress = output.progress_bar(routes.len() as u64, "routes");
    let report = transform_catalog_with(transformer, routes, &batch, |name, _| {
        if let Some(pb) = &progress {
            pb.set_message(name.to_string());
            pb.inc(1);
        }
    });
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if !report.is_success() {
        output.error(&format!(
            "✗ {} of {} route(s) failed",
            report.metadata.failed_count, report.metadata.route_count
        ))?;
        output.catalog_summary(&report)?;
        return Err(Error::ValidationFailed {
            count: report.errors.len(),
        });
    }

    output.success(&format!("✓ {} route(s) transformed", report.routes.len()))?;
    let stats = report.stats;
    Ok((report.into_document(), stats))
}
