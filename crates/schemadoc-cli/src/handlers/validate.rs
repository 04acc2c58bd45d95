//! Validate command handler

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::{validate_catalog, SchemaDocument, ROUTES_KEY};
use schemadoc_schemas::{
    RouteSchemaValidator, SchemaValidator, ValidationContext, ValidationErrors, ValidationMode,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::utils::load_document;

/// Single machine-readable result of the validate command
#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    errors: ValidationErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<Value>,
}

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.file.display(), strict = ?args.strict))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.file.display()));
    output.info(&format!("Validating {}", args.file.display()))?;

    let mode: ValidationMode = args
        .strict
        .map(Into::into)
        .unwrap_or(config.transform.validation_mode);
    debug!(?mode, "using validation mode");

    let mut batch = config.batch.clone();
    if args.fail_fast {
        batch = batch.with_fail_fast();
    }

    let document = load_document(&args.file)?;
    let errors = {
        let _validation_timer = Timer::new("schema_validation");
        match &document {
            SchemaDocument::Route(route) => {
                output.info("Detected route schema")?;
                validate_route(route, mode)
            }
            SchemaDocument::Catalog(routes) => {
                output.info(&format!("Detected route catalog with {} route(s)", routes.len()))?;
                validate_catalog(routes, mode, &batch)
            }
        }
    };

    let count = errors.len();
    if count == 0 {
        info!("validation completed successfully");
    } else {
        warn!(count, "validation failed");
    }

    let document = args.detailed.then(|| document_value(document));
    if output.format() == OutputFormat::Human {
        write_human(output, &errors, document)?;
    } else {
        output.data(&ValidationReport {
            valid: count == 0,
            errors,
            document,
        })?;
    }

    if count == 0 {
        Ok(())
    } else {
        Err(Error::ValidationFailed { count })
    }
}

fn write_human(output: &mut OutputWriter, errors: &ValidationErrors, document: Option<Value>) -> Result<()> {
    if errors.is_empty() {
        output.success("✓ Schema is valid")?;
    } else {
        output.error("✗ Schema validation failed")?;
        match errors.errors.as_slice() {
            [single] => output.validation_error(single)?,
            _ => output.validation_errors(errors)?,
        }
    }

    if let Some(document) = document {
        output.section("Document")?;
        output.data(&document)?;
    }

    Ok(())
}

fn validate_route(route: &Value, mode: ValidationMode) -> ValidationErrors {
    match RouteSchemaValidator::new().validate_with_context(route, &ValidationContext::new(mode)) {
        Ok(()) => ValidationErrors::new(),
        Err(error) => error.into(),
    }
}

fn document_value(document: SchemaDocument) -> Value {
    match document {
        SchemaDocument::Route(route) => route,
        SchemaDocument::Catalog(routes) => {
            let mut map = Map::with_capacity(1);
            map.insert(ROUTES_KEY.to_string(), Value::Object(routes));
            Value::Object(map)
        }
    }
}
