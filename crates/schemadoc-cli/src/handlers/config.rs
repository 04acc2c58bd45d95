//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Default file written by `config init`
const DEFAULT_INIT_PATH: &str = ".schemadoc.yaml";

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Handle config init subcommand
#[instrument(skip(output))]
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(DEFAULT_INIT_PATH));

    if path.exists() && !args.force {
        output.warning(&format!("Config already exists at {}", path.display()))?;
        output.info("Use --force to overwrite it")?;
        return Ok(());
    }

    Config::default().save(&path)?;
    info!(path = %path.display(), "configuration file written");
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize identifier handling for your project.")?;

    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = render(config, args.format)?;
    output.write(&content)?;
    if !content.ends_with('\n') {
        output.writeln("")?;
    }
    Ok(())
}

fn render(config: &Config, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e))),
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as JSON: {}", e))),
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| Error::config(format!("Failed to serialize as YAML: {}", e))),
    }
}

/// Handle config path subcommand
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    output.section("Configuration Search Path")?;

    let mut active = false;
    for path in Config::default_config_paths() {
        let marker = if !path.exists() {
            "✗"
        } else if active {
            "·"
        } else {
            active = true;
            "✓"
        };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }

    if !active {
        output.info("No configuration file found; defaults are in effect")?;
    }

    if let Ok(path) = std::env::var("SCHEMADOC_CONFIG") {
        output.info(&format!("SCHEMADOC_CONFIG = {}", path))?;
    }

    Ok(())
}
