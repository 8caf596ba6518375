//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use storefront_core::{generate_default_config, CONFIG_FILE_NAMES};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[search]");
    ctx.output.kv("host", &ctx.config.search.host);
    ctx.output.kv("index", &ctx.config.search.index);
    ctx.output.kv(
        "api_key",
        if ctx.config.search.api_key.is_some() {
            "(set)"
        } else {
            "(none)"
        },
    );
    ctx.output
        .kv("timeout_ms", &ctx.config.search.timeout_ms.to_string());

    ctx.output.info("[backend]");
    ctx.output.kv("base_url", &ctx.config.backend.base_url);
    ctx.output
        .kv("timeout_ms", &ctx.config.backend.timeout_ms.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    ctx.config.validate()?;

    let mut warnings: Vec<String> = Vec::new();
    let local = |url: &str| url.contains("localhost") || url.contains("127.0.0.1");
    if ctx.config.search.api_key.is_none() && !local(&ctx.config.search.host) {
        warnings.push("search.api_key is not set for a remote search host".to_string());
    }
    if ctx.config.search.timeout_ms > ctx.config.backend.timeout_ms * 10 {
        warnings.push("search.timeout_ms is unusually long for interactive search".to_string());
    }

    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
