//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use stock_core::{keys, DashboardConfig};
use stock_observability::{LogFormat, LogLevel};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{env_var_name, generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config.dashboard);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config.source {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    for key in keys::ALL {
        let value = get_config_value(&ctx.config.dashboard, key)?;
        let overridden = std::env::var(env_var_name(key)).is_ok();
        if overridden {
            ctx.output
                .kv(key, &format!("{} (from {})", value, env_var_name(key)));
        } else {
            ctx.output.kv(key, &value);
        }
    }
    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config.dashboard, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    if !keys::ALL.contains(&key) {
        bail!("Unknown config key: {}", key);
    }
    let Some(path) = ctx.config.source.clone().or_else(|| CliConfig::find(&ctx.cwd)) else {
        bail!("No config file found. Run `stock config init` to create one.");
    };

    // Edit the file's own values, not the env-overridden ones.
    let mut config = CliConfig::load(&path)?;
    config.dashboard = config
        .dashboard
        .overlay(|k| (k == key).then(|| value.to_string()))?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

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

    let warnings = config_warnings(&ctx.config.dashboard);
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

/// Problems that do not stop the dashboard from running. Hard errors are
/// rejected when the config is loaded.
fn config_warnings(config: &DashboardConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Err(e) = config.log_level.parse::<LogLevel>() {
        warnings.push(format!("{}: {}, info will be used", keys::LOG_LEVEL, e));
    }
    if let Err(e) = config.log_format.parse::<LogFormat>() {
        warnings.push(format!("{}: {}, json will be used", keys::LOG_FORMAT, e));
    }
    if config.upstream.base_url.starts_with("http://") {
        warnings.push(format!("{} is not using https", keys::UPSTREAM_BASE_URL));
    }
    if config.upstream.timeout_ms > 60_000 {
        warnings.push(format!(
            "{} of {}ms is longer than a minute",
            keys::UPSTREAM_TIMEOUT_MS,
            config.upstream.timeout_ms
        ));
    }
    warnings
}

fn get_config_value(config: &DashboardConfig, key: &str) -> Result<String> {
    let value = match key {
        keys::UPSTREAM_BASE_URL => config.upstream.base_url.clone(),
        keys::UPSTREAM_TIMEOUT_MS => config.upstream.timeout_ms.to_string(),
        keys::ENVIRONMENT => config.environment.clone(),
        keys::LOG_LEVEL => config.log_level.clone(),
        keys::LOG_FORMAT => config.log_format.clone(),
        _ => bail!("Unknown config key: {}", key),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = DashboardConfig::default();
        assert_eq!(
            get_config_value(&config, keys::UPSTREAM_BASE_URL).unwrap(),
            "https://dummyjson.com"
        );
        assert_eq!(
            get_config_value(&config, keys::UPSTREAM_TIMEOUT_MS).unwrap(),
            "10000"
        );
        assert!(get_config_value(&config, "workload.name").is_err());
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = DashboardConfig::default();
        for key in keys::ALL {
            assert!(get_config_value(&config, key).is_ok(), "{}", key);
        }
    }

    #[test]
    fn test_defaults_have_no_warnings() {
        assert!(config_warnings(&DashboardConfig::default()).is_empty());
    }

    #[test]
    fn test_warnings() {
        let mut config = DashboardConfig::default();
        config.log_level = "verbose".into();
        config.upstream.base_url = "http://localhost:3000".into();

        let warnings = config_warnings(&config);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("verbose"));
        assert!(warnings[1].contains("https"));
    }
}
