//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stock_core::{keys, DashboardConfig};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["stock.toml", ".stock.toml", "stock.json"];

/// Prefix for environment overrides, e.g. `STOCK_UPSTREAM_BASE_URL`.
pub const ENV_PREFIX: &str = "STOCK_";

/// Loaded configuration and where it came from.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dashboard: DashboardConfig,
    /// The file it was read from, if any.
    pub source: Option<PathBuf>,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let dashboard: DashboardConfig = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };
        dashboard
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(Self {
            dashboard,
            source: Some(path.to_path_buf()),
        })
    }

    /// Find the nearest config file from `start` upwards.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply `STOCK_*` overrides from a variable lookup.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.dashboard = self
            .dashboard
            .overlay(|key| lookup(&env_var_name(key)))
            .context("Invalid environment override")?;
        Ok(self)
    }

    /// Write the configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(&self.dashboard)?
        } else {
            toml::to_string_pretty(&self.dashboard)?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// Environment variable that overrides a config key.
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_ascii_uppercase())
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Generate a default stock.toml.
pub fn generate_default_config() -> String {
    let defaults = DashboardConfig::default();
    format!(
        r#"# Inventory dashboard configuration
#
# Every value can be overridden with an environment variable, e.g.
# {env_base_url}=http://localhost:3000

environment = "{environment}"
log_level = "{log_level}"
log_format = "human"

[upstream]
base_url = "{base_url}"
timeout_ms = {timeout_ms}
"#,
        env_base_url = env_var_name(keys::UPSTREAM_BASE_URL),
        environment = defaults.environment,
        log_level = defaults.log_level,
        base_url = defaults.upstream.base_url,
        timeout_ms = defaults.upstream.timeout_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stock-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config_parses() {
        let parsed: DashboardConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed.upstream, DashboardConfig::default().upstream);
        assert_eq!(parsed.log_format, "human");
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = scratch_dir("load");

        let toml_path = dir.join("stock.toml");
        std::fs::write(
            &toml_path,
            "environment = \"staging\"\n[upstream]\nbase_url = \"http://localhost:3000\"\ntimeout_ms = 500\n",
        )
        .unwrap();
        let config = CliConfig::load(&toml_path).unwrap();
        assert_eq!(config.dashboard.environment, "staging");
        assert_eq!(config.dashboard.upstream.timeout_ms, 500);
        assert_eq!(config.source.as_deref(), Some(toml_path.as_path()));

        let json_path = dir.join("stock.json");
        std::fs::write(&json_path, r#"{"log_level": "debug"}"#).unwrap();
        let config = CliConfig::load(&json_path).unwrap();
        assert_eq!(config.dashboard.log_level, "debug");
        assert_eq!(config.dashboard.upstream.base_url, "https://dummyjson.com");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = scratch_dir("invalid");
        let path = dir.join("stock.toml");
        std::fs::write(&path, "[upstream]\nbase_url = \"ftp://example.com\"\n").unwrap();
        assert!(CliConfig::load(&path).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_find_walks_up() {
        let dir = scratch_dir("find");
        let nested = dir.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.join(".stock.toml"), "").unwrap();

        assert_eq!(CliConfig::find(&nested), Some(dir.join(".stock.toml")));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<String, String> = [
            ("STOCK_UPSTREAM_TIMEOUT_MS", "2500"),
            ("STOCK_LOG_LEVEL", "WARN"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = CliConfig::default()
            .with_env_overrides(|name| vars.get(name).cloned())
            .unwrap();
        assert_eq!(config.dashboard.upstream.timeout_ms, 2500);
        assert_eq!(config.dashboard.log_level, "warn");
    }

    #[test]
    fn test_env_override_invalid() {
        let result = CliConfig::default().with_env_overrides(|name| {
            (name == "STOCK_UPSTREAM_TIMEOUT_MS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name(keys::UPSTREAM_BASE_URL), "STOCK_UPSTREAM_BASE_URL");
    }
}
