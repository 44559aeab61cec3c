//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use stock_catalog::CatalogService;
use stock_data::{DummyJsonCatalog, FetchClient};
use stock_observability::{RequestId, StructuredLogger};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from the given config file, or the nearest one found
    /// from the working directory upwards.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => CliConfig::load(&resolve_path(&cwd, path))?,
            None => match CliConfig::find(&cwd) {
                Some(found) => CliConfig::load(&found)?,
                None => CliConfig::default(),
            },
        };
        let config = config.with_env_overrides(|name| std::env::var(name).ok())?;

        if let Some(source) = &config.source {
            output.debug(&format!("Using config: {}", source.display()));
        }

        Ok(Self { config, output, cwd })
    }

    /// Catalog service backed by the configured upstream.
    pub fn catalog(&self) -> CatalogService<DummyJsonCatalog> {
        let upstream = &self.config.dashboard.upstream;
        self.output.debug(&format!(
            "Upstream: {} (timeout {}ms)",
            self.config.dashboard.upstream_base(),
            upstream.timeout_ms
        ));

        let client = FetchClient::new()
            .with_base_url(self.config.dashboard.upstream_base())
            .with_timeout(upstream.timeout());
        CatalogService::new(DummyJsonCatalog::new(client))
    }
}

impl Context {
    /// Structured logger for records the CLI keeps on stderr, using the
    /// configured level and format.
    pub fn logger(&self) -> StructuredLogger {
        StructuredLogger::new(RequestId::generate())
            .with_workload("stock-cli")
            .configured(
                &self.config.dashboard.log_level,
                &self.config.dashboard.log_format,
            )
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
