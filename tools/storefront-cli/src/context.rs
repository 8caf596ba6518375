//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_backend::CommerceClient;
use storefront_core::StorefrontConfig;
use storefront_search::MeiliSearchGateway;
use storefront_state::FilterStore;

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration, environment overrides applied.
    pub config: StorefrontConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => StorefrontConfig::find(&cwd),
        };

        let config = match &config_path {
            Some(path) => StorefrontConfig::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => StorefrontConfig::default(),
        };
        let config = config.with_env_overrides(|key| std::env::var(key).ok());

        tracing::debug!(
            config_path = ?config_path,
            search_host = %config.search.host,
            backend_url = %config.backend.base_url,
            "configuration loaded"
        );

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    pub fn search_gateway(&self) -> Result<MeiliSearchGateway> {
        MeiliSearchGateway::new(&self.config.search).context("Failed to create search client")
    }

    /// A fresh filter store for one command invocation.
    pub fn filter_store(&self) -> Result<FilterStore<MeiliSearchGateway>> {
        Ok(FilterStore::new(self.search_gateway()?))
    }

    pub fn commerce_client(&self) -> Result<CommerceClient> {
        CommerceClient::new(&self.config.backend).context("Failed to create commerce client")
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
