//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use superbike_cache::FileStore;
use superbike_commerce::cart::CartEngine;
use superbike_commerce::catalog::Catalog;
use superbike_commerce::checkout::SimulatedGateway;

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory that relative config paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Directory holding the stored cart.
    pub fn data_dir(&self) -> PathBuf {
        resolve(self.base_dir(), &self.config.store.data_dir)
    }

    /// The storefront catalog for the configured seed.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::generated(self.config.catalog.seed).context("Failed to load catalog")
    }

    /// Open the persisted cart.
    pub fn cart(&self) -> Result<CartEngine<FileStore>> {
        let dir = self.data_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        Ok(CartEngine::load(store))
    }

    /// Payment gateway with the configured delay.
    pub fn gateway(&self) -> SimulatedGateway {
        SimulatedGateway::new(self.config.checkout.processing_delay())
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
