use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::ValidationResult;
use crate::Config;

/// Application configuration and lifecycle manager
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Load and validate configuration, from `config_path` when given
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let (config, validation) = Config::load_validated(config_path)?;
        Ok(Self::with_config(config, validation))
    }

    pub fn with_config(config: Config, validation: ValidationResult) -> Self {
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Make sure the storage location is usable before anything opens it
    pub fn initialize(&mut self) -> Result<()> {
        let storage_path = self.config.storage_path();
        if let Some(parent) = storage_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create storage directory {}", parent.display())
            })?;
        }

        tracing::info!(
            storage = %storage_path.display(),
            warnings = self.validation.warnings.len(),
            "Application initialized"
        );
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }

    /// Warnings collected while validating the configuration
    pub fn warnings(&self) -> &ValidationResult {
        &self.validation
    }
}
