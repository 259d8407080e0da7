//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use nutrigraph_common::{NutriGraphError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration loader with atomic file operations.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates configuration from file.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Err(NutriGraphError::missing_input(&self.path));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        info!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Loads configuration from file, or returns defaults when the file does not exist.
    pub fn load_or_default(&self) -> Result<Config> {
        if self.path.exists() {
            self.load()
        } else {
            debug!(
                "No configuration at {}, using defaults",
                self.path.display()
            );
            Ok(Config::default())
        }
    }

    /// Saves configuration to file atomically.
    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let content = config.to_toml()?;

        let directory = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(directory)?;

        let mut temp = tempfile::NamedTempFile::new_in(directory)?;
        temp.write_all(content.as_bytes())?;
        temp.persist(&self.path)
            .map_err(|e| NutriGraphError::config_with_source("Failed to persist configuration", e))?;

        info!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}
