//! Configuration file handling
//!
//! Settings live in a TOML file, by default
//! `<config dir>/opgen/config.toml`. Every section and key is optional.
//!
//! ```toml
//! [generator]
//! length = 20
//! include_symbols = false
//!
//! [exporter]
//! vault = "Work"
//! extra_search_dirs = ["/opt/1password"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::exporter::ExporterConfig;
use crate::generator::GenerationConfig;

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "opgen";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default generation options
    pub generator: GenerationConfig,
    /// Credential-manager settings
    pub exporter: ExporterConfig,
}

impl AppConfig {
    /// Platform default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Load from `path` or the default location, falling back to defaults
    /// when the file is missing or invalid.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Self::default(),
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            Self::default()
        })
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.generator
            .validate()
            .map_err(|e| Error::Config(format!("[generator] {}", e)))?;
        if self.exporter.tool_name.trim().is_empty() && self.exporter.tool_path.is_none() {
            return Err(Error::Config(
                "[exporter] tool_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
