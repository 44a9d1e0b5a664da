//! Fill configuration from hwpfill.toml

use crate::placeholder::PlaceholderMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "hwpfill.toml";

/// Fill configuration from hwpfill.toml
///
/// Relative paths are resolved against the directory holding the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FillConfig {
    /// Template document to fill
    pub template: Option<PathBuf>,

    /// Where the filled document is written
    pub output: Option<PathBuf>,

    /// Placeholder data file (.toml or .json)
    pub data: Option<PathBuf>,

    /// Fail when a placeholder is left unresolved
    #[serde(default)]
    pub strict: bool,

    /// Inline placeholder values, overridden by the data file
    #[serde(default)]
    pub values: toml::Table,
}

impl FillConfig {
    /// Load configuration from a hwpfill.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(FillConfig)` - Successfully loaded configuration, paths resolved
    /// * `Err(FillConfigError)` - Error reading or parsing the configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FillConfigError> {
        let content = fs::read_to_string(&path).map_err(FillConfigError::IoError)?;

        let mut config: FillConfig =
            toml::from_str(&content).map_err(FillConfigError::ParseError)?;

        if let Some(base) = path.as_ref().parent() {
            config.resolve_paths(base);
        }

        Ok(config)
    }

    /// Inline values as a placeholder map
    pub fn placeholder_values(&self) -> PlaceholderMap {
        PlaceholderMap::from_toml_table(self.values.clone())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.template, &mut self.output, &mut self.data]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Errors that can occur when loading the fill configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum FillConfigError {
    /// IO error when reading the file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),
}

impl std::fmt::Display for FillConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillConfigError::IoError(e) => write!(f, "IO error: {}", e),
            FillConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for FillConfigError {}
