//! Engine configuration loaded from TOML.
//!
//! Every table and key is optional; omitted values take the defaults below.
//!
//! ```toml
//! [data]
//! use_bundled = true
//! precise_path = "terms.csv"
//! coarse_path = "coarse.csv"
//!
//! [calculation]
//! trace = false
//!
//! [validation]
//! min_year = 1850
//! max_year = 2100
//! ```

pub mod error;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Earliest year the bundled coarse dataset covers.
pub const DEFAULT_MIN_YEAR: i32 = 1850;
/// Latest year both bundled datasets cover.
pub const DEFAULT_MAX_YEAR: i32 = 2100;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub data: DataConfig,
    pub calculation: CalculationConfig,
    pub validation: ValidationConfig,
}

/// Solar-term data sources.
///
/// A path replaces the bundled table of the same tier. With `use_bundled`
/// off, tiers without a path are left out of the chain entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub use_bundled: bool,
    pub precise_path: Option<PathBuf>,
    pub coarse_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            use_bundled: true,
            precise_path: None,
            coarse_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationConfig {
    /// Attach the structured fallback trace to every result.
    pub trace: bool,
}

/// Accepted birth-year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config file.
    ///
    /// Relative data paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.data.rebase(base);
        }
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.validation.min_year > self.validation.max_year {
            return Err(ConfigError::Invalid(
                "validation.min_year must not exceed validation.max_year",
            ));
        }
        if !self.data.use_bundled
            && self.data.precise_path.is_none()
            && self.data.coarse_path.is_none()
        {
            tracing::warn!("no solar-term data configured; pillars will use calendar heuristics");
        }
        for p in [&self.data.precise_path, &self.data.coarse_path]
            .into_iter()
            .flatten()
        {
            if p.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("data paths must not be empty"));
            }
        }
        Ok(())
    }
}

impl DataConfig {
    fn rebase(&mut self, base: &Path) {
        for p in [&mut self.precise_path, &mut self.coarse_path]
            .into_iter()
            .flatten()
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}
