//! # Configuration System
//!
//! YAML-based design configuration: the filter to design, named filter
//! profiles and logging settings.
//!
//! ## Configuration Search Path
//!
//! [`DesignConfig::load`] reads the first file found:
//! 1. Path specified via `IIRDES_CONFIG` environment variable
//! 2. `./iirdes.yaml` (current directory)
//!
//! ## Example Configuration
//!
//! ```yaml
//! filter:
//!   order: 4
//!   cutoff: 0.1
//!
//! profiles:
//!   anti_alias:
//!     order: 8
//!     cutoff: 0.22
//!
//! logging:
//!   level: warn
//! ```

use crate::filters::{check_order, design_butterworth, pre_warp, FilterDesign};
use crate::observe::LogConfig;
use crate::types::{DesignError, DesignResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "IIRDES_CONFIG";

/// Parameters of one Butterworth lowpass design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Filter order (1..=MAX_ORDER)
    pub order: usize,
    /// Normalized cutoff in cycles/sample, strictly inside (0, 0.5)
    pub cutoff: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            order: 2,
            cutoff: 0.25,
        }
    }
}

impl FilterSpec {
    pub fn new(order: usize, cutoff: f64) -> Self {
        Self { order, cutoff }
    }

    /// Check cutoff then order without designing anything.
    ///
    /// Reports the same error as [`design_butterworth`] for the same inputs.
    pub fn validate(&self) -> DesignResult<()> {
        pre_warp(self.cutoff)?;
        check_order(self.order)
    }

    /// Run the full design pipeline for this filter spec.
    pub fn design(&self) -> DesignResult<FilterDesign> {
        design_butterworth(self.order, self.cutoff)
    }
}

/// Complete design configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Configuration version
    pub version: String,
    /// Filter to design
    pub filter: FilterSpec,
    /// Named filter profiles (name -> filter spec)
    pub profiles: BTreeMap<String, FilterSpec>,
    /// Logging configuration
    pub logging: LogConfig,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            filter: FilterSpec::default(),
            profiles: BTreeMap::new(),
            logging: LogConfig::default(),
        }
    }
}

impl DesignConfig {
    /// Load configuration from the default search path.
    ///
    /// Returns the default config if no file is found.
    pub fn load() -> DesignResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load_from(&path);
            }
            tracing::warn!(path = %path.display(), "{} points to a missing file", CONFIG_ENV_VAR);
        }

        let local = Path::new("./iirdes.yaml");
        if local.exists() {
            return Self::load_from(local);
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> DesignResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DesignError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> DesignResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| DesignError::Config(e.to_string()))
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> DesignResult<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| DesignError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| DesignError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Replace the active filter with a named profile.
    pub fn with_profile(&self, name: &str) -> DesignResult<Self> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| DesignError::Config(format!("profile '{}' not found", name)))?;

        let mut config = self.clone();
        config.filter = *profile;
        Ok(config)
    }

    /// Validate the active filter and every profile.
    pub fn validate(&self) -> DesignResult<()> {
        self.filter.validate()?;
        self.profiles.values().try_for_each(FilterSpec::validate)
    }

    /// Design the active filter.
    pub fn design(&self) -> DesignResult<FilterDesign> {
        self.filter.design()
    }

    /// Generate example configuration YAML.
    pub fn example_yaml() -> String {
        let config = Self {
            profiles: BTreeMap::from([
                ("anti_alias".to_string(), FilterSpec::new(8, 0.22)),
                ("smoothing".to_string(), FilterSpec::new(2, 0.02)),
            ]),
            ..Default::default()
        };
        serde_yaml::to_string(&config).unwrap_or_default()
    }
}
