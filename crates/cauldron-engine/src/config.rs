//! Configuration loading and typed config structures for the engine.
//!
//! Configuration is an optional YAML document. Every field has a default,
//! so an empty document (or no file at all) yields a working engine. The
//! defaults are the tuned values the agent plays with.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its legal range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Path search caps and acceptance tolerance.
    #[serde(default)]
    pub search: SearchConfig,

    /// Tome learning heuristic parameters.
    #[serde(default)]
    pub learning: LearningConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml rejects an empty document; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("search.coverage_tolerance", self.search.coverage_tolerance)?;
        check_fraction("learning.order_coverage", self.learning.order_coverage)?;
        if self.search.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_depth",
                reason: String::from("must be at least 1"),
            });
        }
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid {
                field: "search.max_results",
                reason: String::from("must be at least 1"),
            });
        }
        Ok(())
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} is not in (0, 1]"),
        })
    }
}

/// Path search parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of actions in a single path.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Stop searching once this many paths have been accepted.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Fraction of the target's weighted cost a path must cover to be accepted.
    #[serde(default = "default_coverage_tolerance")]
    pub coverage_tolerance: f64,

    /// Number of leading actions compared for near-duplicate suppression.
    #[serde(default = "default_prefix_window")]
    pub prefix_window: usize,

    /// Wall-clock budget for one search in milliseconds. 0 disables it.
    #[serde(default = "default_deadline_ms")]
    pub deadline_ms: u64,

    /// Also explore casting repeatable spells several times in one action.
    #[serde(default)]
    pub repeat_casts: bool,
}

impl SearchConfig {
    /// The search deadline, if one is configured.
    pub const fn deadline(&self) -> Option<Duration> {
        if self.deadline_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.deadline_ms))
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_results: default_max_results(),
            coverage_tolerance: default_coverage_tolerance(),
            prefix_window: default_prefix_window(),
            deadline_ms: default_deadline_ms(),
            repeat_casts: false,
        }
    }
}

/// Tome learning parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearningConfig {
    /// Whether the agent learns tome spells at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Highest tome index still considered a cheap acquisition.
    #[serde(default = "default_max_tome_index")]
    pub max_tome_index: u32,

    /// Fraction of an order's weighted cost a tome delta must produce to be
    /// listed as compatible with that order.
    #[serde(default = "default_order_coverage")]
    pub order_coverage: f64,

    /// Stop learning once the spell book holds this many spells.
    #[serde(default = "default_max_known_spells")]
    pub max_known_spells: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_tome_index: default_max_tome_index(),
            order_coverage: default_order_coverage(),
            max_known_spells: default_max_known_spells(),
        }
    }
}

const fn default_max_depth() -> usize {
    6
}

const fn default_max_results() -> usize {
    32
}

const fn default_coverage_tolerance() -> f64 {
    0.85
}

const fn default_prefix_window() -> usize {
    2
}

const fn default_deadline_ms() -> u64 {
    40
}

const fn default_max_tome_index() -> u32 {
    1
}

const fn default_order_coverage() -> f64 {
    0.75
}

const fn default_max_known_spells() -> usize {
    12
}

const fn default_true() -> bool {
    true
}
