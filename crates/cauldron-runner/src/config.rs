//! Runner configuration.
//!
//! All runner settings come from environment variables. Engine tuning lives
//! in an optional YAML file whose path is one of those variables.

use std::path::PathBuf;

use cauldron_engine::EngineConfig;

use crate::error::RunnerError;

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, RunnerError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(RunnerError::Config(format!(
                "invalid CAULDRON_LOG_FORMAT: {other:?} (expected pretty or json)"
            ))),
        }
    }
}

/// Complete runner configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Path to the engine YAML file, if any.
    pub engine_config: Option<PathBuf>,
    /// Log output format.
    pub log_format: LogFormat,
    /// Whether to append flavor text to commands.
    pub flavor: bool,
    /// Seed for flavor text, for reproducible output.
    pub flavor_seed: Option<u64>,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `CAULDRON_CONFIG` -- path to the engine YAML file (defaults apply if unset)
    /// - `CAULDRON_LOG_FORMAT` -- `pretty` or `json` (default `pretty`)
    /// - `CAULDRON_FLAVOR` -- append flavor text to commands (default `true`)
    /// - `CAULDRON_FLAVOR_SEED` -- seed for the flavor text generator
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let engine_config = lookup("CAULDRON_CONFIG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_format = lookup("CAULDRON_LOG_FORMAT")
            .map_or(Ok(LogFormat::Pretty), |value| LogFormat::parse(&value))?;

        let flavor: bool = lookup("CAULDRON_FLAVOR")
            .unwrap_or_else(|| "true".to_owned())
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid CAULDRON_FLAVOR: {e}")))?;

        let flavor_seed = lookup("CAULDRON_FLAVOR_SEED")
            .map(|value| value.parse::<u64>())
            .transpose()
            .map_err(|e| RunnerError::Config(format!("invalid CAULDRON_FLAVOR_SEED: {e}")))?;

        Ok(Self {
            engine_config,
            log_format,
            flavor,
            flavor_seed,
        })
    }

    /// Load the engine configuration this runner points at.
    pub fn load_engine_config(&self) -> Result<EngineConfig, RunnerError> {
        match &self.engine_config {
            Some(path) => EngineConfig::from_file(path).map_err(|e| {
                RunnerError::Config(format!("failed to load {}: {e}", path.display()))
            }),
            None => Ok(EngineConfig::default()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<RunnerConfig, RunnerError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        RunnerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.engine_config, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.flavor);
        assert_eq!(config.flavor_seed, None);
        assert_eq!(config.load_engine_config().unwrap(), EngineConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = load(&[
            ("CAULDRON_CONFIG", "cauldron.yaml"),
            ("CAULDRON_LOG_FORMAT", "JSON"),
            ("CAULDRON_FLAVOR", "false"),
            ("CAULDRON_FLAVOR_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(config.engine_config, Some(PathBuf::from("cauldron.yaml")));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.flavor);
        assert_eq!(config.flavor_seed, Some(42));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("CAULDRON_LOG_FORMAT", "xml")]),
            Err(RunnerError::Config(_))
        ));
        assert!(matches!(
            load(&[("CAULDRON_FLAVOR", "sometimes")]),
            Err(RunnerError::Config(_))
        ));
        assert!(matches!(
            load(&[("CAULDRON_FLAVOR_SEED", "-1")]),
            Err(RunnerError::Config(_))
        ));
    }

    #[test]
    fn missing_engine_file_is_a_config_error() {
        let config = load(&[("CAULDRON_CONFIG", "/nonexistent/cauldron.yaml")]).unwrap();
        assert!(matches!(config.load_engine_config(), Err(RunnerError::Config(_))));
    }
}
