//! Workout configuration.
//!
//! Settings come from defaults, then an optional TOML file, then
//! `SETFLOW__*` environment variables.

use crate::core::{DEFAULT_HISTORY_LIMIT, DEFAULT_REPS, DEFAULT_WEIGHT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use std::{env, fs, io};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutConfig {
    /// Exercise shown on the summary.
    pub exercise: String,
    /// Number of working sets; fixed for the lifetime of a store.
    pub set_count: usize,
    /// "Previous" weight used before anything has been entered.
    pub default_weight: f32,
    /// "Previous" reps used before anything has been entered.
    pub default_reps: u32,
    /// Cadence of both the elapsed and countdown timers.
    pub tick_interval_ms: u64,
    /// Rest durations offered by the rest selector.
    pub rest_options_secs: Vec<u64>,
    /// Transitions kept in the history log.
    pub history_limit: usize,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            exercise: "Bench Press (Dumbbell)".into(),
            set_count: 3,
            default_weight: DEFAULT_WEIGHT,
            default_reps: DEFAULT_REPS,
            tick_interval_ms: 100,
            rest_options_secs: vec![30, 60, 120, 180],
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl WorkoutConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, apply environment overrides and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path.as_ref()) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SETFLOW__*` overrides from the process environment.
    ///
    /// Every field has a key named after it, e.g. `SETFLOW__HISTORY_LIMIT`.
    /// `SETFLOW__REST_OPTIONS_SECS` takes a comma-separated list such as
    /// `45,90`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("SETFLOW__EXERCISE") {
            self.exercise = v;
        }
        if let Some(v) = lookup("SETFLOW__SET_COUNT") {
            self.set_count = parse_override("SETFLOW__SET_COUNT", &v)?;
        }
        if let Some(v) = lookup("SETFLOW__DEFAULT_WEIGHT") {
            self.default_weight = parse_override("SETFLOW__DEFAULT_WEIGHT", &v)?;
        }
        if let Some(v) = lookup("SETFLOW__DEFAULT_REPS") {
            self.default_reps = parse_override("SETFLOW__DEFAULT_REPS", &v)?;
        }
        if let Some(v) = lookup("SETFLOW__TICK_INTERVAL_MS") {
            self.tick_interval_ms = parse_override("SETFLOW__TICK_INTERVAL_MS", &v)?;
        }
        if let Some(v) = lookup("SETFLOW__HISTORY_LIMIT") {
            self.history_limit = parse_override("SETFLOW__HISTORY_LIMIT", &v)?;
        }
        if let Some(v) = lookup("SETFLOW__REST_OPTIONS_SECS") {
            self.rest_options_secs = v
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(|part| parse_override("SETFLOW__REST_OPTIONS_SECS", part))
                .collect::<Result<_, _>>()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.set_count == 0 {
            return Err(ConfigError::Invalid("set_count must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".into(),
            ));
        }
        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_weight must be a non-negative number, got {}",
                self.default_weight
            )));
        }
        if self.rest_options_secs.contains(&0) {
            return Err(ConfigError::Invalid(
                "rest options must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn rest_options(&self) -> Vec<Duration> {
        self.rest_options_secs
            .iter()
            .copied()
            .map(Duration::from_secs)
            .collect()
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} has an unparsable value '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_a_three_set_workout() {
        let config = WorkoutConfig::default();
        assert_eq!(config.set_count, 3);
        assert_eq!(config.default_weight, 15.0);
        assert_eq!(config.default_reps, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.rest_options()[1], Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = WorkoutConfig::from_toml_str(
            r#"
            exercise = "Squat"
            set_count = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.exercise, "Squat");
        assert_eq!(config.set_count, 5);
        assert_eq!(config.default_reps, 10);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = WorkoutConfig::from_toml_str("set_count = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_sets_rejected() {
        let err = WorkoutConfig::from_toml_str("set_count = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("SETFLOW__SET_COUNT", "4"),
            ("SETFLOW__DEFAULT_WEIGHT", "20.5"),
        ]
        .into_iter()
        .collect();

        let mut config = WorkoutConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.set_count, 4);
        assert_eq!(config.default_weight, 20.5);
    }

    #[test]
    fn env_overrides_history_and_rest_options() {
        let vars: HashMap<&str, &str> = [
            ("SETFLOW__HISTORY_LIMIT", "16"),
            ("SETFLOW__REST_OPTIONS_SECS", "45, 90,150"),
        ]
        .into_iter()
        .collect();

        let mut config = WorkoutConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.history_limit, 16);
        assert_eq!(config.rest_options_secs, vec![45, 90, 150]);
        assert_eq!(config.rest_options()[1], Duration::from_secs(90));
    }

    #[test]
    fn unparsable_rest_option_override_rejected() {
        let mut config = WorkoutConfig::default();
        let err = config
            .apply_overrides(|key| {
                (key == "SETFLOW__REST_OPTIONS_SECS").then(|| "30,1m".to_string())
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(config.rest_options_secs, vec![30, 60, 120, 180]);
    }

    #[test]
    fn unparsable_env_override_rejected() {
        let mut config = WorkoutConfig::default();
        let err = config
            .apply_overrides(|key| (key == "SETFLOW__DEFAULT_REPS").then(|| "ten".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = WorkoutConfig::load("does/not/exist/setflow.toml").unwrap();
        assert_eq!(config.set_count, WorkoutConfig::default().set_count);
    }
}
