// src/config.rs
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::{SparrowError, SparrowResult};

pub const SEED_PATH_VAR: &str = "SPARROW_SEED_PATH";
pub const DRIVER_RATING_VAR: &str = "SPARROW_DRIVER_RATING";
pub const START_ONLINE_VAR: &str = "SPARROW_START_ONLINE";
pub const LOG_LEVEL_VAR: &str = "SPARROW_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed_path: Option<PathBuf>,
    pub driver_rating: f32, // 0-5, shown on the home screen
    pub start_online: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            driver_rating: 5.0,
            start_online: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> SparrowResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SparrowResult<Self> {
        let defaults = Self::default();

        let driver_rating = match lookup(DRIVER_RATING_VAR) {
            Some(raw) => parse_var::<f32>(DRIVER_RATING_VAR, &raw)?,
            None => defaults.driver_rating,
        };
        if !(0.0..=5.0).contains(&driver_rating) {
            return Err(SparrowError::InvalidConfiguration(format!(
                "{} must be between 0 and 5, got {}",
                DRIVER_RATING_VAR, driver_rating
            )));
        }

        let start_online = match lookup(START_ONLINE_VAR) {
            Some(raw) => parse_var::<bool>(START_ONLINE_VAR, &raw.to_ascii_lowercase())?,
            None => defaults.start_online,
        };

        let config = Self {
            seed_path: lookup(SEED_PATH_VAR)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            driver_rating,
            start_online,
            log_level: lookup(LOG_LEVEL_VAR).unwrap_or(defaults.log_level),
        };
        config.tracing_level()?;

        Ok(config)
    }

    pub fn tracing_level(&self) -> SparrowResult<tracing::Level> {
        parse_var(LOG_LEVEL_VAR, &self.log_level)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> SparrowResult<T> {
    raw.trim().parse::<T>().map_err(|_| {
        SparrowError::InvalidConfiguration(format!("Invalid value '{}' for {}", raw, key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SparrowResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tracing_level().unwrap(), tracing::Level::INFO);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = config_from(&[
            (SEED_PATH_VAR, "/tmp/seed.json"),
            (DRIVER_RATING_VAR, "4.9"),
            (START_ONLINE_VAR, "TRUE"),
            (LOG_LEVEL_VAR, "debug"),
        ])
        .unwrap();

        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.driver_rating, 4.9);
        assert!(config.start_online);
        assert_eq!(config.tracing_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_rejects_bad_values() {
        for pairs in [
            [(DRIVER_RATING_VAR, "great")],
            [(DRIVER_RATING_VAR, "7")],
            [(START_ONLINE_VAR, "maybe")],
            [(LOG_LEVEL_VAR, "loud")],
        ] {
            assert!(matches!(
                config_from(&pairs),
                Err(SparrowError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_blank_seed_path_is_ignored() {
        let config = config_from(&[(SEED_PATH_VAR, "  ")]).unwrap();
        assert!(config.seed_path.is_none());
    }
}
