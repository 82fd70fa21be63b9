//! Runtime configuration, read from the environment (and `.env` via `dotenv`).

use crate::error::AppError;
use crate::fs_manager::PortablePathManager;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://serpapi.com/search.json";
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_SEARCH_RESULT_COUNT: usize = 5;

/// Settings for the search provider and local storage.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// SerpAPI credential. Only required for keyword enrichment.
    pub serpapi_key: Option<String>,
    /// Search API endpoint.
    #[validate(url)]
    pub search_endpoint: String,
    /// Per-request timeout for the search call, in seconds.
    #[validate(range(min = 1, max = 120))]
    pub search_timeout_secs: u64,
    /// Number of organic results requested per query.
    #[validate(range(min = 1, max = 10))]
    pub search_result_count: usize,
    /// Directory holding the brief database.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            serpapi_key: None,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            search_timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
            search_result_count: DEFAULT_SEARCH_RESULT_COUNT,
            data_dir: PortablePathManager::default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration from environment variables and validates it.
    ///
    /// Call `dotenv::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let config = Self {
            serpapi_key: env::var("SERPAPI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            search_endpoint: env::var("SERPAPI_ENDPOINT").unwrap_or(defaults.search_endpoint),
            search_timeout_secs: parse_var("SEARCH_TIMEOUT_SECS", defaults.search_timeout_secs)?,
            search_result_count: parse_var("SEARCH_RESULT_COUNT", defaults.search_result_count)?,
            data_dir: env::var("BRIEFSMITH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Returns the SerpAPI key or a configuration error naming the variable.
    pub fn require_serpapi_key(&self) -> Result<&str, AppError> {
        self.serpapi_key.as_deref().ok_or_else(|| {
            AppError::Config("SERPAPI_API_KEY is not set; keyword analysis is unavailable".to_string())
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a positive integer, got `{}`", name, raw))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 5] = [
        "SERPAPI_API_KEY",
        "SERPAPI_ENDPOINT",
        "SEARCH_TIMEOUT_SECS",
        "SEARCH_RESULT_COUNT",
        "BRIEFSMITH_DATA_DIR",
    ];

    /// Every config variable, unset unless listed in `overrides`.
    fn env_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter()
            .map(|var| {
                let value = overrides.iter().find(|(k, _)| k == var).map(|(_, v)| *v);
                (*var, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars(env_with(&[]), || {
            let config = AppConfig::from_env().expect("defaults are valid");
            assert_eq!(config.search_endpoint, DEFAULT_SEARCH_ENDPOINT);
            assert_eq!(config.search_result_count, 5);
            assert_eq!(config.search_timeout(), Duration::from_secs(15));
            assert!(config.serpapi_key.is_none());
            assert!(matches!(config.require_serpapi_key(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_reads_overrides() {
        let vars = env_with(&[
            ("SERPAPI_API_KEY", "secret"),
            ("SEARCH_RESULT_COUNT", "3"),
            ("BRIEFSMITH_DATA_DIR", "/tmp/briefsmith-test"),
        ]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.require_serpapi_key().unwrap(), "secret");
            assert_eq!(config.search_result_count, 3);
            assert_eq!(config.data_dir, PathBuf::from("/tmp/briefsmith-test"));
        });
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let vars = env_with(&[("SEARCH_RESULT_COUNT", "50")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_rejects_non_numeric_timeout() {
        let vars = env_with(&[("SEARCH_TIMEOUT_SECS", "soon")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let vars = env_with(&[("SERPAPI_ENDPOINT", "not a url")]);
        temp_env::with_vars(vars, || {
            assert!(matches!(AppConfig::from_env(), Err(AppError::Config(_))));
        });
    }
}
