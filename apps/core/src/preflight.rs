//! Preflight Check System
//!
//! Verifies the local environment before the brief builder starts: storage
//! is writable, the snapshot database opens, and the search provider is
//! configured. Only storage checks are critical; without search the builder
//! still works, keyword analysis is just unavailable.

use crate::config::AppConfig;
use crate::database;
use crate::fs_manager::PortablePathManager;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub critical: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &str, critical: bool, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            critical,
            message: message.to_string(),
            details: None,
        }
    }

    fn fail(name: &str, critical: bool, message: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            critical,
            message: message.to_string(),
            details,
        }
    }
}

/// Complete preflight check report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreflightReport {
    pub all_passed: bool,
    pub ready_to_start: bool,
    pub enrichment_available: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
}

/// Performs all preflight checks and returns a report
pub async fn run_preflight_checks(config: &AppConfig) -> PreflightReport {
    info!("Running preflight checks");

    let mut checks = Vec::new();

    let dir_check = check_data_dir(config);
    let dir_ok = dir_check.passed;
    checks.push(dir_check);

    if dir_ok {
        checks.push(check_database(config).await);
    } else {
        checks.push(CheckResult::fail(
            "database",
            true,
            "Skipped - data directory unavailable",
            None,
        ));
    }

    let key_check = check_search_key(config);
    let endpoint_check = check_search_endpoint(config);
    let enrichment_available = key_check.passed && endpoint_check.passed;
    checks.push(key_check);
    checks.push(endpoint_check);

    let all_passed = checks.iter().all(|c| c.passed);
    let ready_to_start = checks.iter().filter(|c| c.critical).all(|c| c.passed);

    let summary = if all_passed {
        "All checks passed. Ready to build briefs.".to_string()
    } else if ready_to_start {
        "Storage ready. Keyword analysis is unavailable until search is configured.".to_string()
    } else {
        "Storage checks failed. Briefs cannot be saved.".to_string()
    };

    for check in &checks {
        if check.passed {
            info!("  ok   {}: {}", check.name, check.message);
        } else {
            warn!("  FAIL {}: {}", check.name, check.message);
            if let Some(details) = &check.details {
                warn!("       Details: {}", details);
            }
        }
    }

    PreflightReport {
        all_passed,
        ready_to_start,
        enrichment_available,
        checks,
        summary,
    }
}

fn check_data_dir(config: &AppConfig) -> CheckResult {
    if let Err(e) = PortablePathManager::init(&config.data_dir) {
        return CheckResult::fail(
            "data_dir",
            true,
            "Cannot create data directory",
            Some(format!("{:?}: {}", config.data_dir, e)),
        );
    }

    let probe = PortablePathManager::db_dir(&config.data_dir).join(".write_probe");
    match std::fs::write(&probe, b"ok").and_then(|_| std::fs::remove_file(&probe)) {
        Ok(()) => CheckResult::pass("data_dir", true, "Data directory is writable"),
        Err(e) => CheckResult::fail(
            "data_dir",
            true,
            "Data directory is not writable",
            Some(e.to_string()),
        ),
    }
}

async fn check_database(config: &AppConfig) -> CheckResult {
    match database::init_db(&config.data_dir).await {
        Ok(pool) => {
            pool.close().await;
            CheckResult::pass("database", true, "Snapshot database opened")
        }
        Err(e) => CheckResult::fail(
            "database",
            true,
            "Snapshot database failed to open",
            Some(e.to_string()),
        ),
    }
}

fn check_search_key(config: &AppConfig) -> CheckResult {
    match config.require_serpapi_key() {
        Ok(_) => CheckResult::pass("search_api_key", false, "SERPAPI_API_KEY is set"),
        Err(e) => CheckResult::fail("search_api_key", false, "SERPAPI_API_KEY is missing", Some(e.to_string())),
    }
}

fn check_search_endpoint(config: &AppConfig) -> CheckResult {
    match Url::parse(&config.search_endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            CheckResult::pass("search_endpoint", false, "Search endpoint URL is valid")
        }
        Ok(url) => CheckResult::fail(
            "search_endpoint",
            false,
            "Search endpoint must use http or https",
            Some(url.to_string()),
        ),
        Err(e) => CheckResult::fail(
            "search_endpoint",
            false,
            "Search endpoint URL is invalid",
            Some(e.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_preflight_with_storage_only() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            serpapi_key: None,
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };

        let report = run_preflight_checks(&config).await;

        assert!(report.ready_to_start);
        assert!(!report.all_passed);
        assert!(!report.enrichment_available);
        let key = report.checks.iter().find(|c| c.name == "search_api_key").unwrap();
        assert!(!key.passed);
        assert!(!key.critical);
    }

    #[tokio::test]
    async fn test_preflight_all_passed() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            serpapi_key: Some("key".to_string()),
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };

        let report = run_preflight_checks(&config).await;

        assert!(report.all_passed, "{:?}", report.checks);
        assert!(report.enrichment_available);
    }

    #[tokio::test]
    async fn test_preflight_rejects_non_http_endpoint() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            serpapi_key: Some("key".to_string()),
            search_endpoint: "ftp://example.com/search".to_string(),
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };

        let report = run_preflight_checks(&config).await;

        assert!(report.ready_to_start);
        assert!(!report.enrichment_available);
    }
}
