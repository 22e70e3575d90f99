use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Coordinates;

/// Runtime settings, layered as defaults < `toilet-finder.toml` < `TOILET_FINDER_*` env vars
#[derive(Debug, Clone, Deserialize)]
pub struct FinderConfig {
    /// Without a key the live source is skipped and seed data is used
    #[serde(default)]
    pub geoapify_api_key: Option<String>,
    #[serde(default = "default_geoapify_base_url")]
    pub geoapify_base_url: String,
    #[serde(default = "default_search_radius_km")]
    pub search_radius_km: f64,
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    #[serde(default = "default_journal_path")]
    pub journal_path: PathBuf,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_geoapify_base_url() -> String {
    crate::sources::geoapify::DEFAULT_BASE_URL.to_string()
}

fn default_search_radius_km() -> f64 {
    crate::pipeline::DEFAULT_RADIUS_KM
}

fn default_fetch_limit() -> u32 {
    20
}

fn default_request_timeout_secs() -> u64 {
    10
}

// New Delhi
fn default_latitude() -> f64 {
    28.6139
}

fn default_longitude() -> f64 {
    77.2090
}

fn default_journal_path() -> PathBuf {
    PathBuf::from("user_reviews.jsonl")
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            geoapify_api_key: None,
            geoapify_base_url: default_geoapify_base_url(),
            search_radius_km: default_search_radius_km(),
            fetch_limit: default_fetch_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            journal_path: default_journal_path(),
            log_filter: default_log_filter(),
        }
    }
}

impl FinderConfig {
    pub fn load() -> Result<Self> {
        Config::builder()
            .add_source(File::with_name("toilet-finder").required(false))
            .add_source(Environment::with_prefix("TOILET_FINDER").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.default_latitude, self.default_longitude)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> FinderConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = from_toml("");
        assert_eq!(config.search_radius_km, 10.0);
        assert_eq!(config.fetch_limit, 20);
        assert!(config.geoapify_api_key.is_none());
        assert_eq!(config.default_center(), Coordinates::new(28.6139, 77.2090));
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            geoapify_api_key = "key"
            search_radius_km = 2.5
            journal_path = "/tmp/reviews.jsonl"
            "#,
        );
        assert_eq!(config.geoapify_api_key.as_deref(), Some("key"));
        assert_eq!(config.search_radius_km, 2.5);
        assert_eq!(config.journal_path, PathBuf::from("/tmp/reviews.jsonl"));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
