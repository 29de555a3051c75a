use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::TimeWindow;

const RAPIDAPI_KEY_VAR: &str = "RAPIDAPI_KEY";
const RAPIDAPI_HOST_VAR: &str = "RAPIDAPI_HOST";
const DEFAULT_RAPIDAPI_HOST: &str = "reddit13.p.rapidapi.com";

/// Credentials for the RapidAPI-hosted scraping proxy.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub host: String,
}

impl ApiCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(RAPIDAPI_KEY_VAR).map_err(|_| {
            ConfigError::MissingEnvironmentVariable {
                var_name: RAPIDAPI_KEY_VAR.to_string(),
            }
        })?;
        let host =
            std::env::var(RAPIDAPI_HOST_VAR).unwrap_or_else(|_| DEFAULT_RAPIDAPI_HOST.to_string());
        Ok(Self { api_key, host })
    }
}

/// Per-bucket dedup caps applied at aggregation finalize time.
///
/// The generic researcher uses 50/50/50/30/30; specialized
/// single-keyword runs use a uniform 30. Both are first-class here.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct BucketCaps {
    pub pain_points: usize,
    pub questions: usize,
    pub requests: usize,
    pub solutions_mentioned: usize,
    pub beliefs: usize,
}

impl Default for BucketCaps {
    fn default() -> Self {
        Self {
            pain_points: 50,
            questions: 50,
            requests: 50,
            solutions_mentioned: 30,
            beliefs: 30,
        }
    }
}

impl BucketCaps {
    pub fn uniform(cap: usize) -> Self {
        Self {
            pain_points: cap,
            questions: cap,
            requests: cap,
            solutions_mentioned: cap,
            beliefs: cap,
        }
    }
}

/// Tunable knobs for a research run. Loadable from a TOML file;
/// every field has a sensible default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResearchSettings {
    /// Communities analyzed per run.
    pub max_communities: usize,
    /// Posts fetched and classified per community.
    pub posts_per_community: u32,
    /// Results requested per search-variation query.
    pub communities_per_query: u32,
    /// Search variations actually queried (bounds external call volume).
    pub variations_queried: usize,
    /// Time window for top-content fetches.
    pub time_window: TimeWindow,
    /// Courtesy pause between search-variation queries, in milliseconds.
    pub search_pause_ms: u64,
    /// Courtesy pause between community analyses, in milliseconds.
    pub community_pause_ms: u64,
    pub caps: BucketCaps,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            max_communities: 5,
            posts_per_community: 50,
            communities_per_query: 10,
            variations_queried: 5,
            time_window: TimeWindow::Year,
            search_pause_ms: 500,
            community_pause_ms: 1000,
            caps: BucketCaps::default(),
        }
    }
}

impl ResearchSettings {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn search_pause(&self) -> Duration {
        Duration::from_millis(self.search_pause_ms)
    }

    pub fn community_pause(&self) -> Duration {
        Duration::from_millis(self.community_pause_ms)
    }
}
