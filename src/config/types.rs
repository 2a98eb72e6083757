use serde::{Deserialize, Serialize};
use tvindex_common::Language;

use crate::catalog::EpisodeOrder;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the catalog REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Prefix that relative artwork paths are joined onto
    #[serde(default = "default_artwork_url")]
    pub artwork_url: String,

    /// API key sent in the login payload
    #[serde(default)]
    pub apikey: Option<String>,

    /// Account name sent in the login payload
    #[serde(default)]
    pub username: Option<String>,

    /// Account key sent in the login payload
    #[serde(default)]
    pub userkey: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Seconds new sessions refuse to start after a transport timeout
    #[serde(default = "default_cool_down_secs")]
    pub cool_down_secs: u64,
}

fn default_api_url() -> String {
    "https://api.thetvdb.com".to_string()
}

fn default_artwork_url() -> String {
    crate::provider::DEFAULT_ARTWORK_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_cool_down_secs() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            artwork_url: default_artwork_url(),
            apikey: None,
            username: None,
            userkey: None,
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            cool_down_secs: default_cool_down_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Language used for searches and episode data
    #[serde(default)]
    pub language: Language,

    /// Which numbering places episodes into seasons
    #[serde(default)]
    pub episode_order: EpisodeOrder,

    /// Fetch the artwork index into `_banners`
    #[serde(default)]
    pub banners: bool,

    /// Fetch the cast list into `_actors`
    #[serde(default)]
    pub actors: bool,

    /// Start sessions even right after a transport timeout
    #[serde(default)]
    pub force_connect: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of resident shows after a sweep
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Minimum seconds between eviction sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_capacity() -> usize {
    crate::catalog::DEFAULT_CAPACITY
}

fn default_sweep_interval_secs() -> u64 {
    crate::catalog::DEFAULT_SWEEP_INTERVAL.as_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl CacheConfig {
    pub fn policy(&self) -> crate::catalog::CachePolicy {
        crate::catalog::CachePolicy {
            capacity: self.capacity,
            sweep_interval: std::time::Duration::from_secs(self.sweep_interval_secs),
        }
    }
}
