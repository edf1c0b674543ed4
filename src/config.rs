use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::model::FeedSource;
use crate::normalize::NormalizeSettings;

const GNEWS_BASE: &str = "https://news.google.com/rss/search?hl=en-US&gl=US&ceid=US:en&q=";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Refresh interval in minutes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Upper bound on bytes read from a single feed response
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_items_per_feed")]
    pub max_items_per_feed: usize,
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Items whose source name contains this token (case-insensitive) are dropped
    #[serde(default = "default_excluded_source")]
    pub excluded_source: String,
    #[serde(default = "default_feeds")]
    pub feeds: Vec<FeedSource>,
}

fn default_refresh_interval() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_max_body_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; LiveOilPrices/1.0)".to_string()
}

fn default_max_items_per_feed() -> usize {
    10
}

fn default_max_articles() -> usize {
    80
}

fn default_excluded_source() -> String {
    "oilprice".to_string()
}

fn default_feeds() -> Vec<FeedSource> {
    [
        ("crude+oil+price+WTI+Brent", "Oil Markets"),
        ("OPEC+oil+production+output", "OPEC"),
        ("natural+gas+LNG+Henry+Hub", "Natural Gas"),
        ("oil+refining+gasoline+diesel+fuel", "Refining"),
        ("oil+drilling+extraction+upstream+shale", "Extraction"),
        ("oil+gas+engineering+technology+energy+innovation", "Technology"),
        (
            "international+energy+policy+geopolitics+oil+sanctions",
            "International",
        ),
        ("oil+gas+inventory+EIA+stockpile+storage", "Inventory"),
    ]
    .into_iter()
    .map(|(query, category)| FeedSource::new(format!("{GNEWS_BASE}{query}"), category))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
            max_items_per_feed: default_max_items_per_feed(),
            max_articles: default_max_articles(),
            excluded_source: default_excluded_source(),
            feeds: default_feeds(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_interval == 0 {
            anyhow::bail!("refresh_interval must be at least 1 minute");
        }
        Ok(())
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.saturating_mul(60))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn normalize_settings(&self) -> NormalizeSettings {
        NormalizeSettings {
            max_items: self.max_items_per_feed,
            excluded_source: self.excluded_source.clone(),
        }
    }
}
