use reqwest::{Client, StatusCode};
use rss::Channel;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::model::{FeedSource, RawItem};

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, including the request timeout elapsing
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("xml parse: {0}")]
    Decode(#[from] rss::Error),
}

impl FetchError {
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

pub struct Fetcher {
    client: Client,
    max_body_bytes: usize,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// One GET of `feed.url`, decoded as RSS. At most `max_body_bytes` of the
    /// response body are read; anything past that is ignored.
    pub async fn fetch_feed(&self, feed: &FeedSource) -> Result<Vec<RawItem>, FetchError> {
        debug!("Fetching feed [{}]: {}", feed.category, feed.url);

        let mut response = self.client.get(&feed.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let remaining = self.max_body_bytes - body.len();
            if chunk.len() >= remaining {
                body.extend_from_slice(&chunk[..remaining]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        let items = parse_feed(&body)?;
        debug!("Decoded {} items from [{}]", items.len(), feed.category);
        Ok(items)
    }
}

/// Decode an RSS 2.0 document into its `channel/item` entries.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawItem>, FetchError> {
    let channel = Channel::read_from(bytes)?;

    Ok(channel
        .items()
        .iter()
        .map(|item| RawItem {
            title: item.title().map(str::to_string),
            link: item.link().map(str::to_string),
            description: item.description().map(str::to_string),
            pub_date: item.pub_date().map(str::to_string),
            source_name: item
                .source()
                .and_then(|source| source.title())
                .map(str::to_string),
        })
        .collect())
}
