use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher};
use crate::merge::merge_feeds;
use crate::model::{Article, FeedSource};
use crate::normalize::{normalize_feed, NormalizeSettings};
use crate::store::SnapshotStore;

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub articles: usize,
    pub feeds_ok: usize,
    pub feeds_total: usize,
}

pub struct NewsAggregator {
    fetcher: Fetcher,
    feeds: Vec<FeedSource>,
    settings: NormalizeSettings,
    max_articles: usize,
    store: SnapshotStore,
}

impl NewsAggregator {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            feeds: config.feeds.clone(),
            settings: config.normalize_settings(),
            max_articles: config.max_articles,
            store: SnapshotStore::new(),
        })
    }

    /// Build the aggregator and start its refresh loop: one cycle right away,
    /// then one every `config.refresh_period()`. Returns without waiting for
    /// the first cycle.
    pub fn spawn(config: &Config) -> Result<(Arc<Self>, JoinHandle<()>), FetchError> {
        let aggregator = Arc::new(Self::new(config)?);
        let handle = tokio::spawn(start_background_refresh(
            aggregator.clone(),
            config.refresh_period(),
        ));
        Ok((aggregator, handle))
    }

    pub fn feeds(&self) -> &[FeedSource] {
        &self.feeds
    }

    /// Run one fetch, normalize, merge and publish cycle.
    ///
    /// Feeds are fetched concurrently but merged in configured order. A feed
    /// that fails contributes nothing; if every feed fails an empty list is
    /// published.
    pub async fn refresh(&self) -> RefreshSummary {
        let results = join_all(self.feeds.iter().map(|feed| self.fetch_articles(feed))).await;

        let mut feeds_ok = 0;
        let per_feed: Vec<Vec<Article>> = results
            .into_iter()
            .zip(&self.feeds)
            .map(|(result, feed)| match result {
                Ok(articles) => {
                    feeds_ok += 1;
                    articles
                }
                Err(e) => {
                    error!("RSS fetch error [{}]: {}", feed.category, e);
                    Vec::new()
                }
            })
            .collect();

        let merged = merge_feeds(per_feed, self.max_articles);
        let summary = RefreshSummary {
            articles: merged.len(),
            feeds_ok,
            feeds_total: self.feeds.len(),
        };
        self.store.publish(merged).await;

        info!(
            "News feed refreshed: {} articles from {}/{} feeds",
            summary.articles, summary.feeds_ok, summary.feeds_total
        );
        summary
    }

    async fn fetch_articles(&self, feed: &FeedSource) -> Result<Vec<Article>, FetchError> {
        let items = self.fetcher.fetch_feed(feed).await?;
        Ok(normalize_feed(&items, &feed.category, &self.settings))
    }

    pub async fn get_news(&self) -> Vec<Article> {
        self.store.get_all().await
    }

    pub async fn get_news_by_id(&self, key: &str) -> Option<Article> {
        self.store.get_by_id(key).await
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }
}

pub async fn start_background_refresh(aggregator: Arc<NewsAggregator>, interval: Duration) {
    info!("Starting initial news refresh");
    aggregator.refresh().await;

    loop {
        tokio::time::sleep(interval).await;
        info!("Starting scheduled news refresh");
        aggregator.refresh().await;
    }
}
