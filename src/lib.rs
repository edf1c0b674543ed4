//! Oil News - an energy news aggregator
//!
//! Periodically pulls a set of RSS feeds, cleans up and categorizes their
//! items, and publishes a deduplicated, newest-first snapshot that readers
//! can query at any time without waiting on the network.

pub mod aggregator;
pub mod categorize;
pub mod config;
pub mod fetcher;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod routes;
pub mod store;
