use std::collections::HashSet;

use crate::model::Article;

/// Combine one cycle's per-feed article lists into the list to publish.
///
/// `per_feed` must be in configured feed order: when two feeds carry the same
/// story the earlier feed's copy is kept. The result is newest first and holds
/// at most `max_articles` entries.
pub fn merge_feeds(per_feed: Vec<Vec<Article>>, max_articles: usize) -> Vec<Article> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Article> = per_feed
        .into_iter()
        .flatten()
        .filter(|article| seen.insert(article.dedup_key().to_string()))
        .collect();

    // stable: equal timestamps keep feed order
    merged.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    merged.truncate(max_articles);
    merged
}
