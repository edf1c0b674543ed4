use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subscribed RSS endpoint and the category its articles fall back to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub category: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            category: category.into(),
        }
    }
}

/// An `<item>` as decoded from the feed, before any cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<String>,
    pub source_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub source: String,
    pub source_url: String,
    pub category: String,
    pub published_at: DateTime<Utc>,
    /// Feeds carry no usable image, so this is always empty
    pub image_url: String,
    pub read_time: String,
}

impl Article {
    /// Key used to detect the same story arriving from more than one feed.
    pub fn dedup_key(&self) -> &str {
        if self.source_url.is_empty() {
            &self.title
        } else {
            &self.source_url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, source_url: &str) -> Article {
        Article {
            id: "0123456789abcdef".to_string(),
            slug: "slug".to_string(),
            title: title.to_string(),
            summary: String::new(),
            content: String::new(),
            source: "News".to_string(),
            source_url: source_url.to_string(),
            category: "OPEC".to_string(),
            published_at: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            image_url: String::new(),
            read_time: "1 min read".to_string(),
        }
    }

    #[test]
    fn test_dedup_key_prefers_source_url() {
        let a = article("Title", "https://example.com/a");
        assert_eq!(a.dedup_key(), "https://example.com/a");
    }

    #[test]
    fn test_dedup_key_falls_back_to_title() {
        let a = article("Title", "");
        assert_eq!(a.dedup_key(), "Title");
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let value = serde_json::to_value(article("Title", "https://example.com/a")).unwrap();

        assert_eq!(value["sourceUrl"], "https://example.com/a");
        assert_eq!(value["readTime"], "1 min read");
        assert_eq!(value["publishedAt"], "2024-03-01T12:00:00Z");
        assert_eq!(value["imageUrl"], "");
        assert!(value.get("source_url").is_none());
    }
}
