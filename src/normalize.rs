//! Turns raw feed items into published articles.
//!
//! Everything here is a pure function of its input apart from the
//! current-time fallback for unparseable dates.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::categorize::{categorize, combined_text};
use crate::model::{Article, RawItem};

pub const MAX_SUMMARY_CHARS: usize = 500;
pub const PLACEHOLDER_SOURCE: &str = "News";
const WORDS_PER_MINUTE: usize = 200;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeSettings {
    /// Only the first `max_items` items of a feed are considered
    pub max_items: usize,
    pub excluded_source: String,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            max_items: 10,
            excluded_source: "oilprice".to_string(),
        }
    }
}

/// Normalize the leading items of one feed, in document order.
pub fn normalize_feed(
    items: &[RawItem],
    default_category: &str,
    settings: &NormalizeSettings,
) -> Vec<Article> {
    items
        .iter()
        .take(settings.max_items)
        .filter_map(|item| normalize_item(item, default_category, &settings.excluded_source))
        .collect()
}

/// Returns `None` when the item has no usable title or comes from the
/// excluded source.
pub fn normalize_item(
    item: &RawItem,
    default_category: &str,
    excluded_source: &str,
) -> Option<Article> {
    let title = decode_html_entities(item.title.as_deref().unwrap_or(""))
        .trim()
        .to_string();
    if title.is_empty() {
        return None;
    }

    let summary = truncate_summary(&strip_html(item.description.as_deref().unwrap_or("")));

    let source = item
        .source_name
        .as_deref()
        .map(|name| decode_html_entities(name).trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_SOURCE.to_string());

    if is_excluded_source(&source, excluded_source) {
        debug!("Skipping item from excluded source '{}': {}", source, title);
        return None;
    }

    let published_at = match item.pub_date.as_deref().and_then(parse_rss_date) {
        Some(date) => date,
        None => {
            debug!(
                "Unparseable pubDate {:?} for '{}', using current time",
                item.pub_date, title
            );
            Utc::now()
        }
    };

    let category = categorize(&combined_text(&title, &summary), default_category);
    let link = item.link.as_deref().unwrap_or("");

    Some(Article {
        id: hash_id(link),
        slug: slugify(&title),
        image_url: String::new(),
        read_time: estimate_read_time(&summary),
        content: summary.clone(),
        summary,
        title,
        source,
        source_url: link.trim().to_string(),
        category,
        published_at,
    })
}

fn is_excluded_source(source: &str, excluded: &str) -> bool {
    !excluded.is_empty() && source.to_lowercase().contains(&excluded.to_lowercase())
}

/// Drop markup, decode entities and collapse whitespace.
pub fn strip_html(s: &str) -> String {
    let without_tags = TAG_RE.replace_all(s, " ");
    let decoded = decode_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `MAX_SUMMARY_CHARS` characters and mark the cut with "...".
pub fn truncate_summary(s: &str) -> String {
    match s.char_indices().nth(MAX_SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if (c.is_whitespace() || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// First 8 bytes of the MD5 of `link`, hex encoded.
///
/// This is a lookup key only; collisions are possible but unlikely at the
/// snapshot sizes we keep.
pub fn hash_id(link: &str) -> String {
    let digest = md5::compute(link.as_bytes());
    digest.0[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn estimate_read_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = (words / WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

/// Parse an RSS `pubDate`, trying the formats feeds are seen to use in
/// order. Returns `None` when nothing matches.
pub fn parse_rss_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 1123 / RFC 2822, numeric or well-known named zones
    if let Ok(date) = DateTime::parse_from_rfc2822(s) {
        return Some(date.with_timezone(&Utc));
    }

    // Same layouts with the weekday ignored, as some feeds get it wrong
    let without_weekday = s.split_once(", ").map_or(s, |(_, rest)| rest);
    if let Ok(date) = DateTime::parse_from_str(without_weekday, "%d %b %Y %H:%M:%S %z") {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(date) = parse_with_zone_name(without_weekday) {
        return Some(date);
    }

    // ISO 8601
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// `D Mon YYYY HH:MM:SS ZONE` where ZONE is an abbreviation. Unknown
/// abbreviations are read as UTC.
fn parse_with_zone_name(s: &str) -> Option<DateTime<Utc>> {
    let (datetime, zone) = s.rsplit_once(' ')?;
    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(datetime, "%d %b %Y %H:%M:%S").ok()?;
    let offset = FixedOffset::east_opt(zone_offset_hours(zone) * 3600)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|date| date.with_timezone(&Utc))
}

fn zone_offset_hours(zone: &str) -> i32 {
    match zone.to_ascii_uppercase().as_str() {
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        "CET" => 1,
        "CEST" => 2,
        _ => 0,
    }
}
