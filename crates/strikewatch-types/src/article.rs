// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Article Records
// ─────────────────────────────────────────────────────────────────────
//! Normalized article records and the untyped boundary shape they are
//! validated from.
//!
//! Feeds hand over [`RawArticle`]s with every field optional. Only
//! [`RawArticle::validate`] produces an [`ArticleRecord`], so everything
//! downstream can rely on a non-empty title and a parsed timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{WatchError, WatchResult};

/// One fetched news item, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Headline. Never empty.
    pub title: String,
    /// Summary or lede; empty when the feed has none.
    #[serde(default)]
    pub description: String,
    /// Publisher name or identifier as reported by the feed.
    #[serde(default)]
    pub source: String,
    /// Publication time, used for the recency window.
    pub published_at: DateTime<Utc>,
    /// Canonical URL, when the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            source: source.into(),
            published_at,
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Text the pattern library scans: title and description joined by a space.
    pub fn scan_text(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} {}", self.title, self.description)
        }
    }
}

/// Article as delivered by a feed, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "published", alias = "pubDate")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl RawArticle {
    /// Validate into an [`ArticleRecord`].
    ///
    /// Rejects a missing or blank title and a missing or unparsable
    /// timestamp. A missing description or source becomes empty.
    pub fn validate(self) -> WatchResult<ArticleRecord> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => {
                return Err(WatchError::Validation(
                    "article has no title".to_string(),
                ))
            }
        };

        let published_at = match self.published_at.as_deref() {
            Some(raw) if !raw.trim().is_empty() => parse_timestamp(raw)?,
            _ => {
                return Err(WatchError::Validation(format!(
                    "article `{title}` has no publish time"
                )))
            }
        };

        Ok(ArticleRecord {
            title,
            description: self.description.unwrap_or_default().trim().to_string(),
            source: self.source.unwrap_or_default().trim().to_string(),
            published_at,
            link: self
                .link
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        })
    }
}

/// Parse an ISO-8601 / RFC 3339 or RFC 2822 (RSS `pubDate`) timestamp.
pub fn parse_timestamp(raw: &str) -> WatchResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    Err(WatchError::Validation(format!(
        "unparsable publish time `{raw}`"
    )))
}
