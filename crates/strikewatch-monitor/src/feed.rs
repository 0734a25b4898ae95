// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Article Feeds
// ─────────────────────────────────────────────────────────────────────
//! Feed interface for fetching raw article records.
//!
//! Production deployments put RSS polling or a news search API behind
//! [`ArticleFeed`]. The file-backed feed reads a JSON array of records,
//! which is also what the CLI uses.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use strikewatch_types::{ArticleRecord, RawArticle, WatchError, WatchResult};

/// Trait for article fetch backends.
pub trait ArticleFeed: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Fetch the current batch of raw records.
    fn fetch(&self) -> WatchResult<Vec<RawArticle>>;
}

/// Feed backed by a JSON file holding an array of raw records.
///
/// The file is re-read on every fetch, so an external process can
/// rewrite it between cycles.
pub struct JsonFileFeed {
    name: String,
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArticleFeed for JsonFileFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> WatchResult<Vec<RawArticle>> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| WatchError::Feed {
            feed: self.name.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| WatchError::Feed {
            feed: self.name.clone(),
            reason: format!("JSON parse error: {e}"),
        })
    }
}

/// External feed that calls a function pointer.
///
/// Lets an embedding application plug in its own fetcher.
type FetchFn = Box<dyn Fn() -> WatchResult<Vec<RawArticle>> + Send + Sync>;

pub struct ExternalFeed {
    name: String,
    fetch_fn: FetchFn,
}

impl ExternalFeed {
    pub fn new(
        name: impl Into<String>,
        fetch_fn: impl Fn() -> WatchResult<Vec<RawArticle>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            fetch_fn: Box::new(fetch_fn),
        }
    }
}

impl ArticleFeed for ExternalFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> WatchResult<Vec<RawArticle>> {
        (self.fetch_fn)()
    }
}

/// Records gathered from one layer of feeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedBatch {
    /// Validated, deduplicated records in fetch order.
    pub articles: Vec<ArticleRecord>,
    /// Raw records fetched, before dedup and validation.
    pub total_fetched: usize,
    /// Records dropped as duplicates by link.
    pub duplicates: usize,
    /// Records that failed validation.
    pub rejected: usize,
    /// Feeds that failed to fetch.
    pub failed_feeds: usize,
}

impl FetchedBatch {
    /// Append another batch, skipping links already present.
    pub fn merge(&mut self, other: FetchedBatch) {
        let mut seen: HashSet<String> = self
            .articles
            .iter()
            .filter_map(|a| a.link.clone())
            .collect();
        for article in other.articles {
            if let Some(link) = &article.link {
                if !seen.insert(link.clone()) {
                    self.duplicates += 1;
                    continue;
                }
            }
            self.articles.push(article);
        }
        self.total_fetched += other.total_fetched;
        self.duplicates += other.duplicates;
        self.rejected += other.rejected;
        self.failed_feeds += other.failed_feeds;
    }
}

/// Poll every feed, dedupe by link (first wins), validate each record.
///
/// A failing feed or a malformed record is logged and skipped; it never
/// aborts the rest of the batch.
pub fn collect(feeds: &[Box<dyn ArticleFeed>]) -> FetchedBatch {
    let mut batch = FetchedBatch::default();
    let mut seen_links = HashSet::new();

    for feed in feeds {
        let records = match feed.fetch() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("feed {} failed: {e}", feed.name());
                batch.failed_feeds += 1;
                continue;
            }
        };
        log::debug!("feed {} returned {} records", feed.name(), records.len());
        batch.total_fetched += records.len();

        for raw in records {
            if let Some(link) = raw.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
                if !seen_links.insert(link.to_string()) {
                    batch.duplicates += 1;
                    continue;
                }
            }
            match raw.validate() {
                Ok(article) => batch.articles.push(article),
                Err(e) => {
                    log::warn!("feed {}: rejected record: {e}", feed.name());
                    batch.rejected += 1;
                }
            }
        }
    }

    batch
}
