// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Monitor
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Plumbing around the strikewatch engine: feeds, link dedup, the
//! confirmation layer, scan records and the polling loop.
//!
//! Usage:
//! ```no_run
//! use strikewatch_monitor::{JsonFileFeed, Monitor};
//! use strikewatch_types::WatchConfig;
//!
//! let monitor = Monitor::new(&WatchConfig::default())?
//!     .with_primary_feed(Box::new(JsonFileFeed::new("rss.json")))
//!     .save_scans_to("logs");
//! let outcome = monitor.check_once(chrono::Utc::now())?;
//! println!("{}", outcome.report.decision.reason);
//! # Ok::<(), strikewatch_types::WatchError>(())
//! ```

pub mod feed;
pub mod monitor;
pub mod record;

pub use feed::{collect, ArticleFeed, ExternalFeed, FetchedBatch, JsonFileFeed};
pub use monitor::{CycleOutcome, Monitor};
pub use record::{save_scan, ScanRecord};
