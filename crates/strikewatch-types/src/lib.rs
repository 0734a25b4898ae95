// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! strikewatch engine — the news-evidence classifier behind a single
//! yes/no market signal.

pub mod article;
pub mod config;
pub mod error;
pub mod score;

pub use article::{parse_timestamp, ArticleRecord, RawArticle};
pub use config::{
    PatternConfig, PatternSpec, SignalCategory, TierCondition, TierRule, WatchConfig,
};
pub use error::{WatchError, WatchResult};
pub use score::{
    AggregateStats, Decision, Exclusion, ExclusionReason, ScoreOutcome, ScoredArticle, TopArticle,
};
