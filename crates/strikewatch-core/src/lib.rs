// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Pattern scorer, aggregator and tiered decision engine that turn a
//! batch of news headlines into one explainable yes/no signal.
//!
//! Data flows one way: `ArticleRecord -> ScoredArticle -> AggregateStats
//! -> Decision`. Nothing is cached between cycles.
//!
//! # Invariants
//!
//! 1. **Scoring is pure**: the same article, library and `now` always
//!    yield the same `ScoredArticle`. Parallel scoring returns results in
//!    input order, so ranking ties break identically either way.
//!
//! 2. **Hit counts are totals**: every non-overlapping match of every
//!    pattern counts, not just whether a pattern matched.
//!
//! 3. **First tier wins**: tiers are evaluated in table order and the
//!    first matching one decides. Later tiers are never consulted.
//!
//! 4. **Result follows confidence**: `result == (confidence > 0.0)`, and
//!    config validation keeps tier confidences in (0, 1].

pub mod aggregate;
pub mod decision;
pub mod patterns;
pub mod pipeline;
pub mod scorer;

pub use aggregate::aggregate;
pub use decision::DecisionEngine;
pub use patterns::{normalize_source, PatternLibrary, SignalHits};
pub use pipeline::{CycleReport, WatchPipeline};
pub use scorer::{ArticleScorer, BatchOutcome};
