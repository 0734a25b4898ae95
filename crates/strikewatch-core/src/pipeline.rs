// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Cycle Pipeline
// ─────────────────────────────────────────────────────────────────────
//! One polling cycle as a single pure call: score every article,
//! aggregate the survivors, decide.

use chrono::{DateTime, Utc};

use strikewatch_types::{ArticleRecord, Decision, Exclusion, ScoredArticle, WatchConfig, WatchResult};

use crate::aggregate::{aggregate, rank_by_score};
use crate::decision::DecisionEngine;
use crate::scorer::{ArticleScorer, BatchOutcome};

/// Articles at or above this batch size are scored on the rayon pool.
const PARALLEL_THRESHOLD: usize = 256;

/// Everything one cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub decision: Decision,
    /// All scored articles, best first (stable on ties).
    pub scored: Vec<ScoredArticle>,
    pub excluded: Vec<Exclusion>,
    pub total_input: usize,
}

impl CycleReport {
    /// Scored articles with a strictly positive net score.
    pub fn with_signal(&self) -> usize {
        self.scored.iter().filter(|s| s.is_positive()).count()
    }
}

/// Scorer, aggregator and decision engine wired together.
#[derive(Debug, Clone)]
pub struct WatchPipeline {
    scorer: ArticleScorer,
    engine: DecisionEngine,
    top_n: usize,
}

impl WatchPipeline {
    pub fn new(config: &WatchConfig) -> WatchResult<Self> {
        Ok(Self {
            scorer: ArticleScorer::new(config)?,
            engine: DecisionEngine::new(config)?,
            top_n: config.top_n,
        })
    }

    /// Score a batch, switching to the parallel path for large batches.
    pub fn score(&self, articles: &[ArticleRecord], now: DateTime<Utc>) -> BatchOutcome {
        if articles.len() >= PARALLEL_THRESHOLD {
            self.scorer.score_batch_parallel(articles, now)
        } else {
            self.scorer.score_batch(articles, now)
        }
    }

    /// Run one full cycle over `articles` as of `now`.
    pub fn run_cycle(&self, articles: &[ArticleRecord], now: DateTime<Utc>) -> CycleReport {
        let BatchOutcome { mut scored, excluded } = self.score(articles, now);
        log::info!(
            "cycle: {} articles in, {} scored, {} excluded",
            articles.len(),
            scored.len(),
            excluded.len()
        );

        let stats = aggregate(&scored, self.top_n);
        let decision = self.engine.decide(&stats);
        rank_by_score(&mut scored);

        CycleReport {
            decision,
            scored,
            excluded,
            total_input: articles.len(),
        }
    }

    pub fn scorer(&self) -> &ArticleScorer {
        &self.scorer
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }
}
