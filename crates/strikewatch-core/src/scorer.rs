// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Article Scorer
// ─────────────────────────────────────────────────────────────────────
//! Converts article records into signed relevance scores.
//!
//! For each article the scorer applies, in order:
//! - **Blocklist**: sources on the blocklist are excluded outright.
//! - **Recency**: articles older than the recency window are excluded.
//! - **Scoring**: `net = positive * boost - negative * negative_weight`,
//!   where `boost` is the credibility boost for credible sources.
//!
//! Scoring is a pure function of the article, the library and `now`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;

use strikewatch_types::{
    ArticleRecord, Exclusion, ExclusionReason, ScoreOutcome, ScoredArticle, WatchConfig,
    WatchResult,
};

use crate::patterns::PatternLibrary;

/// Scored and excluded articles from one batch, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub scored: Vec<ScoredArticle>,
    pub excluded: Vec<Exclusion>,
}

impl FromIterator<ScoreOutcome> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = ScoreOutcome>>(iter: I) -> Self {
        let mut batch = BatchOutcome::default();
        for outcome in iter {
            match outcome {
                ScoreOutcome::Scored(s) => batch.scored.push(s),
                ScoreOutcome::Excluded(e) => batch.excluded.push(e),
            }
        }
        batch
    }
}

/// Net-score formula: `positive * boost - negative * negative_weight`.
#[inline]
pub fn net_score(positive_hits: u32, negative_hits: u32, boost: f64, negative_weight: f64) -> f64 {
    f64::from(positive_hits) * boost - f64::from(negative_hits) * negative_weight
}

/// Pattern-based article scorer.
///
/// Immutable after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct ArticleScorer {
    library: Arc<PatternLibrary>,
    recency_window: Duration,
    credibility_boost: f64,
    negative_weight: f64,
}

impl ArticleScorer {
    /// Validate `config` and compile its pattern library.
    pub fn new(config: &WatchConfig) -> WatchResult<Self> {
        config.validate()?;
        let library = PatternLibrary::compile(&config.patterns)?;
        Self::with_library(Arc::new(library), config)
    }

    /// Build around an already compiled library.
    pub fn with_library(library: Arc<PatternLibrary>, config: &WatchConfig) -> WatchResult<Self> {
        Ok(Self {
            library,
            recency_window: config.recency_window()?,
            credibility_boost: config.credibility_boost,
            negative_weight: config.negative_weight,
        })
    }

    /// Score one article, or say why it was excluded.
    pub fn score(&self, article: &ArticleRecord, now: DateTime<Utc>) -> ScoreOutcome {
        if self.library.is_blocked(&article.source) {
            log::debug!("excluded blocked source `{}`: {}", article.source, article.title);
            return ScoreOutcome::Excluded(Exclusion {
                article: article.clone(),
                reason: ExclusionReason::Blocked {
                    source: article.source.clone(),
                },
            });
        }

        let age = now - article.published_at;
        if age > self.recency_window {
            let age_hours = age.num_seconds() as f64 / 3600.0;
            log::debug!("excluded stale article ({age_hours:.1}h): {}", article.title);
            return ScoreOutcome::Excluded(Exclusion {
                article: article.clone(),
                reason: ExclusionReason::Stale { age_hours },
            });
        }

        ScoreOutcome::Scored(self.score_text(article))
    }

    /// Apply the pattern library to an article, ignoring both filters.
    pub fn score_text(&self, article: &ArticleRecord) -> ScoredArticle {
        let hits = self.library.count_hits(&article.scan_text());
        let is_credible = self.library.is_credible(&article.source);
        let boost = if is_credible {
            self.credibility_boost
        } else {
            1.0
        };

        ScoredArticle {
            article: article.clone(),
            positive_hits: hits.positive,
            negative_hits: hits.negative,
            is_credible,
            net_score: net_score(hits.positive, hits.negative, boost, self.negative_weight),
        }
    }

    /// Score a batch sequentially.
    pub fn score_batch(&self, articles: &[ArticleRecord], now: DateTime<Utc>) -> BatchOutcome {
        articles.iter().map(|a| self.score(a, now)).collect()
    }

    /// Score a batch on the rayon pool.
    ///
    /// Output order matches input order, identical to [`score_batch`](Self::score_batch).
    pub fn score_batch_parallel(
        &self,
        articles: &[ArticleRecord],
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        let outcomes: Vec<ScoreOutcome> = articles.par_iter().map(|a| self.score(a, now)).collect();
        outcomes.into_iter().collect()
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }
}
