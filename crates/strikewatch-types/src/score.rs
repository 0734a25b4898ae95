// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Score and Decision Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize, Serializer};

use crate::article::ArticleRecord;

/// Clamp a confidence to [0, 1], mapping NaN to 0 and Inf to the nearest bound.
#[inline]
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_confidence: NaN detected, clamping to 0.0");
        return 0.0;
    }
    if value.is_infinite() {
        let boundary = if value > 0.0 { 1.0 } else { 0.0 };
        log::warn!("clamp_confidence: Inf detected, clamping to {boundary:.1}");
        return boundary;
    }
    value.clamp(0.0, 1.0)
}

/// An article plus its pattern-match evidence.
///
/// `net_score = positive_hits * boost - negative_hits * negative_weight`,
/// where `boost` is the credibility boost for credible sources and 1.0
/// otherwise. Not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: ArticleRecord,
    pub positive_hits: u32,
    pub negative_hits: u32,
    pub is_credible: bool,
    pub net_score: f64,
}

impl ScoredArticle {
    pub fn is_positive(&self) -> bool {
        self.net_score > 0.0
    }
}

/// Why an article never reached the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Published longer ago than the recency window.
    Stale { age_hours: f64 },
    /// Source is on the blocklist.
    Blocked { source: String },
}

/// An article dropped before scoring, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub article: ArticleRecord,
    pub reason: ExclusionReason,
}

/// Result of scoring one article: either scored or excluded.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Scored(ScoredArticle),
    Excluded(Exclusion),
}

impl ScoreOutcome {
    pub fn scored(self) -> Option<ScoredArticle> {
        match self {
            ScoreOutcome::Scored(s) => Some(s),
            ScoreOutcome::Excluded(_) => None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, ScoreOutcome::Excluded(_))
    }
}

/// Per-cycle evidence summary consumed by the decision engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    /// Credible articles with `net_score > 0`.
    pub credible_positive_count: usize,
    /// Non-credible articles with `net_score > 0`.
    pub noncredible_positive_count: usize,
    /// Highest net score among credible articles; `None` without any.
    pub max_net_score_credible: Option<f64>,
    /// Source of the first credible article reaching the maximum.
    pub top_credible_source: Option<String>,
    /// Number of scored articles aggregated.
    pub total_scored: usize,
    /// Highest-scoring articles, stable on ties, truncated to top N.
    pub top_articles: Vec<ScoredArticle>,
}

/// Summary view of a scored article as emitted in a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopArticle {
    pub title: String,
    pub source: String,
    pub net_score: f64,
    pub is_credible: bool,
}

impl From<&ScoredArticle> for TopArticle {
    fn from(s: &ScoredArticle) -> Self {
        Self {
            title: s.article.title.clone(),
            source: s.article.source.clone(),
            net_score: s.net_score,
            is_credible: s.is_credible,
        }
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_top_articles<S: Serializer>(
    articles: &Vec<ScoredArticle>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(articles.iter().map(TopArticle::from))
}

/// The engine's output for one cycle.
///
/// `result` is derived from `confidence`: a decision is positive exactly
/// when its confidence is above zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub result: bool,
    pub confidence: f64,
    pub reason: String,
    /// Name of the matching tier; `None` when no tier matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(serialize_with = "serialize_top_articles")]
    pub top_articles: Vec<ScoredArticle>,
}

impl Decision {
    pub fn new(
        confidence: f64,
        reason: String,
        tier: Option<String>,
        top_articles: Vec<ScoredArticle>,
    ) -> Self {
        let confidence = clamp_confidence(confidence);
        Self {
            result: confidence > 0.0,
            confidence,
            reason,
            tier,
            top_articles,
        }
    }

    /// `top_articles` in the emitted summary shape.
    pub fn top_summaries(&self) -> Vec<TopArticle> {
        self.top_articles.iter().map(TopArticle::from).collect()
    }
}
