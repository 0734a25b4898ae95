// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Decision Engine
// ─────────────────────────────────────────────────────────────────────
//! Tiered decision policy over [`AggregateStats`].
//!
//! The policy is an ordered table of [`TierRule`]s evaluated top to
//! bottom; the first rule whose condition holds decides the confidence
//! and the reason. When nothing matches the result is negative with
//! confidence 0.0.
//!
//! Reasons are rendered from templates with these placeholders:
//! `{credible_positive}`, `{noncredible_positive}`,
//! `{max_credible_score}` (two decimals, `none` without credible
//! articles) and `{top_credible_source}` (`none` likewise).

use strikewatch_types::{AggregateStats, Decision, TierCondition, TierRule, WatchConfig, WatchResult};

/// Whether `stats` meets every bound present in `condition`.
pub fn condition_holds(condition: &TierCondition, stats: &AggregateStats) -> bool {
    if let Some(min) = condition.min_credible_positive {
        if stats.credible_positive_count < min {
            return false;
        }
    }
    if let Some(min) = condition.min_max_credible_score {
        match stats.max_net_score_credible {
            Some(max) if max >= min => {}
            _ => return false,
        }
    }
    if let Some(min) = condition.min_noncredible_positive {
        if stats.noncredible_positive_count < min {
            return false;
        }
    }
    true
}

/// Fill a reason template from `stats`.
pub fn render_reason(template: &str, stats: &AggregateStats) -> String {
    let max_score = stats
        .max_net_score_credible
        .map_or_else(|| "none".to_string(), |m| format!("{m:.2}"));
    let top_source = match stats.top_credible_source.as_deref() {
        Some(s) if !s.is_empty() => s,
        Some(_) => "unknown",
        None => "none",
    };

    template
        .replace("{credible_positive}", &stats.credible_positive_count.to_string())
        .replace(
            "{noncredible_positive}",
            &stats.noncredible_positive_count.to_string(),
        )
        .replace("{max_credible_score}", &max_score)
        .replace("{top_credible_source}", top_source)
}

/// First-match-wins evaluator over the configured tiers.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    tiers: Vec<TierRule>,
    fallback_reason: String,
}

impl DecisionEngine {
    /// Validate `config` and take its tier table.
    pub fn new(config: &WatchConfig) -> WatchResult<Self> {
        config.validate()?;
        Ok(Self {
            tiers: config.tiers.clone(),
            fallback_reason: config.fallback_reason.clone(),
        })
    }

    /// Index of the first tier whose condition holds.
    pub fn matching_tier(&self, stats: &AggregateStats) -> Option<usize> {
        self.tiers
            .iter()
            .position(|tier| condition_holds(&tier.condition, stats))
    }

    /// Decide on one cycle's evidence. Always produces a decision.
    pub fn decide(&self, stats: &AggregateStats) -> Decision {
        let decision = match self.matching_tier(stats) {
            Some(index) => {
                let tier = &self.tiers[index];
                Decision::new(
                    tier.confidence,
                    render_reason(&tier.reason, stats),
                    Some(tier.name.clone()),
                    stats.top_articles.clone(),
                )
            }
            None => Decision::new(
                0.0,
                render_reason(&self.fallback_reason, stats),
                None,
                stats.top_articles.clone(),
            ),
        };

        log::info!(
            "decision: result={} confidence={:.2} tier={} ({} credible / {} weak positives)",
            decision.result,
            decision.confidence,
            decision.tier.as_deref().unwrap_or("none"),
            stats.credible_positive_count,
            stats.noncredible_positive_count
        );
        decision
    }

    pub fn tiers(&self) -> &[TierRule] {
        &self.tiers
    }
}
