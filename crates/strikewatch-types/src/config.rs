// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Engine Configuration
// ─────────────────────────────────────────────────────────────────────

use std::path::Path;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{WatchError, WatchResult};

/// Placeholders a tier reason template may reference.
pub const REASON_PLACEHOLDERS: [&str; 4] = [
    "credible_positive",
    "noncredible_positive",
    "max_credible_score",
    "top_credible_source",
];

/// What kind of evidence a pattern captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Phrasing of a strike that actually happened.
    ConfirmedStrike,
    /// Future, modal or conditional language.
    Speculative,
    /// Cyber, sanctions, ground or naval action.
    WrongEventType,
    /// Interceptions and shoot-downs.
    NonEvent,
    /// Prediction markets, odds, opinion pieces.
    MetaCommentary,
}

impl SignalCategory {
    pub fn is_positive(self) -> bool {
        matches!(self, SignalCategory::ConfirmedStrike)
    }
}

/// One configured pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Regex source, matched case-insensitively.
    pub pattern: String,
    pub category: SignalCategory,
}

impl PatternSpec {
    pub fn new(pattern: impl Into<String>, category: SignalCategory) -> Self {
        Self {
            pattern: pattern.into(),
            category,
        }
    }
}

/// Pattern tables and source lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub positive: Vec<PatternSpec>,
    pub negative: Vec<PatternSpec>,
    pub credible_sources: Vec<String>,
    /// Outlets dropped before scoring (market self-reference).
    pub blocked_sources: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        use SignalCategory::*;

        let positive = [
            r"\bus\s+(strikes?|struck|attacks?|attacked|bombs?|bombed)\s+iran",
            r"\b(american|pentagon|us military)\s+(strikes?|struck|launched?|attacks?)\s+(on\s+)?iran",
            r"\b(airstrikes?|air\s+strikes?|missile\s+strikes?|drone\s+strikes?)\s+(on|against|hit|target)\s+iran",
            r"\biran\s+(hit|struck|bombed|attacked)\s+by\s+(us|united states|american)",
            r"\bus\s+(launches?|launched)\s+(missiles?|drones?|airstrikes?)\s+(at|on|against)\s+iran",
            r"\b(cruise|ballistic)\s+missiles?\s+(hit|struck|target|launched).{0,30}iran",
        ]
        .into_iter()
        .map(|p| PatternSpec::new(p, ConfirmedStrike));

        let negative = [
            (r"cyber\s*(attack|war|strike|operation)", WrongEventType),
            (r"intercept(ed|ion|s)", NonEvent),
            (r"shot\s+down", NonEvent),
            (r"sanctions?", WrongEventType),
            (r"ground\s+(troops?|forces?|invasion|incursion|operativ)", WrongEventType),
            (r"naval\s+(strike|shell|bombard)", WrongEventType),
            (r"artillery", WrongEventType),
            (r"could\s+strike", Speculative),
            (r"may\s+strike", Speculative),
            (r"might\s+strike", Speculative),
            (r"threatens?\s+to\s+strike", Speculative),
            (r"warns?\s+(of|about)\s+(strike|attack)", Speculative),
            (r"\bif\s+(us|the\s+us|america)\s+strikes?", Speculative),
            (r"plans?\s+to\s+strike", Speculative),
            (r"scenario", Speculative),
            (r"what\s+if", Speculative),
            (r"simulation", Speculative),
            (r"wargame", Speculative),
            (r"\biran\s+(strikes?|attacks?|bombs?)\s+(us|united states|america|israel)", WrongEventType),
            (r"considering\b", Speculative),
            (r"weighing\b", Speculative),
            (r"preparing\s+to", Speculative),
            (r"ready\s+to\s+strike", Speculative),
            (r"\bwill\s+(the\s+)?(us|america)\s+strike", Speculative),
            (r"betting\s+odds", MetaCommentary),
            (r"polymarket", MetaCommentary),
            (r"prediction\s+market", MetaCommentary),
            (r"odds\s+of", MetaCommentary),
            (r"probability", MetaCommentary),
            (r"\bshould\s+(the\s+)?(us|america)\s+strike", Speculative),
            (r"opinion\b", MetaCommentary),
            (r"editorial\b", MetaCommentary),
            (r"analysis\b", MetaCommentary),
        ]
        .into_iter()
        .map(|(p, c)| PatternSpec::new(p, c));

        let credible_sources = [
            "reuters",
            "associated press",
            "ap news",
            "bbc",
            "bbc news",
            "cnn",
            "al jazeera",
            "new york times",
            "washington post",
            "wall street journal",
            "the guardian",
            "bloomberg",
            "nbc news",
            "abc news",
            "cbs news",
            "fox news",
            "sky news",
            "afp",
            "dw news",
            "france 24",
            "times of israel",
            "breaking defense",
            "defense one",
            "military times",
            "pentagon",
            // Identifiers as reported by search APIs.
            "apnews",
            "nytimes",
            "wsj",
            "aljazeera",
            "theguardian",
        ];

        let blocked_sources = ["polymarket", "predictit", "kalshi", "metaculus"];

        Self {
            positive: positive.collect(),
            negative: negative.collect(),
            credible_sources: credible_sources.iter().map(|s| s.to_string()).collect(),
            blocked_sources: blocked_sources.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Bounds an [`AggregateStats`](crate::AggregateStats) must meet for a tier
/// to match. Every present bound must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_credible_positive: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_max_credible_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_noncredible_positive: Option<usize>,
}

impl TierCondition {
    fn is_empty(&self) -> bool {
        self.min_credible_positive.is_none()
            && self.min_max_credible_score.is_none()
            && self.min_noncredible_positive.is_none()
    }
}

/// One row of the ordered decision policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub name: String,
    pub condition: TierCondition,
    /// Confidence in (0, 1].
    pub confidence: f64,
    /// Reason template; see [`REASON_PLACEHOLDERS`].
    pub reason: String,
}

/// The default four-tier policy, first match wins.
pub fn default_tiers() -> Vec<TierRule> {
    vec![
        TierRule {
            name: "strong_credible".into(),
            condition: TierCondition {
                min_credible_positive: Some(1),
                min_max_credible_score: Some(3.0),
                ..Default::default()
            },
            confidence: 0.90,
            reason: "Strong confirmed signal: credible source ({top_credible_source}) \
                     with net score {max_credible_score} >= 3"
                .into(),
        },
        TierRule {
            name: "multiple_credible".into(),
            condition: TierCondition {
                min_credible_positive: Some(2),
                ..Default::default()
            },
            confidence: 0.80,
            reason: "Multiple credible outlets reporting ({credible_positive} credible sources, \
                     best net score {max_credible_score})"
                .into(),
        },
        TierRule {
            name: "early_credible".into(),
            condition: TierCondition {
                min_credible_positive: Some(1),
                ..Default::default()
            },
            confidence: 0.60,
            reason: "Early signal from a credible source ({top_credible_source}, \
                     net score {max_credible_score}), unverified"
                .into(),
        },
        TierRule {
            name: "uncredible_cluster".into(),
            condition: TierCondition {
                min_noncredible_positive: Some(3),
                ..Default::default()
            },
            confidence: 0.40,
            reason: "Possible breaking news from {noncredible_positive} uncredible sources, \
                     unconfirmed"
                .into(),
        },
    ]
}

fn default_fallback_reason() -> String {
    "No credible signals ({noncredible_positive} weak hits)".into()
}

/// Runtime configuration for the scoring and decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Articles older than this are excluded. Default: 24.
    pub recency_window_hours: i64,

    /// Multiplier on positive hits from credible sources. Default: 2.0.
    pub credibility_boost: f64,

    /// Penalty per negative hit. Default: 1.5.
    pub negative_weight: f64,

    /// Articles kept in `top_articles`. Default: 5.
    pub top_n: usize,

    pub patterns: PatternConfig,

    /// Ordered decision tiers, first match wins.
    pub tiers: Vec<TierRule>,

    /// Reason used when no tier matches (confidence 0.0).
    pub fallback_reason: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            recency_window_hours: 24,
            credibility_boost: 2.0,
            negative_weight: 1.5,
            top_n: 5,
            patterns: PatternConfig::default(),
            tiers: default_tiers(),
            fallback_reason: default_fallback_reason(),
        }
    }
}

impl WatchConfig {
    /// `recency_window_hours` as a duration.
    ///
    /// Errors when the window is not positive or does not fit a `TimeDelta`.
    pub fn recency_window(&self) -> WatchResult<TimeDelta> {
        if self.recency_window_hours <= 0 {
            return Err(WatchError::Config(format!(
                "recency_window_hours must be > 0, got {}",
                self.recency_window_hours
            )));
        }
        TimeDelta::try_hours(self.recency_window_hours).ok_or_else(|| {
            WatchError::Config(format!(
                "recency_window_hours out of range, got {}",
                self.recency_window_hours
            ))
        })
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> WatchResult<()> {
        self.recency_window()?;
        if !self.credibility_boost.is_finite() || self.credibility_boost <= 0.0 {
            return Err(WatchError::Config(format!(
                "credibility_boost must be finite and > 0, got {}",
                self.credibility_boost
            )));
        }
        if !self.negative_weight.is_finite() || self.negative_weight < 0.0 {
            return Err(WatchError::Config(format!(
                "negative_weight must be finite and >= 0, got {}",
                self.negative_weight
            )));
        }
        if self.top_n < 1 {
            return Err(WatchError::Config(format!(
                "top_n must be >= 1, got {}",
                self.top_n
            )));
        }

        for spec in &self.patterns.positive {
            validate_pattern(spec, true)?;
        }
        for spec in &self.patterns.negative {
            validate_pattern(spec, false)?;
        }

        if self.tiers.is_empty() {
            return Err(WatchError::Config(
                "at least one decision tier is required".to_string(),
            ));
        }
        for tier in &self.tiers {
            if tier.condition.is_empty() {
                return Err(WatchError::Config(format!(
                    "tier `{}` has no condition",
                    tier.name
                )));
            }
            if let Some(min) = tier.condition.min_max_credible_score {
                if !min.is_finite() {
                    return Err(WatchError::Config(format!(
                        "tier `{}`: min_max_credible_score must be finite",
                        tier.name
                    )));
                }
            }
            // A zero-confidence tier would report result=false while matching.
            if !(tier.confidence > 0.0 && tier.confidence <= 1.0) {
                return Err(WatchError::Config(format!(
                    "tier `{}`: confidence must be in (0, 1], got {}",
                    tier.name, tier.confidence
                )));
            }
            validate_template(&tier.name, &tier.reason)?;
        }
        validate_template("fallback", &self.fallback_reason)?;
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> WatchResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| WatchError::Config(format!("JSON parse error: {e}")))
    }

    /// Load and validate a JSON config file.
    pub fn from_file(path: &Path) -> WatchResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

fn validate_pattern(spec: &PatternSpec, positive: bool) -> WatchResult<()> {
    if spec.pattern.trim().is_empty() {
        return Err(WatchError::Config("empty pattern".to_string()));
    }
    if spec.category.is_positive() != positive {
        let list = if positive { "positive" } else { "negative" };
        return Err(WatchError::Config(format!(
            "pattern `{}` has category {:?}, not allowed in the {list} list",
            spec.pattern, spec.category
        )));
    }
    Ok(())
}

/// Check that every `{...}` in a template names a known placeholder.
fn validate_template(owner: &str, template: &str) -> WatchResult<()> {
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err(WatchError::Config(format!(
                "reason for `{owner}` has an unmatched `}}`"
            )));
        }
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            WatchError::Config(format!("reason for `{owner}` has an unclosed `{{`"))
        })?;
        let name = &after[..close];
        if !REASON_PLACEHOLDERS.contains(&name) {
            return Err(WatchError::Config(format!(
                "reason for `{owner}` uses unknown placeholder `{{{name}}}`"
            )));
        }
        rest = &after[close + 1..];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        WatchConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_tables() {
        let p = PatternConfig::default();
        assert_eq!(p.positive.len(), 6);
        assert_eq!(p.negative.len(), 33);
        assert!(p.blocked_sources.contains(&"polymarket".to_string()));
        assert!(p.positive.iter().all(|s| s.category.is_positive()));
        assert!(p.negative.iter().all(|s| !s.category.is_positive()));
    }

    #[test]
    fn test_rejects_zero_window() {
        let config = WatchConfig {
            recency_window_hours: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_window() {
        let config = WatchConfig::from_json(r#"{"recency_window_hours": 9223372036854775807}"#)
            .unwrap();
        assert!(matches!(config.validate(), Err(WatchError::Config(_))));

        let config = WatchConfig {
            recency_window_hours: 24 * 365 * 100,
            ..Default::default()
        };
        assert_eq!(
            config.recency_window().unwrap(),
            TimeDelta::hours(24 * 365 * 100)
        );
    }

    #[test]
    fn test_rejects_zero_top_n() {
        let config = WatchConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_weights() {
        let config = WatchConfig {
            credibility_boost: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = WatchConfig {
            negative_weight: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_confidence_tier() {
        let mut config = WatchConfig::default();
        config.tiers[3].confidence = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("uncredible_cluster"));
    }

    #[test]
    fn test_rejects_empty_condition() {
        let mut config = WatchConfig::default();
        config.tiers[0].condition = TierCondition::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_misfiled_category() {
        let mut config = WatchConfig::default();
        config
            .patterns
            .negative
            .push(PatternSpec::new("us bombs iran", SignalCategory::ConfirmedStrike));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_placeholder() {
        let mut config = WatchConfig::default();
        config.fallback_reason = "No signal ({weak_hits})".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("weak_hits"));
    }

    #[test]
    fn test_rejects_unbalanced_braces() {
        let mut config = WatchConfig::default();
        config.fallback_reason = "No signal ({noncredible_positive".into();
        assert!(config.validate().is_err());
        config.fallback_reason = "No signal }".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config = WatchConfig::from_json(r#"{"top_n": 3, "credibility_boost": 3.0}"#).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.credibility_boost, 3.0);
        assert_eq!(config.recency_window_hours, 24);
        assert_eq!(config.tiers.len(), 4);
    }

    #[test]
    fn test_from_json_invalid() {
        let err = WatchConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, WatchError::Config(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_categories() {
        let json = serde_json::to_string(&WatchConfig::default()).unwrap();
        assert!(json.contains("\"meta_commentary\""));
        let back = WatchConfig::from_json(&json).unwrap();
        assert_eq!(back, WatchConfig::default());
    }
}
