// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Pattern Library
// ─────────────────────────────────────────────────────────────────────
//! Compiled rule table: ordered positive and negative patterns with
//! their categories, plus the credible-source and blocklist sets.
//!
//! Patterns are data. [`PatternLibrary::compile`] turns a
//! [`PatternConfig`] into case-insensitive regexes once; scoring only
//! reads the result, so a library can be shared across threads.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use strikewatch_types::{PatternConfig, PatternSpec, SignalCategory, WatchError, WatchResult};

/// Domain suffixes stripped by [`normalize_source`]. Longest first.
const DOMAIN_SUFFIXES: [&str; 6] = [".co.uk", ".com", ".org", ".net", ".news", ".io"];

/// Canonical form of a source name, shared by the credible and blocked
/// lookups.
///
/// Trims, lowercases, collapses whitespace, drops a leading `www.` and a
/// leading `the `, and strips one known domain suffix, so `"Reuters"`,
/// `"reuters.com"` and `"www.Reuters.com"` all become `"reuters"`.
pub fn normalize_source(raw: &str) -> String {
    let mut s = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if let Some(rest) = s.strip_prefix("www.") {
        s = rest.to_string();
    }
    if let Some(rest) = s.strip_prefix("the ") {
        s = rest.to_string();
    }
    for suffix in DOMAIN_SUFFIXES {
        if let Some(rest) = s.strip_suffix(suffix) {
            if !rest.is_empty() {
                s = rest.to_string();
            }
            break;
        }
    }
    s
}

/// One compiled pattern with its category.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    category: SignalCategory,
}

impl PatternRule {
    fn compile(spec: &PatternSpec) -> WatchResult<Self> {
        let regex = RegexBuilder::new(&spec.pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| WatchError::Pattern {
                pattern: spec.pattern.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            regex,
            category: spec.category,
        })
    }

    /// Number of non-overlapping matches in `text`.
    pub fn count(&self, text: &str) -> u32 {
        u32::try_from(self.regex.find_iter(text).count()).unwrap_or(u32::MAX)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn category(&self) -> SignalCategory {
        self.category
    }
}

/// Total matches per polarity for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalHits {
    pub positive: u32,
    pub negative: u32,
}

/// A rule that fired, with its match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub pattern: &'a str,
    pub category: SignalCategory,
    pub count: u32,
}

/// Static rule set used by the scorer.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    positive: Vec<PatternRule>,
    negative: Vec<PatternRule>,
    credible: HashSet<String>,
    blocked: HashSet<String>,
}

impl PatternLibrary {
    /// Compile every pattern and normalize both source sets.
    pub fn compile(config: &PatternConfig) -> WatchResult<Self> {
        let positive = config
            .positive
            .iter()
            .map(PatternRule::compile)
            .collect::<WatchResult<Vec<_>>>()?;
        let negative = config
            .negative
            .iter()
            .map(PatternRule::compile)
            .collect::<WatchResult<Vec<_>>>()?;

        let library = Self {
            positive,
            negative,
            credible: normalized_set(&config.credible_sources),
            blocked: normalized_set(&config.blocked_sources),
        };
        log::debug!(
            "pattern library compiled: {} positive, {} negative, {} credible, {} blocked",
            library.positive.len(),
            library.negative.len(),
            library.credible.len(),
            library.blocked.len()
        );
        Ok(library)
    }

    /// Count all matches of both pattern sets in `text`.
    pub fn count_hits(&self, text: &str) -> SignalHits {
        let sum = |rules: &[PatternRule]| {
            rules
                .iter()
                .fold(0u32, |acc, r| acc.saturating_add(r.count(text)))
        };
        SignalHits {
            positive: sum(&self.positive),
            negative: sum(&self.negative),
        }
    }

    /// Every rule with at least one match, positives first, in table order.
    pub fn explain(&self, text: &str) -> Vec<RuleMatch<'_>> {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .filter_map(|rule| {
                let count = rule.count(text);
                (count > 0).then(|| RuleMatch {
                    pattern: rule.pattern(),
                    category: rule.category(),
                    count,
                })
            })
            .collect()
    }

    pub fn is_credible(&self, source: &str) -> bool {
        self.credible.contains(&normalize_source(source))
    }

    pub fn is_blocked(&self, source: &str) -> bool {
        self.blocked.contains(&normalize_source(source))
    }

    pub fn positive_rules(&self) -> &[PatternRule] {
        &self.positive
    }

    pub fn negative_rules(&self) -> &[PatternRule] {
        &self.negative
    }
}

fn normalized_set(sources: &[String]) -> HashSet<String> {
    sources
        .iter()
        .map(|s| normalize_source(s))
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PatternLibrary {
        PatternLibrary::compile(&PatternConfig::default()).unwrap()
    }

    #[test]
    fn test_normalize_variants() {
        assert_eq!(normalize_source("Reuters"), "reuters");
        assert_eq!(normalize_source("reuters.com"), "reuters");
        assert_eq!(normalize_source("  www.Reuters.com "), "reuters");
        assert_eq!(normalize_source("The  Guardian"), "guardian");
        assert_eq!(normalize_source("bbc.co.uk"), "bbc");
        assert_eq!(normalize_source(".com"), ".com");
        assert_eq!(normalize_source(""), "");
    }

    #[test]
    fn test_credible_lookup_normalizes() {
        let lib = library();
        assert!(lib.is_credible("Reuters"));
        assert!(lib.is_credible("reuters.com"));
        assert!(lib.is_credible("The Guardian"));
        assert!(lib.is_credible("apnews.com"));
        assert!(!lib.is_credible("Some Blog"));
        assert!(!lib.is_credible(""));
    }

    #[test]
    fn test_blocked_lookup_normalizes() {
        let lib = library();
        assert!(lib.is_blocked("Polymarket"));
        assert!(lib.is_blocked("kalshi.com"));
        assert!(!lib.is_blocked("Reuters"));
    }

    #[test]
    fn test_positive_match_case_insensitive() {
        let lib = library();
        let hits = lib.count_hits("US STRIKES IRAN overnight");
        assert_eq!(hits, SignalHits { positive: 1, negative: 0 });
    }

    #[test]
    fn test_counts_every_occurrence() {
        let lib = library();
        let hits = lib.count_hits("US strikes Iran. Hours later, US strikes Iran again.");
        assert_eq!(hits.positive, 2);
        let hits = lib.count_hits("sanctions, more sanctions");
        assert_eq!(hits.negative, 2);
    }

    #[test]
    fn test_speculative_headline_hits_both_sets() {
        let lib = library();
        let hits = lib.count_hits("Will the US strike Iran?");
        assert_eq!(hits, SignalHits { positive: 1, negative: 1 });
    }

    #[test]
    fn test_word_boundary_on_actor() {
        let lib = library();
        assert_eq!(lib.count_hits("famous strikes iran").positive, 0);
    }

    #[test]
    fn test_meta_commentary_negative() {
        let lib = library();
        let matches = lib.explain("Polymarket odds of US strikes Iran");
        let categories: Vec<_> = matches.iter().map(|m| m.category).collect();
        assert!(categories.contains(&SignalCategory::ConfirmedStrike));
        assert!(categories.contains(&SignalCategory::MetaCommentary));
        assert_eq!(lib.count_hits("Polymarket odds of US strikes Iran").negative, 2);
    }

    #[test]
    fn test_explain_empty_for_unrelated() {
        let lib = library();
        assert!(lib.explain("Local bakery wins award").is_empty());
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let mut config = PatternConfig::default();
        config
            .negative
            .push(PatternSpec::new("(unclosed", SignalCategory::Speculative));
        let err = PatternLibrary::compile(&config).unwrap_err();
        match err {
            WatchError::Pattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extensible_without_code_change() {
        let mut config = PatternConfig::default();
        config
            .positive
            .push(PatternSpec::new(r"tomahawks?\s+hit\s+iran", SignalCategory::ConfirmedStrike));
        let lib = PatternLibrary::compile(&config).unwrap();
        assert_eq!(lib.positive_rules().len(), 7);
        assert_eq!(lib.count_hits("Tomahawks hit Iran").positive, 1);
    }
}
