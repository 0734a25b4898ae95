use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use strikewatch_core::scorer::net_score;
use strikewatch_core::{aggregate, ArticleScorer, DecisionEngine, PatternLibrary};
use strikewatch_types::{AggregateStats, ArticleRecord, PatternConfig, ScoredArticle, WatchConfig};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

fn scorer() -> ArticleScorer {
    ArticleScorer::new(&WatchConfig::default()).unwrap()
}

fn score(title: &str, source: &str) -> ScoredArticle {
    scorer()
        .score(&ArticleRecord::new(title, "", source, now()), now())
        .scored()
        .unwrap()
}

// Consonant-only filler can never complete a pattern word.
const FILLER: &str = "[b-df-hj-np-tv-z ]{0,60}";

proptest! {
    #[test]
    fn scoring_is_deterministic(title in ".{1,80}", desc in ".{0,80}", source in "[a-zA-Z .]{0,20}") {
        let s = scorer();
        let article = ArticleRecord::new(title, desc, source, now());
        prop_assert_eq!(s.score(&article, now()), s.score(&article, now()));
    }

    #[test]
    fn positive_hit_adds_boost(filler in FILLER, credible in any::<bool>()) {
        let source = if credible { "Reuters" } else { "blog" };
        let base = score(&format!("{filler}."), source);
        let more = score(&format!("{filler}. US strikes Iran."), source);
        prop_assert_eq!(more.positive_hits, base.positive_hits + 1);
        prop_assert_eq!(more.negative_hits, base.negative_hits);
        let boost = if credible { 2.0 } else { 1.0 };
        prop_assert!((more.net_score - base.net_score - boost).abs() < 1e-9);
    }

    #[test]
    fn negative_hit_subtracts_penalty(filler in FILLER, credible in any::<bool>()) {
        let source = if credible { "Reuters" } else { "blog" };
        let base = score(&format!("US strikes Iran. {filler}."), source);
        let more = score(&format!("US strikes Iran. {filler}. Sanctions."), source);
        prop_assert_eq!(more.negative_hits, base.negative_hits + 1);
        prop_assert!((base.net_score - more.net_score - 1.5).abs() < 1e-9);
    }

    #[test]
    fn credible_source_doubles_positive_only_score(repeats in 1usize..6, filler in FILLER) {
        let title = format!("{filler}. {}", "US strikes Iran. ".repeat(repeats));
        let credible = score(&title, "Reuters");
        let plain = score(&title, "some blog");
        prop_assert_eq!(credible.negative_hits, 0);
        prop_assert!((credible.net_score - 2.0 * plain.net_score).abs() < 1e-9);
    }

    #[test]
    fn net_score_formula_monotonic(p in 0u32..1000, n in 0u32..1000, boost in 0.1f64..10.0) {
        let base = net_score(p, n, boost, 1.5);
        prop_assert!((net_score(p + 1, n, boost, 1.5) - base - boost).abs() < 1e-6);
        prop_assert!((base - net_score(p, n + 1, boost, 1.5) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn recency_window_respected(offset_secs in -200_000i64..200_000) {
        let article = ArticleRecord::new("US strikes Iran", "", "Reuters", now() - Duration::seconds(offset_secs));
        let excluded = scorer().score(&article, now()).is_excluded();
        prop_assert_eq!(excluded, offset_secs > 24 * 3600);
    }

    #[test]
    fn result_iff_positive_confidence(
        credible in 0usize..6,
        weak in 0usize..6,
        max in proptest::option::of(-10.0f64..10.0),
    ) {
        let engine = DecisionEngine::new(&WatchConfig::default()).unwrap();
        let stats = AggregateStats {
            credible_positive_count: credible,
            noncredible_positive_count: weak,
            max_net_score_credible: max,
            ..Default::default()
        };
        let d = engine.decide(&stats);
        prop_assert_eq!(d.confidence == 0.0, !d.result);
        prop_assert!((0.0..=1.0).contains(&d.confidence));
        prop_assert!(!d.reason.contains('{'), "reason contains an unformatted brace");
    }

    #[test]
    fn strong_tier_wins_over_weaker_tiers(credible in 1usize..10, weak in 0usize..10, max in 3.0f64..50.0) {
        let engine = DecisionEngine::new(&WatchConfig::default()).unwrap();
        let stats = AggregateStats {
            credible_positive_count: credible,
            noncredible_positive_count: weak,
            max_net_score_credible: Some(max),
            ..Default::default()
        };
        prop_assert_eq!(engine.decide(&stats).confidence, 0.90);
    }

    #[test]
    fn aggregate_top_articles_sorted(scores in proptest::collection::vec((-5.0f64..5.0, any::<bool>()), 0..30), top_n in 1usize..8) {
        let scored: Vec<ScoredArticle> = scores
            .iter()
            .enumerate()
            .map(|(i, (net, credible))| ScoredArticle {
                article: ArticleRecord::new(format!("a{i}"), "", "src", now()),
                positive_hits: 0,
                negative_hits: 0,
                is_credible: *credible,
                net_score: *net,
            })
            .collect();
        let stats = aggregate(&scored, top_n);
        prop_assert_eq!(stats.top_articles.len(), scored.len().min(top_n));
        for pair in stats.top_articles.windows(2) {
            prop_assert!(pair[0].net_score >= pair[1].net_score);
        }
        let positives = scored.iter().filter(|s| s.net_score > 0.0).count();
        prop_assert_eq!(stats.credible_positive_count + stats.noncredible_positive_count, positives);
    }
}

#[test]
fn library_compiles_default_tables() {
    let lib = PatternLibrary::compile(&PatternConfig::default()).unwrap();
    assert_eq!(lib.positive_rules().len(), 6);
    assert_eq!(lib.negative_rules().len(), 33);
}
