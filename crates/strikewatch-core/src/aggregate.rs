// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Aggregator
// ─────────────────────────────────────────────────────────────────────

use std::cmp::Ordering;

use strikewatch_types::{AggregateStats, ScoredArticle};

/// Sort by `net_score` descending. Stable, so ties keep input order.
pub fn rank_by_score(articles: &mut [ScoredArticle]) {
    articles.sort_by(|a, b| b.net_score.partial_cmp(&a.net_score).unwrap_or(Ordering::Equal));
}

/// Summarize one cycle's scored articles.
///
/// Only strictly positive net scores count as signals. `top_articles`
/// holds the `top_n` best articles whatever their sign, so a quiet cycle
/// still shows what was seen.
pub fn aggregate(scored: &[ScoredArticle], top_n: usize) -> AggregateStats {
    let mut stats = AggregateStats {
        total_scored: scored.len(),
        ..Default::default()
    };

    for article in scored {
        if article.is_credible {
            if article.is_positive() {
                stats.credible_positive_count += 1;
            }
            let is_new_max = stats
                .max_net_score_credible
                .map_or(true, |max| article.net_score > max);
            if is_new_max {
                stats.max_net_score_credible = Some(article.net_score);
                stats.top_credible_source = Some(article.article.source.clone());
            }
        } else if article.is_positive() {
            stats.noncredible_positive_count += 1;
        }
    }

    let mut ranked = scored.to_vec();
    rank_by_score(&mut ranked);
    ranked.truncate(top_n);
    stats.top_articles = ranked;
    stats
}
