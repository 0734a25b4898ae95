// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Scan Records
// ─────────────────────────────────────────────────────────────────────
//! Per-cycle JSON records written to a logs directory, one file per
//! cycle named `scan_<YYYY-MM-DD_HH-MM-SS-mmm>.json`. A name already
//! taken gets a `_<n>` suffix, so records are never overwritten.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use strikewatch_types::{ScoredArticle, WatchResult};

use crate::monitor::CycleOutcome;

/// Full record of one cycle, including every scored article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub ran_at: DateTime<Utc>,
    pub result: bool,
    pub confidence: f64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// Raw records fetched from all feeds.
    pub total_scanned: usize,
    /// Records that were scored (recent, not blocked, valid).
    pub total_recent: usize,
    pub total_rejected: usize,
    pub total_excluded: usize,
    /// Scored records with a positive net score.
    pub total_with_signal: usize,
    pub articles: Vec<ScoredArticle>,
}

impl ScanRecord {
    pub fn from_outcome(outcome: &CycleOutcome) -> Self {
        let report = &outcome.report;
        Self {
            ran_at: outcome.ran_at,
            result: report.decision.result,
            confidence: report.decision.confidence,
            reason: report.decision.reason.clone(),
            tier: report.decision.tier.clone(),
            total_scanned: outcome.fetched.total_fetched,
            total_recent: report.scored.len(),
            total_rejected: outcome.fetched.rejected,
            total_excluded: report.excluded.len(),
            total_with_signal: report.with_signal(),
            articles: report.scored.clone(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("scan_{}.json", self.ran_at.format("%Y-%m-%d_%H-%M-%S-%3f"))
    }
}

/// Write `record` into `dir`, creating the directory if needed.
pub fn save_scan(dir: &Path, record: &ScanRecord) -> WatchResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let name = record.file_name();
    let mut path = dir.join(&name);
    let stem = name.trim_end_matches(".json");
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{stem}_{n}.json"));
        n += 1;
    }
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json)?;
    log::info!("scan record saved to {}", path.display());
    Ok(path)
}
