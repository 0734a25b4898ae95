// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Monitor (Polling Orchestrator)
// ─────────────────────────────────────────────────────────────────────
//! Drives the engine once per polling cycle.
//!
//! A cycle polls the primary feeds, and only when they already carry a
//! positive net score polls the confirmation feeds too (a metered search
//! API in production). Both layers are merged into one batch and run
//! through [`WatchPipeline::run_cycle`].

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use strikewatch_core::{CycleReport, WatchPipeline};
use strikewatch_types::{WatchConfig, WatchResult};

use crate::feed::{collect, ArticleFeed, FetchedBatch};
use crate::record::{save_scan, ScanRecord};

/// One cycle's decision plus fetch bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOutcome {
    pub ran_at: DateTime<Utc>,
    pub report: CycleReport,
    pub fetched: FetchedBatch,
    /// Whether the confirmation feeds were polled.
    pub confirmed: bool,
    /// Where the scan record was written, if saving is enabled.
    pub record_path: Option<PathBuf>,
}

pub struct Monitor {
    pipeline: WatchPipeline,
    primary: Vec<Box<dyn ArticleFeed>>,
    confirmation: Vec<Box<dyn ArticleFeed>>,
    use_confirmation: bool,
    logs_dir: Option<PathBuf>,
}

impl Monitor {
    pub fn new(config: &WatchConfig) -> WatchResult<Self> {
        Ok(Self {
            pipeline: WatchPipeline::new(config)?,
            primary: Vec::new(),
            confirmation: Vec::new(),
            use_confirmation: true,
            logs_dir: None,
        })
    }

    pub fn with_primary_feed(mut self, feed: Box<dyn ArticleFeed>) -> Self {
        self.primary.push(feed);
        self
    }

    pub fn with_confirmation_feed(mut self, feed: Box<dyn ArticleFeed>) -> Self {
        self.confirmation.push(feed);
        self
    }

    /// Enable or disable the confirmation layer.
    pub fn use_confirmation(mut self, enabled: bool) -> Self {
        self.use_confirmation = enabled;
        self
    }

    /// Persist a scan record per cycle into `dir`.
    pub fn save_scans_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.logs_dir = Some(dir.into());
        self
    }

    /// Run one cycle as of `now`.
    ///
    /// Only writing the scan record can fail; fetch failures are logged
    /// and counted in the outcome.
    pub fn check_once(&self, now: DateTime<Utc>) -> WatchResult<CycleOutcome> {
        let mut fetched = collect(&self.primary);
        log::info!(
            "primary feeds returned {} unique articles ({} rejected)",
            fetched.articles.len(),
            fetched.rejected
        );

        let mut report = self.pipeline.run_cycle(&fetched.articles, now);
        let best = report.scored.first().map_or(0.0, |s| s.net_score);

        let confirmed = self.use_confirmation && !self.confirmation.is_empty() && best > 0.0;
        if confirmed {
            log::info!("primary feeds show positive signals (best {best:.2}), polling confirmation feeds");
            fetched.merge(collect(&self.confirmation));
            report = self.pipeline.run_cycle(&fetched.articles, now);
        }

        let mut outcome = CycleOutcome {
            ran_at: now,
            report,
            fetched,
            confirmed,
            record_path: None,
        };

        if let Some(dir) = &self.logs_dir {
            let record = ScanRecord::from_outcome(&outcome);
            outcome.record_path = Some(save_scan(dir, &record)?);
        }
        Ok(outcome)
    }

    /// Poll every `interval` until a positive decision or `max_cycles`.
    ///
    /// `on_cycle` sees every successful outcome, the final one included.
    /// A failing cycle is logged and retried on the next interval.
    /// Returns the last successful outcome.
    pub fn run<F>(
        &self,
        interval: Duration,
        max_cycles: Option<usize>,
        mut on_cycle: F,
    ) -> Option<CycleOutcome>
    where
        F: FnMut(&CycleOutcome),
    {
        log::info!("starting monitor, checking every {}s", interval.as_secs());
        let mut last = None;
        let mut cycles = 0usize;

        loop {
            cycles += 1;
            match self.check_once(Utc::now()) {
                Ok(outcome) => {
                    on_cycle(&outcome);
                    let decision = &outcome.report.decision;
                    if decision.result {
                        log::warn!("*** ALERT: US STRIKE ON IRAN DETECTED ***");
                        log::warn!("confidence: {:.0}%", decision.confidence * 100.0);
                        log::warn!("reason: {}", decision.reason);
                        return Some(outcome);
                    }
                    log::info!("no detection: {}", decision.reason);
                    last = Some(outcome);
                }
                Err(e) => log::error!("check failed: {e}"),
            }

            if max_cycles.is_some_and(|max| cycles >= max) {
                log::info!("stopping after {cycles} cycles");
                return last;
            }
            std::thread::sleep(interval);
        }
    }

    pub fn pipeline(&self) -> &WatchPipeline {
        &self.pipeline
    }
}
