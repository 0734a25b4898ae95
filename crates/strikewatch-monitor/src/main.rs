// ─────────────────────────────────────────────────────────────────────
// Strikewatch — Command-Line Monitor
// ─────────────────────────────────────────────────────────────────────
//! Polls JSON article feeds and prints the decision for the question
//! "has the US struck Iran?".
//!
//! ```text
//! strikewatch --once --feed rss.json --confirm-feed search.json
//! RUST_LOG=debug strikewatch --feed rss.json --interval 120
//! ```

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use strikewatch_monitor::{CycleOutcome, JsonFileFeed, Monitor};
use strikewatch_types::{TopArticle, WatchConfig};

#[derive(Parser)]
#[command(name = "strikewatch")]
#[command(about = "Monitor news feeds for a confirmed US strike on Iran")]
struct Cli {
    /// Run a single check and exit
    #[arg(long)]
    once: bool,

    /// Seconds between checks
    #[arg(long, default_value_t = 300)]
    interval: u64,

    /// Primary feed file (JSON array of articles), repeatable
    #[arg(long = "feed", required = true)]
    feeds: Vec<PathBuf>,

    /// Confirmation feed file, polled only on positive signals, repeatable
    #[arg(long = "confirm-feed")]
    confirm_feeds: Vec<PathBuf>,

    /// Skip the confirmation feeds
    #[arg(long)]
    no_confirm: bool,

    /// Engine configuration (JSON); built-in defaults otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for per-cycle scan records
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    /// Do not write scan records
    #[arg(long)]
    no_save: bool,

    /// Stop after this many cycles
    #[arg(long)]
    max_cycles: Option<usize>,
}

/// Printed per cycle; the full article list lives in the scan record.
#[derive(Serialize)]
struct Summary<'a> {
    timestamp: String,
    result: bool,
    confidence: f64,
    reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<&'a str>,
    top_articles: Vec<TopArticle>,
    total_scanned: usize,
    total_recent: usize,
    total_with_signal: usize,
    confirmed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_path: Option<String>,
}

impl<'a> Summary<'a> {
    fn from_outcome(outcome: &'a CycleOutcome) -> Self {
        let decision = &outcome.report.decision;
        Self {
            timestamp: outcome.ran_at.to_rfc3339(),
            result: decision.result,
            confidence: decision.confidence,
            reason: &decision.reason,
            tier: decision.tier.as_deref(),
            top_articles: decision.top_summaries(),
            total_scanned: outcome.fetched.total_fetched,
            total_recent: outcome.report.scored.len(),
            total_with_signal: outcome.report.with_signal(),
            confirmed: outcome.confirmed,
            record_path: outcome
                .record_path
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            WatchConfig::from_file(path)?
        }
        None => WatchConfig::default(),
    };

    let mut monitor = Monitor::new(&config)?.use_confirmation(!cli.no_confirm);
    for path in cli.feeds {
        monitor = monitor.with_primary_feed(Box::new(JsonFileFeed::new(path)));
    }
    for path in cli.confirm_feeds {
        monitor = monitor.with_confirmation_feed(Box::new(JsonFileFeed::new(path)));
    }
    if !cli.no_save {
        monitor = monitor.save_scans_to(cli.logs_dir);
    }

    if cli.once {
        print_summary(&monitor.check_once(Utc::now())?);
        return Ok(());
    }

    let last = monitor.run(
        Duration::from_secs(cli.interval),
        cli.max_cycles,
        print_summary,
    );
    if last.is_none() {
        log::error!("no cycle completed successfully");
    }
    Ok(())
}

fn print_summary(outcome: &CycleOutcome) {
    match serde_json::to_string_pretty(&Summary::from_outcome(outcome)) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to render summary: {e}"),
    }
    if let Some(path) = &outcome.record_path {
        eprintln!("Full results with all articles saved to: {}", path.display());
    }
}
