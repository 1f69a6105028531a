//! Tactical Semaphore — a terminal dashboard that reads the intraday momentum of the
//! S&P 500 future (ES=F), the dollar index future (DX=F) and the 10-year treasury yield
//! (^TNX) and classifies their joint move into a signal state.
//!
//! Usage example (CLI):
//! ```bash
//! semaphore_dashboard --interval-secs 30 --history
//! semaphore_dashboard --once --format json --instruments ./proxies.txt
//! ```
//!
//! Every cycle the orchestrator fetches the three instruments in parallel through a TTL
//! cache in front of Yahoo Finance, classifies the percent changes and hands the
//! resulting display model to the selected presenter. A failed instrument never stops
//! the loop; it only turns the signal `Neutral` until its quotes come back.
//!
//! The instruments file holds one `role;display name;symbol` line per instrument.
//! See `semaphore_common::instruments` for details.
#![warn(missing_docs)]
mod args;
mod presenter;

use crate::args::{Args, OutputFormat};
use crate::presenter::{JsonPresenter, Presenter, TextPresenter};
use clap::Parser;
use log::{error, info};
use semaphore_common::instruments::InstrumentSetParser;
use semaphore_common::{InstrumentSet, Result, SemaphoreError};
use semaphore_feed::{CachedSource, Orchestrator, QuoteSource, YahooSource};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, Instant};

/// Granularity of the shutdown check while waiting for the next refresh.
const SLEEP_SLICE: Duration = Duration::from_millis(250);

/// Refreshes and renders until `shutdown` is raised, or once when `once` is set.
fn run_loop<S: QuoteSource>(
    orchestrator: &Orchestrator<S>,
    presenter: &mut dyn Presenter,
    interval: Duration,
    once: bool,
    shutdown: &AtomicBool,
) -> Result<(), SemaphoreError> {
    while !shutdown.load(Ordering::Relaxed) {
        let started = Instant::now();
        let model = orchestrator.refresh();
        presenter.render(&model)?;

        if once {
            break;
        }
        while started.elapsed() < interval {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            thread::sleep(SLEEP_SLICE.min(interval.saturating_sub(started.elapsed())));
        }
    }
    info!("Refresh loop stopping...");
    Ok(())
}

fn main() -> Result<(), SemaphoreError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down dashboard...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| SemaphoreError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let instruments = match args.instruments.as_deref() {
        Some(raw) => load_instruments(&normalize_path(raw))?,
        None => InstrumentSet::default(),
    };
    for instrument in instruments.iter() {
        info!(
            "{}: {} ({})",
            instrument.role, instrument.display_name, instrument.symbol
        );
    }

    let source = CachedSource::new(YahooSource::new()?);
    let orchestrator = Orchestrator::new(source, instruments).with_history(args.history);

    let mut presenter: Box<dyn Presenter> = match args.format {
        OutputFormat::Text => Box::new(TextPresenter::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonPresenter::new(io::stdout())),
    };

    let interval = Duration::from_secs(args.interval_secs.max(1));
    info!(
        "Dashboard running, refresh every {}s. Press Ctrl+C to exit.",
        interval.as_secs()
    );
    if let Err(e) = run_loop(&orchestrator, presenter.as_mut(), interval, args.once, &shutdown) {
        error!("Dashboard stopped: {}", e);
        return Err(e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn load_instruments(path: &Path) -> Result<InstrumentSet, SemaphoreError> {
    if !is_file_exist(path) {
        return Err(SemaphoreError::Format(format!(
            "Instruments file not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)?;
    InstrumentSet::parse_from_file(BufReader::new(file))
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
