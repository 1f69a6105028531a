//! Refresh orchestration.
//!
//! One call to `Orchestrator::refresh` fetches every configured instrument on
//! its own scoped thread, gathers the readings over a channel, classifies the
//! three intraday percent changes and assembles the `DisplayModel`.
//!
//! A failed or empty fetch never aborts the refresh: the instrument degrades to
//! an empty snapshot, its percent change goes missing and the classifier turns
//! that into `Neutral`. A source that panics is treated as a failed fetch.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use chrono::Utc;
use crossbeam_channel::unbounded;
use log::{error, info, warn};
use semaphore_common::{
    DisplayModel, FetchError, Instrument, InstrumentPanel, InstrumentRole, InstrumentSet,
    QuoteSnapshot, Sampling, classify,
};

use crate::source::QuoteSource;

/// Intraday and history snapshots of one instrument.
struct Reading {
    intraday: QuoteSnapshot,
    history: QuoteSnapshot,
}

/// Builds display models from a quote source and a fixed instrument set.
pub struct Orchestrator<S> {
    source: S,
    instruments: InstrumentSet,
    with_history: bool,
}

impl<S: QuoteSource> Orchestrator<S> {
    /// Creates an orchestrator fetching intraday series only.
    pub fn new(source: S, instruments: InstrumentSet) -> Self {
        Self {
            source,
            instruments,
            with_history: false,
        }
    }

    /// Also fetch the multi-day history series for the charts.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.with_history = enabled;
        self
    }

    /// Configured instruments.
    pub fn instruments(&self) -> &InstrumentSet {
        &self.instruments
    }

    /// Underlying quote source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs one refresh cycle.
    pub fn refresh(&self) -> DisplayModel {
        let mut readings = self.fetch_all();

        let pct = |role: InstrumentRole| {
            readings
                .get(&role)
                .and_then(|reading| reading.intraday.percent_change())
        };
        let signal = classify(
            pct(InstrumentRole::Equity),
            pct(InstrumentRole::Dollar),
            pct(InstrumentRole::Yield),
        );

        let panels: Vec<InstrumentPanel> = self
            .instruments
            .iter()
            .map(|instrument| {
                let reading = readings.remove(&instrument.role).unwrap_or_else(|| {
                    error!("No reading collected for {}", instrument.symbol);
                    Reading {
                        intraday: QuoteSnapshot::empty(),
                        history: QuoteSnapshot::empty(),
                    }
                });
                InstrumentPanel::new(instrument, &reading.intraday, &reading.history)
            })
            .collect();

        let moves: Vec<String> = panels
            .iter()
            .map(|p| format!("{} {}", p.symbol, fmt_pct(p.percent_change)))
            .collect();
        info!("Signal {} ({})", signal.state, moves.join(", "));

        DisplayModel {
            signal,
            refreshed_at_ms: Utc::now().timestamp_millis(),
            panels,
        }
    }

    fn fetch_all(&self) -> HashMap<InstrumentRole, Reading> {
        let (tx, rx) = unbounded::<(InstrumentRole, Reading)>();

        thread::scope(|scope| {
            for instrument in self.instruments.iter() {
                let tx = tx.clone();
                scope.spawn(move || {
                    let intraday = self.snapshot(instrument, &Sampling::INTRADAY);
                    let history = if self.with_history {
                        self.snapshot(instrument, &Sampling::HISTORY)
                    } else {
                        QuoteSnapshot::empty()
                    };
                    if let Err(e) = tx.send((instrument.role, Reading { intraday, history })) {
                        error!("Failed to hand over reading for {}: {}", instrument.symbol, e);
                    }
                });
            }
        });
        drop(tx);

        rx.try_iter().collect()
    }

    fn snapshot(&self, instrument: &Instrument, sampling: &Sampling) -> QuoteSnapshot {
        let fetched = panic::catch_unwind(AssertUnwindSafe(|| {
            self.source.fetch(&instrument.symbol, sampling)
        }))
        .unwrap_or_else(|_| Err(FetchError::Unavailable(String::from("quote source panicked"))));

        match fetched {
            Ok(series) => {
                let snapshot = QuoteSnapshot::from_series(series);
                if snapshot.is_empty() {
                    warn!(
                        "{} ({}): no usable {}/{} data",
                        instrument.display_name,
                        instrument.symbol,
                        sampling.period,
                        sampling.interval
                    );
                }
                snapshot
            }
            Err(e) => {
                warn!(
                    "{} ({}): {}/{} fetch failed: {}",
                    instrument.display_name,
                    instrument.symbol,
                    sampling.period,
                    sampling.interval,
                    e
                );
                QuoteSnapshot::empty()
            }
        }
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => String::from("missing"),
    }
}
