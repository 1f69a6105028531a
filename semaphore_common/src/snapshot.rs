//! Normalized quote reading for one instrument.
//!
//! A `QuoteSnapshot` is derived from the raw price series of a session window:
//! the first sample is the `reference`, the latest sample is `last`, and the
//! percent change between them is computed once at construction. Snapshots are
//! immutable; a new one is built on every refresh.

use log::debug;
use serde::Serialize;

/// One sample of a price series.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PricePoint {
    /// UTC timestamp in milliseconds since Unix epoch.
    pub timestamp_ms: i64,
    /// Close price of the bar.
    pub price: f64,
}

impl PricePoint {
    /// Creates a new sample.
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        PricePoint {
            timestamp_ms,
            price,
        }
    }
}

/// Reading for one instrument over a session window.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QuoteSnapshot {
    last: Option<f64>,
    reference: Option<f64>,
    percent_change: Option<f64>,
    series: Vec<PricePoint>,
}

impl QuoteSnapshot {
    /// Snapshot of an instrument with no usable data.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a raw series ordered by time.
    ///
    /// Non-finite prices are dropped first. An empty remainder yields an empty
    /// snapshot. A zero reference forces the percent change to `0`.
    pub fn from_series(raw: Vec<PricePoint>) -> Self {
        let series: Vec<PricePoint> = raw.into_iter().filter(|p| p.price.is_finite()).collect();
        let (Some(first), Some(latest)) = (series.first(), series.last()) else {
            return Self::empty();
        };
        let reference = first.price;
        let last = latest.price;

        QuoteSnapshot {
            last: Some(last),
            reference: Some(reference),
            percent_change: Some(percent_change(last, reference)),
            series,
        }
    }

    /// Most recent price.
    pub fn last(&self) -> Option<f64> {
        self.last
    }

    /// First price of the session window.
    pub fn reference(&self) -> Option<f64> {
        self.reference
    }

    /// Percent move of `last` against `reference`; `None` when the snapshot is empty.
    pub fn percent_change(&self) -> Option<f64> {
        self.percent_change
    }

    /// Samples of the session window.
    pub fn series(&self) -> &[PricePoint] {
        &self.series
    }

    /// `true` when no usable sample was available.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// `last` divided by `scale`, e.g. the yield in percent for a `^TNX` reading.
    pub fn display_value(&self, scale: f64) -> Option<f64> {
        self.last.map(|last| last / scale)
    }

    /// Series with every price divided by `scale`, for charting.
    pub fn scaled_series(&self, scale: f64) -> Vec<PricePoint> {
        self.series
            .iter()
            .map(|p| PricePoint::new(p.timestamp_ms, p.price / scale))
            .collect()
    }
}

fn percent_change(last: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        debug!("Reference price is zero, percent change forced to 0");
        return 0.0;
    }
    (last / reference - 1.0) * 100.0
}
