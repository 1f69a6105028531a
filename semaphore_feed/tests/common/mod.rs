//! Test doubles shared by the integration tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use semaphore_common::{FetchError, PricePoint, Sampling};
use semaphore_feed::QuoteSource;

/// In-memory quote source answering from a fixed table and counting calls.
#[derive(Default)]
pub struct MockSource {
    answers: HashMap<(String, &'static str), Result<Vec<PricePoint>, FetchError>>,
    panicking: HashSet<String>,
    calls: Mutex<Vec<(String, &'static str)>>,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `symbol` with a two-bar series moving from `reference` to `last`.
    pub fn with_move(self, symbol: &str, reference: f64, last: f64) -> Self {
        self.with_series(symbol, Sampling::INTRADAY, series(&[reference, last]))
    }

    /// Answer `symbol` with a series moving `pct` percent from 100.
    pub fn with_pct(self, symbol: &str, pct: f64) -> Self {
        self.with_move(symbol, 100.0, 100.0 * (1.0 + pct / 100.0))
    }

    pub fn with_series(
        mut self,
        symbol: &str,
        sampling: Sampling,
        points: Vec<PricePoint>,
    ) -> Self {
        self.answers
            .insert((String::from(symbol), sampling.interval), Ok(points));
        self
    }

    pub fn with_error(mut self, symbol: &str, sampling: Sampling, err: FetchError) -> Self {
        self.answers
            .insert((String::from(symbol), sampling.interval), Err(err));
        self
    }

    /// Panic on every fetch of `symbol`.
    pub fn with_panic(mut self, symbol: &str) -> Self {
        self.panicking.insert(String::from(symbol));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, symbol: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s == symbol)
            .count()
    }
}

impl QuoteSource for MockSource {
    fn fetch(&self, symbol: &str, sampling: &Sampling) -> Result<Vec<PricePoint>, FetchError> {
        let key = (String::from(symbol), sampling.interval);
        self.calls.lock().unwrap().push(key.clone());
        if self.panicking.contains(symbol) {
            panic!("quote source blew up on {}", symbol);
        }
        self.answers
            .get(&key)
            .cloned()
            .unwrap_or(Err(FetchError::Unavailable(format!("unknown symbol {}", symbol))))
    }
}

#[allow(dead_code)]
pub fn series(prices: &[f64]) -> Vec<PricePoint> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| PricePoint::new(1_700_000_000_000 + i as i64 * 60_000, *p))
        .collect()
}
