//! Yahoo Finance quote source.
//!
//! Uses the blocking `yahoo_finance_api` connector and the chart range query
//! (`range` = sampling period, `interval` = sampling interval). Only the close
//! price of every bar is kept.

use log::debug;
use semaphore_common::{FetchError, PricePoint, Sampling, SemaphoreError};
use yahoo_finance_api as yahoo;

use crate::source::QuoteSource;

/// Quote source backed by the Yahoo Finance chart API.
pub struct YahooSource {
    connector: yahoo::YahooConnector,
}

impl YahooSource {
    /// Creates the HTTP connector.
    pub fn new() -> Result<Self, SemaphoreError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            SemaphoreError::Source(format!("Failed to create Yahoo connector: {}", e))
        })?;
        Ok(Self { connector })
    }
}

impl QuoteSource for YahooSource {
    fn fetch(&self, symbol: &str, sampling: &Sampling) -> Result<Vec<PricePoint>, FetchError> {
        debug!(
            "Fetching {} from Yahoo (range={}, interval={})",
            symbol, sampling.period, sampling.interval
        );
        let response = self
            .connector
            .get_quote_range(symbol, sampling.interval, sampling.period)
            .map_err(map_yahoo_error)?;
        let quotes = response.quotes().map_err(map_yahoo_error)?;

        let points = to_price_points(quotes.into_iter().map(|q| (q.timestamp as i64, q.close)));
        debug!("Yahoo returned {} bars for {}", points.len(), symbol);
        Ok(points)
    }
}

/// No quotes and no result both mean the symbol had nothing to report.
fn map_yahoo_error(err: yahoo::YahooError) -> FetchError {
    match err {
        yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => FetchError::NoData,
        other => FetchError::Unavailable(other.to_string()),
    }
}

/// Converts `(unix seconds, close)` bars into price points.
fn to_price_points(bars: impl IntoIterator<Item = (i64, f64)>) -> Vec<PricePoint> {
    bars.into_iter()
        .map(|(timestamp_s, close)| PricePoint::new(timestamp_s * 1000, close))
        .collect()
}
