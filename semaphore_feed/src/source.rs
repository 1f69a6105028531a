//! Quote source abstraction.
//!
//! A quote source answers one question: the close prices of `symbol` over the
//! window described by a `Sampling`. Failures come back as `FetchError`; an
//! empty series is a valid answer and means the same thing to the caller.
use semaphore_common::{FetchError, PricePoint, Sampling};

/// Provider of price series for instrument symbols.
pub trait QuoteSource: Send + Sync {
    /// Close prices of `symbol` over `sampling.period` at `sampling.interval`, oldest first.
    ///
    /// Implementations report every failure through `FetchError` and must not
    /// panic. The orchestrator still contains a panic to the instrument being
    /// fetched, but the default panic hook prints it to stderr.
    fn fetch(&self, symbol: &str, sampling: &Sampling) -> Result<Vec<PricePoint>, FetchError>;
}
