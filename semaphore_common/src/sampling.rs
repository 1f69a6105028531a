//! Sampling parameters for quote requests.
//!
//! A `Sampling` names the session window (`period`) and the bar size
//! (`interval`) in the notation of the quote source, together with how long a
//! fetched series stays fresh in the cache.

use serde::Serialize;
use std::time::Duration;

/// Period/interval pair plus cache freshness.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct Sampling {
    /// Session window, e.g. `1d`.
    pub period: &'static str,
    /// Bar granularity, e.g. `1m`.
    pub interval: &'static str,
    /// How long a fetched series may be served from cache.
    #[serde(skip)]
    pub ttl: Duration,
}

impl Sampling {
    /// One trading day of one-minute bars; drives the signal.
    pub const INTRADAY: Sampling = Sampling {
        period: "1d",
        interval: "1m",
        ttl: Duration::from_secs(20),
    };

    /// Three days of thirty-minute bars; chart context only.
    pub const HISTORY: Sampling = Sampling {
        period: "3d",
        interval: "30m",
        ttl: Duration::from_secs(60),
    };
}
