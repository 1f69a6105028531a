//! Error types shared between the feed and the dashboard.
//!
//! `SemaphoreError` covers process-level failures (I/O, configuration,
//! serialization, quote source setup) that are propagated up to `main`.
//! `FetchError` is the per-instrument outcome of a quote request; it is never
//! fatal and the orchestrator degrades the instrument to an empty snapshot.
use std::io;

use thiserror::Error;

/// Unified error type shared by the feed and the dashboard.
#[derive(Error, Debug)]
pub enum SemaphoreError {
    /// I/O error originating from the standard library (files, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Error while parsing an instruments file into an `InstrumentSet`.
    #[error("Parse instruments file error: {0}")]
    ParseInstrumentsFile(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A quote source could not be constructed (e.g., HTTP client setup failed).
    #[error("Quote source error: {0}")]
    Source(String),
}

/// Outcome of a failed quote request for a single instrument.
///
/// Both variants mean the same thing to the orchestrator: the instrument is
/// missing for this refresh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport or provider failure.
    #[error("Quote source unavailable: {0}")]
    Unavailable(String),

    /// The request succeeded but returned no samples.
    #[error("No data returned")]
    NoData,
}
