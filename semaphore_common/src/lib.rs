//!
//! Common types and utilities shared by the quote feed and the dashboard.
//!
//! This crate aggregates:
//! - `error` — unified error type `SemaphoreError` and the per-fetch `FetchError`.
//! - `result` — handy `Result<T, SemaphoreError>` alias.
//! - `instruments` — instrument roles and the fixed three-entry `InstrumentSet`.
//! - `sampling` — period/interval presets used when requesting series.
//! - `snapshot` — `QuoteSnapshot` derived from a raw price series.
//! - `signal` — signal states and the classifier.
//! - `display` — `DisplayModel` handed to presenters.
#![warn(missing_docs)]
pub mod display;
pub mod error;
pub mod instruments;
pub mod result;
pub mod sampling;
pub mod signal;
pub mod snapshot;

pub use display::{DisplayModel, InstrumentPanel};
pub use error::{FetchError, SemaphoreError};
pub use instruments::{Instrument, InstrumentRole, InstrumentSet};
pub use result::Result;
pub use sampling::Sampling;
pub use signal::{Signal, SignalState, classify};
pub use snapshot::{PricePoint, QuoteSnapshot};
