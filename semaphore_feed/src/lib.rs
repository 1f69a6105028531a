//!
//! Quote acquisition and refresh orchestration.
//!
//! This crate aggregates:
//! - `source` — the `QuoteSource` trait implemented by every quote provider.
//! - `yahoo` — `YahooSource`, the Yahoo Finance chart API provider.
//! - `cache` — `TtlCache` and the `CachedSource` decorator bounding provider calls.
//! - `orchestrator` — `Orchestrator`, which turns one refresh into a `DisplayModel`.
#![warn(missing_docs)]
pub mod cache;
pub mod orchestrator;
pub mod source;
pub mod yahoo;

pub use cache::{CachedSource, Clock, SystemClock, TtlCache};
pub use orchestrator::Orchestrator;
pub use source::QuoteSource;
pub use yahoo::YahooSource;
