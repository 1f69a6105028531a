//! Instrument roles and the fixed instrument set shared by the feed and the dashboard.

use serde::Serialize;
use std::io::BufRead;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::SemaphoreError;

/// Raw `^TNX` quotes are ten times the yield in percent (41.50 => 4.15%).
pub const YIELD_SCALE: f64 = 10.0;

/// Separator between the fields of an instruments file line.
const FIELD_SEPARATOR: char = ';';

/// Position of an instrument in the signal.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum InstrumentRole {
    /// Equity index future (e.g. `ES=F`).
    Equity,
    /// Dollar index future (e.g. `DX=F`).
    Dollar,
    /// Ten-year treasury yield proxy (e.g. `^TNX`).
    Yield,
}

impl InstrumentRole {
    /// Divisor turning a raw quote of this role into its displayed value.
    pub fn display_scale(self) -> f64 {
        match self {
            InstrumentRole::Yield => YIELD_SCALE,
            _ => 1.0,
        }
    }
}

/// A tracked instrument: display name plus the identifier understood by the quote source.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Instrument {
    /// Role in the signal.
    pub role: InstrumentRole,
    /// Human readable name shown on the panels.
    pub display_name: String,
    /// Quote source symbol.
    pub symbol: String,
}

impl Instrument {
    /// Creates a new instrument.
    pub fn new(role: InstrumentRole, display_name: &str, symbol: &str) -> Self {
        Instrument {
            role,
            display_name: String::from(display_name),
            symbol: String::from(symbol),
        }
    }
}

/// The three instruments feeding the signal, one per role.
///
/// Built once at startup and injected into the orchestrator; it never changes
/// for the lifetime of the process.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstrumentSet {
    equity: Instrument,
    dollar: Instrument,
    yield_proxy: Instrument,
}

impl InstrumentSet {
    /// Builds a set from three instruments, checking each sits in its own role.
    pub fn new(
        equity: Instrument,
        dollar: Instrument,
        yield_proxy: Instrument,
    ) -> Result<Self, SemaphoreError> {
        for (instrument, expected) in [
            (&equity, InstrumentRole::Equity),
            (&dollar, InstrumentRole::Dollar),
            (&yield_proxy, InstrumentRole::Yield),
        ] {
            if instrument.role != expected {
                return Err(SemaphoreError::Format(format!(
                    "instrument {} has role {}, expected {}",
                    instrument.symbol, instrument.role, expected
                )));
            }
        }
        Ok(InstrumentSet {
            equity,
            dollar,
            yield_proxy,
        })
    }

    /// Instrument registered for `role`.
    pub fn get(&self, role: InstrumentRole) -> &Instrument {
        match role {
            InstrumentRole::Equity => &self.equity,
            InstrumentRole::Dollar => &self.dollar,
            InstrumentRole::Yield => &self.yield_proxy,
        }
    }

    /// Instruments in display order: equity, dollar, yield.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        [&self.equity, &self.dollar, &self.yield_proxy].into_iter()
    }
}

impl Default for InstrumentSet {
    fn default() -> Self {
        InstrumentSet {
            equity: Instrument::new(InstrumentRole::Equity, "S&P 500 Future (ES)", "ES=F"),
            dollar: Instrument::new(InstrumentRole::Dollar, "Dollar Index Future (DX)", "DX=F"),
            yield_proxy: Instrument::new(InstrumentRole::Yield, "US10Y Yield (^TNX)", "^TNX"),
        }
    }
}

/// Trait providing file parsing for instrument sets.
pub trait InstrumentSetParser {
    /// Parses an instrument set from a buffered reader.
    ///
    /// Each non-empty line not starting with `#` is `role;display name;symbol`.
    /// Every role must appear exactly once.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<InstrumentSet, SemaphoreError>;
}

impl InstrumentSetParser for InstrumentSet {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<InstrumentSet, SemaphoreError> {
        let mut equity = None;
        let mut dollar = None;
        let mut yield_proxy = None;

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(SemaphoreError::Io)?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            let instrument = parse_line(trimmed_line).map_err(|e| {
                SemaphoreError::ParseInstrumentsFile(format!("line {}: {}", index + 1, e))
            })?;
            let slot = match instrument.role {
                InstrumentRole::Equity => &mut equity,
                InstrumentRole::Dollar => &mut dollar,
                InstrumentRole::Yield => &mut yield_proxy,
            };
            if slot.is_some() {
                return Err(SemaphoreError::ParseInstrumentsFile(format!(
                    "line {}: duplicate role {}",
                    index + 1,
                    instrument.role
                )));
            }
            *slot = Some(instrument);
        }

        match (equity, dollar, yield_proxy) {
            (Some(equity), Some(dollar), Some(yield_proxy)) => {
                InstrumentSet::new(equity, dollar, yield_proxy)
            }
            _ => Err(SemaphoreError::ParseInstrumentsFile(String::from(
                "expected one instrument for each of equity, dollar and yield",
            ))),
        }
    }
}

fn parse_line(line: &str) -> Result<Instrument, String> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    let [role, display_name, symbol] = fields.as_slice() else {
        return Err(format!("expected `role;display name;symbol`, got `{}`", line));
    };
    if display_name.is_empty() || symbol.is_empty() {
        return Err(format!("empty display name or symbol in `{}`", line));
    }
    let role = role
        .parse::<InstrumentRole>()
        .map_err(|e| format!("unknown role `{}`: {}", role, e))?;
    Ok(Instrument::new(role, display_name, symbol))
}
