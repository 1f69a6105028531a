//! Display model handed to presenters after every refresh.

use serde::Serialize;

use crate::instruments::{Instrument, InstrumentRole};
use crate::signal::{Signal, SignalState};
use crate::snapshot::{PricePoint, QuoteSnapshot};

/// Numeric panel and chart data for one instrument.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InstrumentPanel {
    /// Role in the signal.
    pub role: InstrumentRole,
    /// Name shown above the panel.
    pub display_name: String,
    /// Quote source symbol.
    pub symbol: String,
    /// Latest raw price.
    pub last: Option<f64>,
    /// Intraday percent change on raw units.
    pub percent_change: Option<f64>,
    /// `last` in display units (yield in percent for the yield proxy).
    pub display_value: Option<f64>,
    /// Intraday chart in display units.
    pub series: Vec<PricePoint>,
    /// Multi-day chart in display units; empty when history is off or unavailable.
    pub history: Vec<PricePoint>,
}

impl InstrumentPanel {
    /// Builds the panel of `instrument` from its intraday and history snapshots.
    pub fn new(instrument: &Instrument, intraday: &QuoteSnapshot, history: &QuoteSnapshot) -> Self {
        let scale = instrument.role.display_scale();
        InstrumentPanel {
            role: instrument.role,
            display_name: instrument.display_name.clone(),
            symbol: instrument.symbol.clone(),
            last: intraday.last(),
            percent_change: intraday.percent_change(),
            display_value: intraday.display_value(scale),
            series: intraday.scaled_series(scale),
            history: history.scaled_series(scale),
        }
    }
}

/// Everything a presenter needs to draw one refresh.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayModel {
    /// Classification of the three percent changes.
    pub signal: Signal,
    /// UTC timestamp of the refresh in milliseconds since Unix epoch.
    pub refreshed_at_ms: i64,
    /// One panel per instrument, in equity, dollar, yield order.
    pub panels: Vec<InstrumentPanel>,
}

impl DisplayModel {
    /// Classified state.
    pub fn state(&self) -> SignalState {
        self.signal.state
    }

    /// Panel for `role`, if present.
    pub fn panel(&self, role: InstrumentRole) -> Option<&InstrumentPanel> {
        self.panels.iter().find(|p| p.role == role)
    }
}
