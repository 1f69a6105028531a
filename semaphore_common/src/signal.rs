//! Signal states and the classifier.
//!
//! `classify` maps the intraday percent changes of the equity future, the
//! dollar future and the yield proxy to one of six states. The rules are
//! evaluated in a fixed priority order and the first match wins:
//!
//! | state    | equity | dollar | yield |
//! |----------|--------|--------|-------|
//! | `Green`  | `> 0`  | `< 0`  | `< 0` |
//! | `Red`    | `< 0`  | `> 0`  | `> 0` |
//! | `Orange` | `> 0`  | `> 0`  | `>= 0`|
//! | `Purple` | `< 0`  | `< 0`  | `<= 0`|
//! | `Yellow` | otherwise |        |       |
//!
//! A missing reading on any leg gives `Neutral`. Rationale and advisories are
//! looked up from a static table keyed by the state.

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Placeholder advisory used when no reading is available.
pub const NO_ADVISORY: &str = "—";

/// Discrete classification of the joint momentum of the three instruments.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Display,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
pub enum SignalState {
    /// Equity up, dollar and yield down: classic risk-on.
    Green,
    /// Equity down, dollar and yield up: risk aversion.
    Red,
    /// Everything up: strong dollar/yields cap the equity move.
    Orange,
    /// Everything down: crossed reading.
    Purple,
    /// Mixed signals.
    Yellow,
    /// At least one reading is missing.
    Neutral,
}

/// Static texts attached to a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateProfile {
    /// Banner label.
    pub label: &'static str,
    /// Why the market reads this way.
    pub rationale: &'static str,
    /// Bias for the mini-index future (WIN).
    pub index_advisory: &'static str,
    /// Bias for the mini-dollar future (WDO).
    pub dollar_advisory: &'static str,
}

const GREEN: StateProfile = StateProfile {
    label: "🟢 Green",
    rationale: "ES↑, DX↓, US10Y↓ → classic risk-on.",
    index_advisory: "WIN↑ (buys favored; breakouts with VWAP/EMA9 aligned)",
    dollar_advisory: "WDO↓ (sells favored; lost supports with EMA9<VWAP)",
};

const RED: StateProfile = StateProfile {
    label: "🔴 Red",
    rationale: "ES↓, DX↑, US10Y↑ → risk aversion.",
    index_advisory: "WIN↓ (sells favored; pullbacks up to VWAP)",
    dollar_advisory: "WDO↑ (buys favored; resistance breakouts)",
};

const ORANGE: StateProfile = StateProfile {
    label: "🟠 Orange",
    rationale: "ES↑, DX↑, US10Y↑ → strong dollar/yields cancel part of the S&P rally.",
    index_advisory: "WIN neutral/limited (wait for confirmation; failures at highs are common)",
    dollar_advisory: "WDO↑ (more consistent uptrend)",
};

const PURPLE: StateProfile = StateProfile {
    label: "🟣 Purple",
    rationale: "ES↓, DX↓, US10Y↓ → crossed signals (stocks fall while dollar/rates ease).",
    index_advisory: "WIN needs confirmation (the drop may lose traction if DXY/UST ease)",
    dollar_advisory: "WDO↓ (bearish pressure may dominate)",
};

const YELLOW: StateProfile = StateProfile {
    label: "🟡 Yellow",
    rationale: "Mixed signals: favor range trades; let VWAP/EMA9 decide.",
    index_advisory: "WIN: trade the range / mean reversion around VWAP",
    dollar_advisory: "WDO: same; use DXY/US10Y as a filter",
};

const NEUTRAL: StateProfile = StateProfile {
    label: "⚪ Neutral",
    rationale: "Incomplete data: waiting for quotes.",
    index_advisory: NO_ADVISORY,
    dollar_advisory: NO_ADVISORY,
};

impl SignalState {
    /// Static texts for this state.
    pub fn profile(self) -> &'static StateProfile {
        match self {
            SignalState::Green => &GREEN,
            SignalState::Red => &RED,
            SignalState::Orange => &ORANGE,
            SignalState::Purple => &PURPLE,
            SignalState::Yellow => &YELLOW,
            SignalState::Neutral => &NEUTRAL,
        }
    }

    /// Which instrument moves define this state, for legends.
    pub fn pattern(self) -> &'static str {
        match self {
            SignalState::Green => "ES↑, DXY↓, US10Y↓",
            SignalState::Red => "ES↓, DXY↑, US10Y↑",
            SignalState::Orange => "all up: ES↑, DXY↑, US10Y↑",
            SignalState::Purple => "all down: ES↓, DXY↓, US10Y↓",
            SignalState::Yellow => "mixed",
            SignalState::Neutral => "missing quotes",
        }
    }
}

/// Result of a classification: the state plus its texts.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Signal {
    /// Classified state.
    pub state: SignalState,
    /// Banner label.
    pub label: &'static str,
    /// Human readable rationale.
    pub rationale: &'static str,
    /// Bias for the mini-index future.
    pub index_advisory: &'static str,
    /// Bias for the mini-dollar future.
    pub dollar_advisory: &'static str,
}

impl From<SignalState> for Signal {
    fn from(state: SignalState) -> Self {
        let profile = state.profile();
        Signal {
            state,
            label: profile.label,
            rationale: profile.rationale,
            index_advisory: profile.index_advisory,
            dollar_advisory: profile.dollar_advisory,
        }
    }
}

/// Classifies the joint move of equity, dollar and yield percent changes.
pub fn classify(
    equity_pct: Option<f64>,
    dollar_pct: Option<f64>,
    yield_pct: Option<f64>,
) -> Signal {
    let (Some(e), Some(d), Some(y)) = (equity_pct, dollar_pct, yield_pct) else {
        return Signal::from(SignalState::Neutral);
    };
    Signal::from(classify_state(e, d, y))
}

fn classify_state(e: f64, d: f64, y: f64) -> SignalState {
    if e > 0.0 && d < 0.0 && y < 0.0 {
        SignalState::Green
    } else if e < 0.0 && d > 0.0 && y > 0.0 {
        SignalState::Red
    } else if e > 0.0 && d > 0.0 && y >= 0.0 {
        // Flat yield sides with "all up".
        SignalState::Orange
    } else if e < 0.0 && d < 0.0 && y <= 0.0 {
        SignalState::Purple
    } else {
        SignalState::Yellow
    }
}
