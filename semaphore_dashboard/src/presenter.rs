//! Rendering of display models.
//!
//! `TextPresenter` draws the operator view: the state banner, one numeric panel
//! per instrument, a sparkline chart per series and the legend of every state.
//! `JsonPresenter` writes the model as one JSON document per refresh.
use std::io::Write;

use chrono::DateTime;
use semaphore_common::signal::SignalState;
use semaphore_common::{DisplayModel, InstrumentPanel, InstrumentRole, PricePoint, Result};
use strum::IntoEnumIterator;

/// Placeholder for values that could not be read.
const MISSING: &str = "—";
/// Sparkline glyphs from lowest to highest.
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
/// Maximum number of glyphs in a sparkline.
const CHART_WIDTH: usize = 48;

/// Sink for display models.
pub trait Presenter {
    /// Draws one refresh.
    fn render(&mut self, model: &DisplayModel) -> Result<()>;
}

/// Human readable terminal view.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the presenter and returns the writer.
    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, model: &DisplayModel) -> Result<()> {
        let out = &mut self.out;
        let signal = &model.signal;

        writeln!(out, "🚦 Tactical Semaphore ({})", fmt_time(model.refreshed_at_ms))?;
        writeln!(out, "Status: {}", signal.label)?;
        writeln!(out, "{}", signal.rationale)?;
        writeln!(out, "  {}", signal.index_advisory)?;
        writeln!(out, "  {}", signal.dollar_advisory)?;
        writeln!(out)?;

        for panel in &model.panels {
            writeln!(
                out,
                "{:<28} {:<8} {:>14} {:>9}",
                panel.display_name,
                panel.symbol,
                fmt_value(panel),
                fmt_pct(panel.percent_change)
            )?;
        }
        writeln!(out)?;

        for panel in &model.panels {
            writeln!(out, "{:<8} 1d {}", panel.symbol, chart_line(&panel.series))?;
            if !panel.history.is_empty() {
                writeln!(out, "{:<8} 3d {}", panel.symbol, chart_line(&panel.history))?;
            }
        }
        writeln!(out)?;

        writeln!(out, "Legend")?;
        for state in SignalState::iter() {
            let profile = state.profile();
            writeln!(
                out,
                "- {} ({}) → {} | {}",
                profile.label,
                state.pattern(),
                profile.index_advisory,
                profile.dollar_advisory
            )?;
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Machine readable view: one JSON object per line.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the presenter and returns the writer.
    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn render(&mut self, model: &DisplayModel) -> Result<()> {
        serde_json::to_writer(&mut self.out, model)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

fn fmt_value(panel: &InstrumentPanel) -> String {
    match (panel.role, panel.display_value) {
        (_, None) => String::from(MISSING),
        (InstrumentRole::Yield, Some(v)) => format!("{:.2}%", v),
        (_, Some(v)) => fmt_num(v, 4),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.2}%", v),
        None => String::from(MISSING),
    }
}

/// Fixed-point number with `,` thousands separators.
fn fmt_num(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::from(MISSING);
    }
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    if value.is_sign_negative() && value != 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn fmt_time(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| String::from(MISSING))
}

fn chart_line(series: &[PricePoint]) -> String {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return String::from("no data");
    };
    format!(
        "{} {} → {} ({} – {})",
        sparkline(series, CHART_WIDTH),
        fmt_num(first.price, 2),
        fmt_num(last.price, 2),
        fmt_clock(first.timestamp_ms),
        fmt_clock(last.timestamp_ms)
    )
}

fn fmt_clock(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%d/%m %H:%M").to_string())
        .unwrap_or_else(|| String::from(MISSING))
}

/// Draws at most `width` glyphs, sampling the series evenly.
fn sparkline(series: &[PricePoint], width: usize) -> String {
    if series.is_empty() || width == 0 {
        return String::new();
    }
    let count = series.len().min(width);
    let sampled: Vec<f64> = (0..count)
        .map(|i| {
            let index = if count == 1 { 0 } else { i * (series.len() - 1) / (count - 1) };
            series[index].price
        })
        .collect();

    let min = sampled.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    sampled
        .iter()
        .map(|v| {
            if span <= 0.0 {
                return BARS[BARS.len() / 2];
            }
            let level = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
            BARS[level.min(BARS.len() - 1)]
        })
        .collect()
}
