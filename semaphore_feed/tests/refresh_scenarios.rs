mod common;

use common::{MockSource, series};
use semaphore_common::{FetchError, InstrumentRole, InstrumentSet, Sampling, SignalState};
use semaphore_common::signal::NO_ADVISORY;
use semaphore_feed::Orchestrator;

fn orchestrator(source: MockSource) -> Orchestrator<MockSource> {
    Orchestrator::new(source, InstrumentSet::default())
}

#[test]
fn risk_on_session_is_green() {
    let source = MockSource::new()
        .with_move("ES=F", 4480.0, 4500.0)
        .with_move("DX=F", 104.5, 104.0)
        .with_move("^TNX", 41.5, 41.0);

    let model = orchestrator(source).refresh();

    assert_eq!(model.state(), SignalState::Green);
    let es = model.panel(InstrumentRole::Equity).unwrap();
    assert!((es.percent_change.unwrap() - 0.446).abs() < 1e-3);
    let dx = model.panel(InstrumentRole::Dollar).unwrap();
    assert!((dx.percent_change.unwrap() + 0.478).abs() < 1e-3);
    let tnx = model.panel(InstrumentRole::Yield).unwrap();
    assert!((tnx.percent_change.unwrap() + 1.205).abs() < 1e-3);
    assert_eq!(tnx.last, Some(41.0));
    assert_eq!(tnx.display_value, Some(4.1));
}

#[test]
fn risk_off_session_is_red() {
    let source = MockSource::new()
        .with_pct("ES=F", -0.3)
        .with_pct("DX=F", 0.2)
        .with_pct("^TNX", 0.05);

    assert_eq!(orchestrator(source).refresh().state(), SignalState::Red);
}

#[test]
fn all_up_with_flat_yield_is_orange() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.1)
        .with_pct("DX=F", 0.1)
        .with_move("^TNX", 42.0, 42.0);

    let model = orchestrator(source).refresh();
    assert_eq!(model.state(), SignalState::Orange);
    assert_eq!(model.panel(InstrumentRole::Yield).unwrap().percent_change, Some(0.0));
}

#[test]
fn failed_dollar_fetch_is_neutral() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.2)
        .with_error("DX=F", Sampling::INTRADAY, FetchError::Unavailable(String::from("timeout")))
        .with_pct("^TNX", -0.1);

    let model = orchestrator(source).refresh();

    assert_eq!(model.state(), SignalState::Neutral);
    assert_eq!(model.signal.index_advisory, NO_ADVISORY);
    assert_eq!(model.signal.dollar_advisory, NO_ADVISORY);

    let dx = model.panel(InstrumentRole::Dollar).unwrap();
    assert_eq!(dx.last, None);
    assert_eq!(dx.percent_change, None);
    assert!(dx.series.is_empty());

    let es = model.panel(InstrumentRole::Equity).unwrap();
    assert!(es.percent_change.unwrap() > 0.0);
    assert_eq!(es.series.len(), 2);
}

#[test]
fn panicking_source_only_loses_its_instrument() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.3)
        .with_panic("DX=F")
        .with_pct("^TNX", -0.2);
    let orchestrator = orchestrator(source);

    let model = orchestrator.refresh();

    assert_eq!(model.state(), SignalState::Neutral);
    assert_eq!(model.panels.len(), 3);
    assert_eq!(model.panel(InstrumentRole::Dollar).unwrap().percent_change, None);
    assert!(model.panel(InstrumentRole::Equity).unwrap().percent_change.unwrap() > 0.0);
    assert!(model.panel(InstrumentRole::Yield).unwrap().percent_change.unwrap() < 0.0);

    // The next refresh still runs against the same source.
    orchestrator.refresh();
    assert_eq!(instrument_calls(&orchestrator, "DX=F"), 2);
}

#[test]
fn empty_series_counts_as_missing_not_zero() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.1)
        .with_pct("DX=F", 0.1)
        .with_series("^TNX", Sampling::INTRADAY, Vec::new());

    let model = orchestrator(source).refresh();
    assert_eq!(model.state(), SignalState::Neutral);
    assert_eq!(model.panel(InstrumentRole::Yield).unwrap().percent_change, None);
}

#[test]
fn zero_reference_is_flat_not_missing() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.1)
        .with_pct("DX=F", 0.1)
        .with_move("^TNX", 0.0, 41.0);

    let model = orchestrator(source).refresh();
    assert_eq!(model.panel(InstrumentRole::Yield).unwrap().percent_change, Some(0.0));
    assert_eq!(model.state(), SignalState::Orange);
}

#[test]
fn no_data_answer_degrades_like_a_failure() {
    let source = MockSource::new()
        .with_error("ES=F", Sampling::INTRADAY, FetchError::NoData)
        .with_pct("DX=F", -0.1)
        .with_pct("^TNX", -0.1);

    assert_eq!(orchestrator(source).refresh().state(), SignalState::Neutral);
}

#[test]
fn panels_follow_instrument_order() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.2)
        .with_pct("DX=F", 0.1)
        .with_pct("^TNX", -0.4);

    let model = orchestrator(source).refresh();
    let roles: Vec<InstrumentRole> = model.panels.iter().map(|p| p.role).collect();
    assert_eq!(
        roles,
        vec![InstrumentRole::Equity, InstrumentRole::Dollar, InstrumentRole::Yield]
    );
    assert_eq!(model.state(), SignalState::Yellow);
}

#[test]
fn history_is_fetched_only_when_enabled() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.2)
        .with_pct("DX=F", -0.1)
        .with_pct("^TNX", -0.4)
        .with_series("^TNX", Sampling::HISTORY, series(&[40.0, 41.0, 42.0]));

    let plain = orchestrator(source);
    let model = plain.refresh();
    assert_eq!(model.state(), SignalState::Green);
    assert!(model.panels.iter().all(|p| p.history.is_empty()));

    let source = MockSource::new()
        .with_pct("ES=F", 0.2)
        .with_pct("DX=F", -0.1)
        .with_pct("^TNX", -0.4)
        .with_series("^TNX", Sampling::HISTORY, series(&[40.0, 41.0, 42.0]));
    let with_history = orchestrator(source).with_history(true);
    let model = with_history.refresh();

    // History failures for ES/DX only blank their charts.
    assert_eq!(model.state(), SignalState::Green);
    let tnx = model.panel(InstrumentRole::Yield).unwrap();
    let history: Vec<f64> = tnx.history.iter().map(|p| p.price).collect();
    assert_eq!(history, vec![4.0, 4.1, 4.2]);
    assert!(model.panel(InstrumentRole::Equity).unwrap().history.is_empty());
}

#[test]
fn every_instrument_is_fetched_once_per_refresh() {
    let source = MockSource::new()
        .with_pct("ES=F", 0.2)
        .with_pct("DX=F", -0.1)
        .with_pct("^TNX", -0.4);
    let orchestrator = orchestrator(source);

    orchestrator.refresh();
    orchestrator.refresh();

    for instrument in orchestrator.instruments().iter() {
        assert_eq!(instrument_calls(&orchestrator, &instrument.symbol), 2);
    }
}

fn instrument_calls(orchestrator: &Orchestrator<MockSource>, symbol: &str) -> usize {
    orchestrator.source().calls_for(symbol)
}
