//! Backtest orchestration.
//!
//! Fans one independent task per symbol out to a bounded pool of worker
//! threads. Each task owns its own fetched series; the only shared state is
//! the work cursor, the progress counter, and the results channel. Failures
//! are isolated per symbol and never abort sibling tasks. Collection order
//! is irrelevant: results are sorted by symbol and reduced with a
//! commutative merge, so the report is identical for any pool size.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::bar::validate_series;
use crate::domain::error::QuantscanError;
use crate::domain::indicator::IndicatorFrame;
use crate::domain::metrics::{aggregate, OverallReport, SymbolResult};
use crate::domain::scan::simulate;
use crate::domain::strategy::Strategy;
use crate::domain::universe::SymbolInfo;
use crate::ports::data_port::DataPort;

pub const DEFAULT_WORKERS: usize = 8;

#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub strategy: Strategy,
    pub workers: usize,
}

impl BacktestConfig {
    pub fn new(strategy: Strategy) -> Self {
        BacktestConfig {
            strategy,
            workers: DEFAULT_WORKERS,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// A symbol excluded from aggregation after a per-task failure.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BacktestReport {
    pub overall: OverallReport,
    pub symbols: Vec<SymbolResult>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Fetch, validate, and simulate one symbol. A short or empty history is a
/// valid zero-trade result; fetch errors and corrupt series are failures
/// for this symbol only.
pub fn process_symbol(
    data_port: &dyn DataPort,
    info: &SymbolInfo,
    strategy: &Strategy,
) -> Result<SymbolResult, QuantscanError> {
    let bars = data_port.fetch_series(&info.symbol)?;
    validate_series(&info.symbol, &bars)?;

    let frame = IndicatorFrame::compute(&bars);
    let trades = simulate(&bars, &frame, strategy);

    Ok(SymbolResult::from_trades(
        info.symbol.clone(),
        info.name.clone(),
        trades,
    ))
}

/// Run the strategy over every symbol with a fixed-size worker pool.
///
/// The caller applies universe filtering beforehand and may abort the run
/// through `cancel`; workers re-check it before claiming the next symbol,
/// and symbols already finished are never double-counted.
pub fn run_backtest(
    data_port: &(dyn DataPort + Sync),
    symbols: &[SymbolInfo],
    config: &BacktestConfig,
    cancel: &AtomicBool,
) -> BacktestReport {
    let total = symbols.len();
    let workers = config.workers.clamp(1, total.max(1));
    let cursor = AtomicUsize::new(0);
    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    info!(symbols = total, workers, strategy = config.strategy.name(), "starting backtest");

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            let completed = &completed;
            let strategy = &config.strategy;
            scope.spawn(move || loop {
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                let idx = cursor.fetch_add(1, Ordering::Relaxed);
                if idx >= total {
                    break;
                }

                let symbol_info = &symbols[idx];
                let outcome = process_symbol(data_port, symbol_info, strategy);
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(symbol = %symbol_info.symbol, done, total, "symbol finished");

                if tx.send((symbol_info.symbol.clone(), outcome)).is_err() {
                    break;
                }
            });
        }
        drop(tx);
    });

    let mut results = Vec::new();
    let mut skipped = Vec::new();
    for (symbol, outcome) in rx {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "skipping symbol");
                skipped.push(SkippedSymbol {
                    symbol,
                    reason: e.to_string(),
                });
            }
        }
    }

    // Collection order depends on scheduling; the report must not.
    results.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    skipped.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let mut overall = aggregate(&results);
    overall.symbols_failed = skipped.len();

    info!(
        completed = results.len(),
        skipped = skipped.len(),
        "backtest finished"
    );

    BacktestReport {
        overall,
        symbols: results,
        skipped,
    }
}
