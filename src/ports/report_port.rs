//! Report output port trait.

use crate::domain::backtest::BacktestReport;
use crate::domain::error::QuantscanError;
use crate::domain::trade::TradeRecord;
use std::path::Path;

/// Sink for backtest output: the flat trade ledger and the structured
/// per-symbol/overall report.
pub trait ReportPort {
    fn write_ledger(&self, records: &[TradeRecord], path: &Path) -> Result<(), QuantscanError>;

    fn write_report(&self, report: &BacktestReport, path: &Path) -> Result<(), QuantscanError>;
}
