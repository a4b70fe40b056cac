//! CSV trade-ledger adapter.

use crate::domain::backtest::BacktestReport;
use crate::domain::error::QuantscanError;
use crate::domain::trade::TradeRecord;
use crate::ports::report_port::ReportPort;
use std::path::Path;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write_ledger(&self, records: &[TradeRecord], path: &Path) -> Result<(), QuantscanError> {
        let mut writer = csv::Writer::from_path(path).map_err(|e| QuantscanError::Report {
            reason: format!("failed to open {}: {}", path.display(), e),
        })?;

        for record in records {
            writer
                .serialize(record)
                .map_err(|e| QuantscanError::Report {
                    reason: format!("CSV write error: {}", e),
                })?;
        }

        writer.flush().map_err(QuantscanError::Io)?;
        Ok(())
    }

    /// The ledger adapter flattens the report to its trade rows.
    fn write_report(&self, report: &BacktestReport, path: &Path) -> Result<(), QuantscanError> {
        let records: Vec<TradeRecord> = report
            .symbols
            .iter()
            .flat_map(|result| {
                result
                    .trades
                    .iter()
                    .map(|t| TradeRecord::from_trade(&result.symbol, &result.name, t))
            })
            .collect();

        self.write_ledger(&records, path)
    }
}
