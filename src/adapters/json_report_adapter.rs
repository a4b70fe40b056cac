//! JSON report adapter.

use crate::domain::backtest::BacktestReport;
use crate::domain::error::QuantscanError;
use crate::domain::trade::TradeRecord;
use crate::ports::report_port::ReportPort;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn write_ledger(&self, records: &[TradeRecord], path: &Path) -> Result<(), QuantscanError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), records).map_err(|e| {
            QuantscanError::Report {
                reason: format!("JSON write error: {}", e),
            }
        })
    }

    fn write_report(&self, report: &BacktestReport, path: &Path) -> Result<(), QuantscanError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), report).map_err(|e| {
            QuantscanError::Report {
                reason: format!("JSON write error: {}", e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{aggregate, SymbolResult};
    use crate::domain::trade::Trade;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_report() -> BacktestReport {
        let buy_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let trade = Trade::new(
            buy_date,
            10.0,
            buy_date + chrono::Duration::days(3),
            10.5,
            None,
        );
        let symbols = vec![SymbolResult::from_trades(
            "000001.SZ".into(),
            "Ping An Bank".into(),
            vec![trade],
        )];
        let overall = aggregate(&symbols);
        BacktestReport {
            overall,
            symbols,
            skipped: vec![],
        }
    }

    #[test]
    fn report_serializes_with_summary_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        JsonReportAdapter.write_report(&sample_report(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["overall"]["total_trades"], 1);
        assert_eq!(value["overall"]["profit_loss_ratio"], "1:0");
        assert_eq!(value["symbols"][0]["symbol"], "000001.SZ");
        assert_eq!(value["symbols"][0]["buckets"]["gain_5_10"], 1);
    }

    #[test]
    fn ledger_serializes_as_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trades.json");

        let buy_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let records = vec![TradeRecord {
            symbol: "000001.SZ".into(),
            name: "Ping An Bank".into(),
            buy_date,
            buy_price: 10.0,
            sell_date: buy_date + chrono::Duration::days(3),
            sell_price: 10.5,
            profit: 0.05,
        }];

        JsonReportAdapter.write_ledger(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["buy_date"], "2024-01-02");
    }
}
