//! Daily price-bar representation.

use crate::domain::error::QuantscanError;
use chrono::NaiveDate;
use serde::Serialize;

/// One trading day for a security. `pct_chg` is the day's percentage change
/// over `pre_close` (may be negative); `vol` and `amount` are the day's
/// traded volume and turnover.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBar {
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub pre_close: f64,
    pub pct_chg: f64,
    pub vol: f64,
    pub amount: f64,
}

impl PriceBar {
    /// Opening gap over the previous close, in percent:
    /// (open - prev_close) / prev_close * 100
    pub fn open_gap_pct(&self, prev_close: f64) -> f64 {
        (self.open - prev_close) / prev_close * 100.0
    }

    /// Whether the day closed at or above the limit-up threshold (percent).
    pub fn is_limit_up(&self, threshold: f64) -> bool {
        self.pct_chg >= threshold
    }
}

/// Check that trade dates are strictly increasing. Duplicate or backwards
/// dates indicate a corrupt series; the offending symbol is skipped upstream.
pub fn validate_series(symbol: &str, bars: &[PriceBar]) -> Result<(), QuantscanError> {
    for pair in bars.windows(2) {
        if pair[1].trade_date <= pair[0].trade_date {
            return Err(QuantscanError::NonMonotonicDates {
                symbol: symbol.to_string(),
                date: pair[1].trade_date,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> PriceBar {
        PriceBar {
            trade_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            open: 10.3,
            high: 10.8,
            low: 10.1,
            close: 10.6,
            pre_close: 10.0,
            pct_chg: 6.0,
            vol: 50_000.0,
            amount: 5.2e7,
        }
    }

    fn bar_on(date: NaiveDate) -> PriceBar {
        PriceBar {
            trade_date: date,
            ..sample_bar()
        }
    }

    #[test]
    fn open_gap_pct_basic() {
        let bar = sample_bar();
        // (10.3 - 10.0) / 10.0 * 100 = 3.0
        assert!((bar.open_gap_pct(10.0) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn open_gap_pct_negative() {
        let bar = sample_bar();
        assert!(bar.open_gap_pct(10.5) < 0.0);
    }

    #[test]
    fn limit_up_at_threshold() {
        let mut bar = sample_bar();
        bar.pct_chg = 9.9;
        assert!(bar.is_limit_up(9.9));
        bar.pct_chg = 9.89;
        assert!(!bar.is_limit_up(9.9));
    }

    #[test]
    fn validate_series_accepts_increasing_dates() {
        let bars = vec![
            bar_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
            bar_on(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
            bar_on(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()),
        ];
        assert!(validate_series("000001.SZ", &bars).is_ok());
    }

    #[test]
    fn validate_series_rejects_duplicate_date() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars = vec![bar_on(d), bar_on(d)];
        let err = validate_series("000001.SZ", &bars).unwrap_err();
        assert!(matches!(
            err,
            QuantscanError::NonMonotonicDates { symbol, date }
                if symbol == "000001.SZ" && date == d
        ));
    }

    #[test]
    fn validate_series_rejects_backwards_date() {
        let bars = vec![
            bar_on(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            bar_on(NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()),
        ];
        assert!(validate_series("000001.SZ", &bars).is_err());
    }

    #[test]
    fn validate_series_empty_and_single() {
        assert!(validate_series("000001.SZ", &[]).is_ok());
        assert!(validate_series("000001.SZ", &[sample_bar()]).is_ok());
    }
}
