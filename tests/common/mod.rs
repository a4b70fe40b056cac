#![allow(dead_code)]

use chrono::NaiveDate;
use quantscan::domain::bar::PriceBar;
use quantscan::domain::error::QuantscanError;
use quantscan::domain::universe::SymbolInfo;
use quantscan::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<PriceBar>, QuantscanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuantscanError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<SymbolInfo>, QuantscanError> {
        let mut symbols: Vec<SymbolInfo> = self
            .data
            .keys()
            .map(|symbol| SymbolInfo {
                symbol: symbol.clone(),
                name: format!("{} Co", symbol),
                list_date: None,
            })
            .collect();
        symbols.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantscanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(QuantscanError::Database {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => Ok(Some((
                bars[0].trade_date,
                bars[bars.len() - 1].trade_date,
                bars.len(),
            ))),
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn day(i: usize) -> NaiveDate {
    date(2024, 1, 1) + chrono::Duration::days(i as i64)
}

pub fn info(symbol: &str, name: &str) -> SymbolInfo {
    SymbolInfo {
        symbol: symbol.to_string(),
        name: name.to_string(),
        list_date: None,
    }
}

pub fn make_bar(i: usize, open: f64, close: f64, pct_chg: f64, vol: f64) -> PriceBar {
    PriceBar {
        trade_date: day(i),
        open,
        high: open.max(close) + 0.5,
        low: open.min(close) - 0.5,
        close,
        pre_close: close / (1.0 + pct_chg / 100.0),
        pct_chg,
        vol,
        amount: close * vol,
    }
}

/// Steadily rising closes (step 3 from 100) with a volume spike to twice
/// the 10-day average at `spike_at`. With the default trend parameters this
/// opens at index 30 and takes profit at index 43 when long enough.
pub fn trending_bars(count: usize, spike_at: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let close = 100.0 + 3.0 * i as f64;
            let vol = if i == spike_at { 2000.0 } else { 1000.0 };
            make_bar(i, close - 1.0, close, 3.0, vol)
        })
        .collect()
}

/// A first limit-up at index 1 followed by a 2% opening gap at index 2:
/// with the default parameters, one trade buying open[2], selling open[3].
pub fn limit_up_bars() -> Vec<PriceBar> {
    vec![
        make_bar(0, 10.0, 10.0, 2.0, 1000.0),
        make_bar(1, 10.1, 11.0, 10.0, 1000.0),
        make_bar(2, 11.22, 11.5, 4.5, 1000.0),
        make_bar(3, 11.8, 11.6, 0.9, 1000.0),
        make_bar(4, 11.4, 11.2, -3.4, 1000.0),
    ]
}
