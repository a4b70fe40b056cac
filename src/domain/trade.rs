//! Simulated trade records.

use chrono::NaiveDate;
use serde::Serialize;

/// Moving averages observed on the entry day, kept for diagnostics. Absent
/// for strategies that trade on bar patterns alone.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    pub ma5: f64,
    pub ma10: f64,
    pub ma30: f64,
    pub vol_ma5: f64,
    pub vol_ma10: f64,
    pub vol_ma30: f64,
}

/// One completed FLAT -> OPEN -> FLAT cycle.
/// `profit = (sell_price - buy_price) / buy_price`.
#[derive(Debug, Clone, Serialize)]
pub struct Trade {
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub profit: f64,
    pub snapshot: Option<EntrySnapshot>,
}

impl Trade {
    pub fn new(
        buy_date: NaiveDate,
        buy_price: f64,
        sell_date: NaiveDate,
        sell_price: f64,
        snapshot: Option<EntrySnapshot>,
    ) -> Self {
        Trade {
            buy_date,
            buy_price,
            sell_date,
            sell_price,
            profit: (sell_price - buy_price) / buy_price,
            snapshot,
        }
    }
}

/// Flattened export row for the trade ledger.
#[derive(Debug, Clone, Serialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub name: String,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub profit: f64,
}

impl TradeRecord {
    pub fn from_trade(symbol: &str, name: &str, trade: &Trade) -> Self {
        TradeRecord {
            symbol: symbol.to_string(),
            name: name.to_string(),
            buy_date: trade.buy_date,
            buy_price: trade.buy_price,
            sell_date: trade.sell_date,
            sell_price: trade.sell_price,
            profit: trade.profit,
        }
    }
}
