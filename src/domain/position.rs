//! Per-symbol simulation position state.

use crate::domain::trade::EntrySnapshot;
use chrono::NaiveDate;

/// Scan state: no holding, or one active simulated long position.
#[derive(Debug, Clone)]
pub enum Position {
    Flat,
    Open(OpenPosition),
}

/// Live position state during a scan. `peak_price` starts at the entry
/// price and only ever increases.
#[derive(Debug, Clone)]
pub struct OpenPosition {
    pub entry_price: f64,
    pub entry_date: NaiveDate,
    pub peak_price: f64,
    pub snapshot: Option<EntrySnapshot>,
}

impl OpenPosition {
    pub fn new(entry_price: f64, entry_date: NaiveDate, snapshot: Option<EntrySnapshot>) -> Self {
        OpenPosition {
            entry_price,
            entry_date,
            peak_price: entry_price,
            snapshot,
        }
    }

    /// Record a new close; the peak never decreases.
    pub fn update_peak(&mut self, close: f64) {
        if close > self.peak_price {
            self.peak_price = close;
        }
    }

    /// Fractional profit at `close`: (close - entry) / entry.
    pub fn profit(&self, close: f64) -> f64 {
        (close - self.entry_price) / self.entry_price
    }

    /// Fractional decline from the running peak.
    pub fn drawdown(&self, close: f64) -> f64 {
        if self.peak_price > 0.0 {
            (self.peak_price - close) / self.peak_price
        } else {
            0.0
        }
    }
}
