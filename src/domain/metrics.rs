//! Outcome statistics and aggregation.
//!
//! Per-symbol results reduce into the overall report by exact integer
//! addition, so aggregation is associative and commutative: any partition
//! of the universe into sub-batches sums to the same totals.

use crate::domain::trade::Trade;
use serde::Serialize;

/// Half-open profit bins on the profit fraction. A trade lands in exactly
/// one bin; profit of exactly 0 counts as `gain_0_3`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfitBuckets {
    /// [0, 0.03)
    pub gain_0_3: u64,
    /// [0.03, 0.05)
    pub gain_3_5: u64,
    /// [0.05, 0.10)
    pub gain_5_10: u64,
    /// [0.10, inf)
    pub gain_10_plus: u64,
    /// [-0.03, 0)
    pub loss_0_3: u64,
    /// [-0.05, -0.03)
    pub loss_3_5: u64,
    /// [-0.10, -0.05)
    pub loss_5_10: u64,
    /// (-inf, -0.10)
    pub loss_10_plus: u64,
}

impl ProfitBuckets {
    pub fn record(&mut self, profit: f64) {
        if (0.0..0.03).contains(&profit) {
            self.gain_0_3 += 1;
        } else if (0.03..0.05).contains(&profit) {
            self.gain_3_5 += 1;
        } else if (0.05..0.10).contains(&profit) {
            self.gain_5_10 += 1;
        } else if profit >= 0.10 {
            self.gain_10_plus += 1;
        } else if (-0.03..0.0).contains(&profit) {
            self.loss_0_3 += 1;
        } else if (-0.05..-0.03).contains(&profit) {
            self.loss_3_5 += 1;
        } else if (-0.10..-0.05).contains(&profit) {
            self.loss_5_10 += 1;
        } else {
            self.loss_10_plus += 1;
        }
    }

    pub fn merge(&mut self, other: &ProfitBuckets) {
        self.gain_0_3 += other.gain_0_3;
        self.gain_3_5 += other.gain_3_5;
        self.gain_5_10 += other.gain_5_10;
        self.gain_10_plus += other.gain_10_plus;
        self.loss_0_3 += other.loss_0_3;
        self.loss_3_5 += other.loss_3_5;
        self.loss_5_10 += other.loss_5_10;
        self.loss_10_plus += other.loss_10_plus;
    }

    pub fn total(&self) -> u64 {
        self.gain_0_3
            + self.gain_3_5
            + self.gain_5_10
            + self.gain_10_plus
            + self.loss_0_3
            + self.loss_3_5
            + self.loss_5_10
            + self.loss_10_plus
    }
}

/// Completed simulation outcome for one symbol.
///
/// Wins are trades with profit > 0, losses profit < 0; break-even trades
/// count toward the total only, so per-symbol counters sum exactly to the
/// overall report.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolResult {
    pub symbol: String,
    pub name: String,
    pub trades: Vec<Trade>,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub profit_loss_ratio: String,
    pub buckets: ProfitBuckets,
}

impl SymbolResult {
    pub fn from_trades(symbol: String, name: String, trades: Vec<Trade>) -> Self {
        let total_trades = trades.len();
        let wins = trades.iter().filter(|t| t.profit > 0.0).count();
        let losses = trades.iter().filter(|t| t.profit < 0.0).count();

        let win_rate = if total_trades > 0 {
            wins as f64 / total_trades as f64
        } else {
            0.0
        };

        let mut buckets = ProfitBuckets::default();
        for trade in &trades {
            buckets.record(trade.profit);
        }

        SymbolResult {
            symbol,
            name,
            trades,
            total_trades,
            wins,
            losses,
            win_rate,
            profit_loss_ratio: format!("{}:{}", wins, losses),
            buckets,
        }
    }
}

/// Blended outcome across every symbol that completed.
#[derive(Debug, Clone, Serialize)]
pub struct OverallReport {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub profit_loss_ratio: String,
    pub buckets: ProfitBuckets,
    pub symbols_completed: usize,
    pub symbols_failed: usize,
}

pub fn aggregate(results: &[SymbolResult]) -> OverallReport {
    let mut total_trades = 0usize;
    let mut wins = 0usize;
    let mut losses = 0usize;
    let mut buckets = ProfitBuckets::default();

    for result in results {
        total_trades += result.total_trades;
        wins += result.wins;
        losses += result.losses;
        buckets.merge(&result.buckets);
    }

    let win_rate = if total_trades > 0 {
        wins as f64 / total_trades as f64
    } else {
        0.0
    };

    OverallReport {
        total_trades,
        wins,
        losses,
        win_rate,
        profit_loss_ratio: format!("{}:{}", wins, losses),
        buckets,
        symbols_completed: results.len(),
        symbols_failed: 0,
    }
}
