//! Strategy configuration.
//!
//! A strategy is a tagged variant: the trend/momentum rule set driven by
//! moving averages and MACD, or the single-bar first-limit-up pattern. The
//! scan engine is parameterized by the variant rather than duplicated per
//! strategy.

/// Trend-following entry/exit thresholds. Profit quantities are fractions
/// (0.03 = 3%); `max_pct_chg` and the gap bounds are percentages, matching
/// the bar fields they compare against.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendMomentumParams {
    /// Entry requires vol > volume_surge * vol_ma10.
    pub volume_surge: f64,
    /// Entry requires the day's pct_chg below this (skip extended moves).
    pub max_pct_chg: f64,
    /// Exit when profit <= stop_loss.
    pub stop_loss: f64,
    /// Exit when profit >= take_profit.
    pub take_profit: f64,
    /// Exit when the decline from the running peak exceeds this fraction.
    pub max_drawdown: f64,
}

impl Default for TrendMomentumParams {
    fn default() -> Self {
        TrendMomentumParams {
            volume_surge: 1.5,
            max_pct_chg: 5.0,
            stop_loss: -0.03,
            take_profit: 0.20,
            max_drawdown: 0.03,
        }
    }
}

/// First-limit-up gap parameters. Entry on the day after a first limit-up
/// close, when the open gaps up within [min_gap_pct, max_gap_pct]; exit
/// unconditionally at the next day's open.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstLimitUpParams {
    pub limit_threshold: f64,
    pub min_gap_pct: f64,
    pub max_gap_pct: f64,
}

impl Default for FirstLimitUpParams {
    fn default() -> Self {
        FirstLimitUpParams {
            limit_threshold: 9.9,
            min_gap_pct: 0.0,
            max_gap_pct: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    TrendMomentum(TrendMomentumParams),
    FirstLimitUp(FirstLimitUpParams),
}

impl Strategy {
    /// First bar index at which every input the variant consults is defined.
    pub fn min_lookback(&self) -> usize {
        match self {
            // ma30 needs 30 prior bars.
            Strategy::TrendMomentum(_) => 30,
            // Needs the two bars before the entry day.
            Strategy::FirstLimitUp(_) => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::TrendMomentum(_) => "trend-momentum",
            Strategy::FirstLimitUp(_) => "first-limit-up",
        }
    }
}
