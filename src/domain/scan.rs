//! Per-symbol strategy scan.
//!
//! One forward pass over the bar sequence, from the first index where every
//! input the strategy consults is defined, to the second-to-last bar (the
//! final index keeps a lookahead day). Entry and exit are evaluated at most
//! once per index and are mutually exclusive: a position never opens and
//! closes on the same bar. A position still open after the last evaluated
//! bar is discarded, not force-closed.

use crate::domain::bar::PriceBar;
use crate::domain::indicator::IndicatorFrame;
use crate::domain::position::{OpenPosition, Position};
use crate::domain::strategy::{FirstLimitUpParams, Strategy, TrendMomentumParams};
use crate::domain::trade::{EntrySnapshot, Trade};

/// Run `strategy` over `bars` and return the completed trades in buy-date
/// order. Sequences shorter than the strategy's lookback (plus the lookahead
/// day) produce an empty list, never an error.
pub fn simulate(bars: &[PriceBar], frame: &IndicatorFrame, strategy: &Strategy) -> Vec<Trade> {
    let lookback = strategy.min_lookback();
    if bars.len() < lookback + 2 {
        return Vec::new();
    }

    match strategy {
        Strategy::TrendMomentum(params) => scan_trend(bars, frame, params),
        Strategy::FirstLimitUp(params) => scan_limit_up(bars, params),
    }
}

fn scan_trend(bars: &[PriceBar], frame: &IndicatorFrame, params: &TrendMomentumParams) -> Vec<Trade> {
    let mut trades = Vec::new();
    let mut position = Position::Flat;

    for i in 30..bars.len() - 1 {
        let today = &bars[i];
        let close = today.close;

        // All windows end the day before i, so every average is defined
        // from index 30 onward.
        let (Some(ma5), Some(ma10), Some(ma30), Some(vol_ma10)) =
            (frame.ma5[i], frame.ma10[i], frame.ma30[i], frame.vol_ma10[i])
        else {
            continue;
        };

        match position {
            Position::Flat => {
                let bullish_trend = ma5 > ma10 && ma10 > ma30;
                let volume_boost = today.vol > params.volume_surge * vol_ma10;
                let moderate_gain = today.pct_chg < params.max_pct_chg;
                let macd_bull = frame.macd[i] > frame.macd_signal[i] && frame.macd_hist[i] > 0.0;

                if bullish_trend && volume_boost && moderate_gain && macd_bull {
                    let (Some(vol_ma5), Some(vol_ma30)) = (frame.vol_ma5[i], frame.vol_ma30[i])
                    else {
                        continue;
                    };
                    let snapshot = EntrySnapshot {
                        ma5,
                        ma10,
                        ma30,
                        vol_ma5,
                        vol_ma10,
                        vol_ma30,
                    };
                    position = Position::Open(OpenPosition::new(
                        close,
                        today.trade_date,
                        Some(snapshot),
                    ));
                }
            }
            Position::Open(ref mut pos) => {
                pos.update_peak(close);
                let profit = pos.profit(close);

                let death_cross = ma5 < ma10;
                let stop_loss = profit <= params.stop_loss;
                let take_profit = profit >= params.take_profit;
                let close_below_ma10 = close < ma10;
                let drawdown_exit = pos.drawdown(close) > params.max_drawdown;

                if death_cross || stop_loss || take_profit || close_below_ma10 || drawdown_exit {
                    trades.push(Trade::new(
                        pos.entry_date,
                        pos.entry_price,
                        today.trade_date,
                        close,
                        pos.snapshot.take(),
                    ));
                    position = Position::Flat;
                }
            }
        }
    }

    trades
}

/// Degenerate state machine: buy the open after a first limit-up close when
/// the gap stays inside the window, sell unconditionally at the next open.
/// No state is carried between bars.
fn scan_limit_up(bars: &[PriceBar], params: &FirstLimitUpParams) -> Vec<Trade> {
    let mut trades = Vec::new();

    for i in 2..bars.len() - 1 {
        let yesterday = &bars[i - 1];
        let day_before = &bars[i - 2];

        let first_limit_up = yesterday.is_limit_up(params.limit_threshold)
            && !day_before.is_limit_up(params.limit_threshold);
        if !first_limit_up {
            continue;
        }

        let gap = bars[i].open_gap_pct(yesterday.close);
        if gap >= params.min_gap_pct && gap <= params.max_gap_pct {
            trades.push(Trade::new(
                bars[i].trade_date,
                bars[i].open,
                bars[i + 1].trade_date,
                bars[i + 1].open,
                None,
            ));
        }
    }

    trades
}
