//! Technical indicator derivation.
//!
//! All indicator series are index-aligned with the source bar sequence.
//! Moving averages use the window *strictly before* each index and are
//! `None` until enough history exists; MACD is a seeded recurrence defined
//! from index 0 and must be computed over the full history before any
//! sub-range is consulted.

pub mod sma;
pub mod macd;

use crate::domain::bar::PriceBar;
use self::sma::trailing_mean;

pub const MA_SHORT: usize = 5;
pub const MA_MID: usize = 10;
pub const MA_LONG: usize = 30;

/// Derived indicator columns for one symbol's bar sequence.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    pub ma5: Vec<Option<f64>>,
    pub ma10: Vec<Option<f64>>,
    pub ma30: Vec<Option<f64>>,
    pub vol_ma5: Vec<Option<f64>>,
    pub vol_ma10: Vec<Option<f64>>,
    pub vol_ma30: Vec<Option<f64>>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_hist: Vec<f64>,
}

impl IndicatorFrame {
    /// Compute all indicator columns for `bars`. Pure; empty input yields an
    /// empty frame.
    pub fn compute(bars: &[PriceBar]) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let vols: Vec<f64> = bars.iter().map(|b| b.vol).collect();

        let macd_series = macd::compute_macd_default(&closes);

        IndicatorFrame {
            ma5: trailing_mean(&closes, MA_SHORT),
            ma10: trailing_mean(&closes, MA_MID),
            ma30: trailing_mean(&closes, MA_LONG),
            vol_ma5: trailing_mean(&vols, MA_SHORT),
            vol_ma10: trailing_mean(&vols, MA_MID),
            vol_ma30: trailing_mean(&vols, MA_LONG),
            macd: macd_series.macd,
            macd_signal: macd_series.signal,
            macd_hist: macd_series.hist,
        }
    }

    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}
