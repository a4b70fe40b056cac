//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Each EMA is seeded with the first input value: ema[0] = x[0],
//! ema[i] = ema[i-1]*(1-k) + x[i]*k with k = 2/(period+1). The recurrence
//! runs over the whole history; truncating the input changes every
//! subsequent value, so callers slice the output, never the input.

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Default)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub hist: Vec<f64>,
}

/// Exponential smoothing seeded with the first value.
fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());

    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            out.push(value);
        } else {
            let prev = out[i - 1];
            out.push(prev * (1.0 - k) + value * k);
        }
    }

    out
}

pub fn compute_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdSeries {
    if closes.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return MacdSeries::default();
    }

    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();

    let signal = ema(&macd, signal_period);

    let hist: Vec<f64> = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries { macd, signal, hist }
}

pub fn compute_macd_default(closes: &[f64]) -> MacdSeries {
    compute_macd(closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
