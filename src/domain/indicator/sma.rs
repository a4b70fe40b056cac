//! Trailing simple moving average.
//!
//! `out[i] = mean(values[i-n .. i])` — the n values strictly before index i,
//! so the average never includes the day being evaluated. Undefined (`None`)
//! until i >= n.

/// Running-sum trailing mean; O(n) over the series.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for i in 0..values.len() {
        if i >= window {
            out.push(Some(sum / window as f64));
            sum -= values[i - window];
        } else {
            out.push(None);
        }
        sum += values[i];
    }

    out
}
