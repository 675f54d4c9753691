//! Moving averages and dispersion over close-price slices.

/// Arithmetic mean of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Smoothing factor for an EMA of the given span.
pub fn ema_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Next EMA value from the previous one.
pub fn ema_from_previous(value: f64, previous: f64, span: usize) -> f64 {
    let alpha = ema_alpha(span);
    alpha * value + (1.0 - alpha) * previous
}

/// Full EMA series seeded with the first value (no warm-up correction).
///
/// `ema[0] = values[0]`, `ema[t] = α·values[t] + (1−α)·ema[t−1]`.
pub fn ema_series(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return out;
    };
    out.push(first);
    let mut previous = first;
    for &value in iter {
        previous = ema_from_previous(value, previous, span);
        out.push(previous);
    }
    out
}

/// Sample standard deviation (divisor `period − 1`) of the trailing window.
pub fn sample_standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 || values.len() < period {
        return None;
    }
    let mean = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (period - 1) as f64;
    Some(variance.sqrt())
}
