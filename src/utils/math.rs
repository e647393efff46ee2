//! Numeric helpers shared by the genome and parameter layers.

/// Largest representable `f64` strictly less than `x`.
pub fn next_down(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return x;
    }
    if x == 0.0 {
        // Covers both +0.0 and -0.0
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}

/// Clamp `value` into the half-open range `[min, max)`.
///
/// Anything at or above `max` lands on the largest `f64` below `max`.
/// NaN maps to `min`.
pub fn clamp_half_open(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min < max, "clamp range must be non-empty");
    if value.is_nan() || value < min {
        return min;
    }
    if value >= max {
        return next_down(max).max(min);
    }
    value
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two samples.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mu = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mu) * (v - mu)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Relative closeness check with a 1e-9 tolerance.
///
/// Infinities are only close to themselves; NaN is close to nothing.
pub fn is_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let diff = (a - b).abs();
    diff <= 1e-9 * a.abs().max(b.abs())
}
