//! Descriptive statistics over return series.
//!
//! Variance, standard deviation and covariance use the sample (`n - 1`)
//! denominator unless the function name says otherwise.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance, `None` with fewer than two values.
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation, `None` with fewer than two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Population standard deviation, `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / values.len() as f64).sqrt())
}

/// Sample covariance of two equally long slices.
pub fn covariance(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let mean_a = mean(a)?;
    let mean_b = mean(b)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .sum();
    Some(sum / (a.len() - 1) as f64)
}

/// Pearson correlation of two equally long slices.
///
/// Returns `None` when either side has zero variance, where the
/// coefficient is undefined.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    let cov = covariance(a, b)?;
    let std_a = std_dev(a)?;
    let std_b = std_dev(b)?;
    let denominator = std_a * std_b;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some((cov / denominator).clamp(-1.0, 1.0))
}

/// Pearson correlation over each full trailing window of `window` points.
///
/// Element `i` covers `a[i..i + window]`; windows with an undefined
/// coefficient yield `None`.
pub fn rolling_correlation(a: &[f64], b: &[f64], window: usize) -> Vec<Option<f64>> {
    let len = a.len().min(b.len());
    if window < 2 || len < window {
        return Vec::new();
    }
    (0..=len - window)
        .map(|start| pearson_correlation(&a[start..start + window], &b[start..start + window]))
        .collect()
}

/// Keeps the last `n` elements of a slice.
pub fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}
