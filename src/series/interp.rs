//! Linear resampling of one field onto a target time axis
//!
//! Values outside a field's original time span are explicitly missing, not
//! extrapolated, so truth data never gets invented beyond its support.

/// Linearly interpolate `(sample_times, values)` onto `axis`.
///
/// Support points need not arrive sorted; they are ordered by time before
/// interpolation. Axis points before the first or after the last support
/// point yield `None`. An axis point exactly equal to a support time yields
/// that sample's value.
pub fn resample_linear(sample_times: &[f64], values: &[f64], axis: &[f64]) -> Vec<Option<f64>> {
    debug_assert_eq!(sample_times.len(), values.len());

    let mut support: Vec<(f64, f64)> = sample_times
        .iter()
        .copied()
        .zip(values.iter().copied())
        .collect();
    support.sort_by(|a, b| a.0.total_cmp(&b.0));

    axis.iter()
        .map(|&t| interpolate_at(&support, t))
        .collect()
}

fn interpolate_at(support: &[(f64, f64)], t: f64) -> Option<f64> {
    let (first, last) = match (support.first(), support.last()) {
        (Some(f), Some(l)) => (f.0, l.0),
        _ => return None,
    };
    if t < first || t > last {
        return None;
    }

    // Index of the first support time >= t.
    let upper = support.partition_point(|&(st, _)| st < t);
    let (t1, v1) = support[upper];
    if t1 == t {
        return Some(v1);
    }
    let (t0, v0) = support[upper - 1];
    if t1 == t0 {
        return Some(v0);
    }
    let frac = (t - t0) / (t1 - t0);
    Some(v0 + frac * (v1 - v0))
}
