//! Float helpers shared by the property tables.

/// Linear interpolation of `y` over a strictly increasing `x`, clamped to the end values.
pub fn interp_linear(x: &[f64], y: &[f64], at: f64) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len();
    if n == 0 {
        return 0.0;
    }
    if at <= x[0] {
        return y[0];
    }
    if at >= x[n - 1] {
        return y[n - 1];
    }
    // First index with x[i] > at; at least 1 because of the clamp above.
    let hi = x.partition_point(|&xi| xi <= at);
    let lo = hi - 1;
    let t = (at - x[lo]) / (x[hi] - x[lo]);
    y[lo] + t * (y[hi] - y[lo])
}
