//! Marginal concordance and discordance of a single criterion.
//!
//! `d` is the oriented performance difference of `a` over `b` (positive
//! favours `a`) and `x` the anchor evaluation at which the thresholds are
//! computed.

use super::config::ConcordanceMode;
use crate::tableau::Thresholds;

/// Marginal concordance `C_c(a, b)` in `[-1, +1]`.
///
/// Crisp: `+1` when `d >= -q`, `-1` when `d <= -p`, `0` in between.
/// Linear: same plateaus, interpolated on `(-p, -q)` through `0` at `-wp`.
pub fn concordance(d: f64, thresholds: &Thresholds, x: f64, mode: ConcordanceMode) -> f64 {
    let q = thresholds.ind_at(x);
    let p = thresholds.pref_at(x);
    if d >= -q {
        return 1.0;
    }
    if d <= -p {
        return -1.0;
    }
    match mode {
        ConcordanceMode::Crisp => 0.0,
        ConcordanceMode::Linear => {
            let wp = thresholds.weak_pref_at(x);
            let mid = if wp.is_finite() {
                -wp
            } else if p.is_finite() {
                -(p + q) / 2.0
            } else {
                return 0.0;
            };
            if d >= mid {
                // mid < d < -q
                (d - mid) / (-q - mid)
            } else if p.is_finite() {
                // -p < d < mid
                -(mid - d) / (mid + p)
            } else {
                0.0
            }
        }
    }
}

/// Marginal discordance `V_c(a, b)` in `[0, 1]`: `1` when `d <= -v`,
/// `weak_degree` on the weak veto interval `(-v, -wv]`, `0` otherwise.
pub fn discordance(d: f64, thresholds: &Thresholds, x: f64, weak_degree: f64) -> f64 {
    if d <= -thresholds.veto_at(x) {
        1.0
    } else if d <= -thresholds.weak_veto_at(x) {
        weak_degree
    } else {
        0.0
    }
}
