// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Small numerical helpers.

use crate::constants::TAU;

/// Linearly interpolate `ys` at `x`, where `xs` is sorted ascending. Returns
/// `None` when `x` is outside the tabulated range.
pub(crate) fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    let (&first, &last) = (xs.first()?, xs.last()?);
    if x < first || x > last {
        return None;
    }
    // partition_point gives the first index with xs[i] > x.
    let i = xs.partition_point(|&v| v <= x);
    if i == 0 {
        return Some(ys[0]);
    }
    if i == xs.len() {
        return Some(ys[xs.len() - 1]);
    }
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

/// Trapezoidal integration of `ys` sampled at `xs` (sorted ascending).
pub(crate) fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum()
}

/// Normalise an angle to the range \[0, 2π).
pub(crate) fn normalise_rad(theta: f64) -> f64 {
    let t = theta % TAU;
    if t < 0.0 {
        t + TAU
    } else {
        t
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn interp_hits_and_midpoints() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 10.0, 30.0];
        assert_abs_diff_eq!(interp(0.0, &xs, &ys).unwrap(), 0.0);
        assert_abs_diff_eq!(interp(0.5, &xs, &ys).unwrap(), 5.0);
        assert_abs_diff_eq!(interp(1.5, &xs, &ys).unwrap(), 20.0);
        assert_abs_diff_eq!(interp(2.0, &xs, &ys).unwrap(), 30.0);
        assert!(interp(-0.1, &xs, &ys).is_none());
        assert!(interp(2.1, &xs, &ys).is_none());
    }

    #[test]
    fn trapezoid_linear_function_is_exact() {
        let xs = [0.0, 0.5, 2.0];
        let ys = [0.0, 1.0, 4.0];
        assert_abs_diff_eq!(trapezoid(&xs, &ys), 4.0);
    }

    #[test]
    fn normalise_rad_wraps_both_ways() {
        assert_abs_diff_eq!(normalise_rad(-0.5), TAU - 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalise_rad(TAU + 0.5), 0.5, epsilon = 1e-12);
    }
}
