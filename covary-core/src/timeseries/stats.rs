//! Descriptive statistics over aligned value arrays.
//!
//! Both functions are total: undefined cases produce sentinels (NaN for the
//! correlation coefficient, a flat line for the regression), never errors.
//! Callers must display NaN as "undefined" rather than treating it as zero.

use crate::types::LinearFit;

/// Pearson correlation coefficient over `min(xs.len(), ys.len())` samples;
/// extra trailing elements in the longer slice are ignored.
///
/// Returns NaN when fewer than 3 samples are available or when either
/// series is constant (the unnormalized variance product is exactly zero).
#[must_use]
pub fn pearson_r(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return f64::NAN;
    }
    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    let mut sum_xy = 0.0;
    for i in 0..n {
        let (x, y) = (xs[i], ys[i]);
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_yy += y * y;
        sum_xy += x * y;
    }
    let num = nf.mul_add(sum_xy, -(sum_x * sum_y));
    let den = (nf.mul_add(sum_xx, -(sum_x * sum_x)) * nf.mul_add(sum_yy, -(sum_y * sum_y))).sqrt();
    if den == 0.0 { f64::NAN } else { num / den }
}

/// Ordinary-least-squares fit `y = slope * x + intercept` over
/// `min(xs.len(), ys.len())` samples.
///
/// When all x values are identical the slope is defined as zero and the
/// intercept as the mean of y; an empty input yields the zero line.
#[must_use]
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> LinearFit {
    let n = xs.len().min(ys.len());
    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_xy = 0.0;
    for i in 0..n {
        let (x, y) = (xs[i], ys[i]);
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_xy += x * y;
    }
    let denom = nf.mul_add(sum_xx, -(sum_x * sum_x));
    let slope = if denom == 0.0 {
        0.0
    } else {
        nf.mul_add(sum_xy, -(sum_x * sum_y)) / denom
    };
    let intercept = if n == 0 {
        0.0
    } else {
        (sum_y - slope * sum_x) / nf
    };
    LinearFit { slope, intercept }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn perfect_positive_and_negative_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let up: Vec<f64> = xs.iter().map(|x| 2.5 * x + 1.0).collect();
        let down: Vec<f64> = xs.iter().map(|x| -0.5 * x + 7.0).collect();
        assert!((pearson_r(&xs, &up) - 1.0).abs() < EPS);
        assert!((pearson_r(&xs, &down) + 1.0).abs() < EPS);
    }

    #[test]
    fn undefined_below_three_samples() {
        assert!(pearson_r(&[1.0, 2.0], &[1.0, 2.0]).is_nan());
        assert!(pearson_r(&[], &[]).is_nan());
    }

    #[test]
    fn constant_series_has_no_defined_correlation() {
        assert!(pearson_r(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]).is_nan());
    }

    #[test]
    fn shorter_length_governs() {
        let xs = [1.0, 2.0, 3.0, 100.0, -40.0];
        let ys = [2.0, 4.0, 6.0];
        assert!((pearson_r(&xs, &ys) - 1.0).abs() < EPS);
    }

    #[test]
    fn identity_line_fit() {
        let fit = linear_fit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((fit.slope - 1.0).abs() < EPS);
        assert!(fit.intercept.abs() < EPS);
    }

    #[test]
    fn degenerate_x_yields_flat_line_at_mean_of_y() {
        let fit = linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 6.0]);
        assert!(fit.slope.abs() < EPS);
        assert!((fit.intercept - 3.0).abs() < EPS);
    }

    #[test]
    fn empty_input_yields_zero_line() {
        let fit = linear_fit(&[], &[]);
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 0.0);
    }
}
