/// Interpolate a smooth curve through `(index, value)` points using a natural
/// cubic spline over the uniform knots `0, 1, ..., n-1`, evaluated at
/// `samples` evenly spaced positions across the full index range.
pub fn spline_curve(values: &[f64], samples: usize) -> Vec<(f64, f64)> {
    let n = values.len();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, values[0])],
        _ => {}
    }

    let m = second_derivatives(values);
    let x_max = (n - 1) as f64;
    let steps = samples.max(2);

    (0..steps)
        .map(|s| {
            let x = x_max * s as f64 / (steps - 1) as f64;
            let i = (x.floor() as usize).min(n - 2);
            let t = x - i as f64;
            // Cubic spline segment with unit knot spacing.
            let y = m[i] / 6.0 * (1.0 - t).powi(3)
                + m[i + 1] / 6.0 * t.powi(3)
                + (values[i] - m[i] / 6.0) * (1.0 - t)
                + (values[i + 1] - m[i + 1] / 6.0) * t;
            (x, y)
        })
        .collect()
}

/// Solve for the spline's second derivatives at the knots. Natural boundary
/// conditions: zero curvature at both ends. The system is tridiagonal with
/// constant bands (1, 4, 1), solved by a single forward/backward sweep.
fn second_derivatives(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut m = vec![0.0; n];
    if n <= 2 {
        return m;
    }

    let k = n - 2;
    let mut diag = vec![4.0; k];
    let mut rhs: Vec<f64> = (1..n - 1)
        .map(|i| 6.0 * (values[i + 1] - 2.0 * values[i] + values[i - 1]))
        .collect();

    for i in 1..k {
        let w = 1.0 / diag[i - 1];
        diag[i] -= w;
        rhs[i] -= w * rhs[i - 1];
    }

    m[n - 2] = rhs[k - 1] / diag[k - 1];
    for i in (0..k - 1).rev() {
        m[i + 1] = (rhs[i] - m[i + 2]) / diag[i];
    }

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_passes_through_the_knots() {
        let values = [90.0, 92.5, 91.0, 94.0, 93.2];
        // Sample count chosen so every knot index lands on a sample.
        let curve = spline_curve(&values, 2 * (values.len() - 1) + 1);

        for (i, &v) in values.iter().enumerate() {
            let (x, y) = curve[2 * i];
            assert!((x - i as f64).abs() < 1e-9);
            assert!((y - v).abs() < 1e-9, "knot {} interpolated as {}", i, y);
        }
    }

    #[test]
    fn linear_data_stays_linear() {
        let values: Vec<f64> = (0..6).map(|i| 88.0 + 0.5 * i as f64).collect();
        let curve = spline_curve(&values, 50);

        for (x, y) in curve {
            assert!((y - (88.0 + 0.5 * x)).abs() < 1e-9);
        }
    }

    #[test]
    fn flat_data_stays_flat() {
        let curve = spline_curve(&[92.0; 12], 300);
        assert_eq!(curve.len(), 300);
        for (_, y) in curve {
            assert!((y - 92.0).abs() < 1e-9);
        }
    }

    #[test]
    fn two_points_interpolate_linearly() {
        let curve = spline_curve(&[90.0, 94.0], 5);
        assert!((curve[2].1 - 92.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_inputs_do_not_panic() {
        assert!(spline_curve(&[], 300).is_empty());
        assert_eq!(spline_curve(&[91.0], 300), vec![(0.0, 91.0)]);
    }
}
