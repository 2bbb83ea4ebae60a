//! Small numeric helpers: moments, norms and first-extreme search.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean and sample standard deviation (`n - 1` denominator).
///
/// `None` when fewer than two values are given.
pub fn mean_and_sample_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|x| (x - m) * (x - m)).sum();
    Some((m, (ss / (values.len() - 1) as f64).sqrt()))
}

/// Euclidean (L2) norm of a vector.
pub fn l2_norm(values: &[f64]) -> f64 {
    values.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Euclidean distance for same-length vectors.
///
/// Returns infinity when the lengths differ.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Index of the first maximum value, or `None` for an empty slice.
///
/// NaN entries are never selected unless every entry is NaN.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            None => best = Some((i, v)),
            Some((_, b)) if v > b || (b.is_nan() && !v.is_nan()) => best = Some((i, v)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first minimum value, or `None` for an empty slice.
///
/// Ties resolve to the lowest index.
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            None => best = Some((i, v)),
            Some((_, b)) if v < b || (b.is_nan() && !v.is_nan()) => best = Some((i, v)),
            _ => {}
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==================== moments ====================

    #[test]
    fn mean_of_values() {
        assert_relative_eq!(mean(&[2.0, 4.0, 9.0]).unwrap(), 5.0, epsilon = 1e-12);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        let (m, sd) = mean_and_sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(m, 5.0, epsilon = 1e-12);
        assert_relative_eq!(sd, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_eq!(mean_and_sample_std(&[1.0]), None);
    }

    // ==================== distances ====================

    #[test]
    fn l2_norm_basic() {
        assert_relative_eq!(l2_norm(&[3.0, 4.0]), 5.0, epsilon = 1e-12);
        assert_eq!(l2_norm(&[]), 0.0);
    }

    #[test]
    fn euclidean_basic() {
        assert_relative_eq!(
            euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]),
            5.0,
            epsilon = 1e-10
        );
        assert_eq!(euclidean_distance(&[1.0], &[1.0, 2.0]), f64::INFINITY);
    }

    // ==================== argmax / argmin ====================

    #[test]
    fn argmax_returns_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 2.0, 3.0]), Some(1));
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), Some(0));
        assert_eq!(argmax(&[f64::NAN, -1.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn argmin_returns_first_minimum() {
        assert_eq!(argmin(&[2.0, 1.0, 1.0, 3.0]), Some(1));
        assert_eq!(argmin(&[0.5]), Some(0));
        assert_eq!(argmin(&[]), None);
    }
}
