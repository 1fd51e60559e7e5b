// Vector statistics used by the similarity engine.
// Degenerate inputs (zero norm, zero variance, length mismatch) resolve to a
// defined value instead of NaN or a panic.

/// Dot product (two accumulators for better pipelining)
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot0 = 0.0f64;
    let mut dot1 = 0.0f64;

    let chunks = a.chunks_exact(2).zip(b.chunks_exact(2));
    for (ca, cb) in chunks {
        dot0 += ca[0] * cb[0];
        dot1 += ca[1] * cb[1];
    }

    if a.len() % 2 == 1 {
        let last = a.len() - 1;
        dot0 += a[last] * b[last];
    }

    dot0 + dot1
}

#[inline]
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Cosine similarity; 0.0 when either vector has zero norm or lengths differ
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot(a, b) / (norm_a * norm_b)
}

/// Euclidean (L2) distance; infinity on length mismatch
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// `1 / (1 + distance)`, in (0, 1]
#[inline]
pub fn euclidean_similarity(a: &[f64], b: &[f64]) -> f64 {
    1.0 / (1.0 + euclidean_distance(a, b))
}

#[inline]
pub fn mean(a: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    a.iter().sum::<f64>() / a.len() as f64
}

/// Population standard deviation
pub fn std_dev(a: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let m = mean(a);
    (a.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / a.len() as f64).sqrt()
}

/// Pearson correlation coefficient.
///
/// Returns 0.0 when fewer than two values are given, lengths differ, or
/// either side has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return 0.0;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= f64::EPSILON * f64::EPSILON || var_b <= f64::EPSILON * f64::EPSILON {
        return 0.0;
    }

    (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
}

/// Standardize each column of a row-major matrix to zero mean and unit
/// (population) variance. Zero-variance columns become all zeros.
///
/// # Panics
/// Panics if rows have different lengths.
pub fn standardize_columns(rows: &[&[f64]]) -> Vec<Vec<f64>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    let dim = first.len();
    assert!(
        rows.iter().all(|r| r.len() == dim),
        "all rows must have the same dimension"
    );

    let n = rows.len() as f64;
    let mut out: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();

    for col in 0..dim {
        let column_mean = rows.iter().map(|r| r[col]).sum::<f64>() / n;
        let variance = rows
            .iter()
            .map(|r| (r[col] - column_mean) * (r[col] - column_mean))
            .sum::<f64>()
            / n;
        let std = variance.sqrt();

        for row in out.iter_mut() {
            row[col] = if std > f64::EPSILON {
                (row[col] - column_mean) / std
            } else {
                0.0
            };
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_odd_length() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_euclidean() {
        assert!((euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((euclidean_similarity(&[0.0, 0.0], &[3.0, 4.0]) - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(euclidean_similarity(&[1.0, 2.0], &[1.0, 2.0]), 1.0);
    }

    #[test]
    fn test_pearson() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance_is_zero() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(pearson(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(pearson(&[1.0], &[2.0]), 0.0);
    }

    #[test]
    fn test_standardize_two_rows() {
        let a = [1.0, 5.0, 2.0];
        let b = [3.0, 5.0, 0.0];
        let z = standardize_columns(&[&a, &b]);
        assert_eq!(z[0], vec![-1.0, 0.0, 1.0]);
        assert_eq!(z[1], vec![1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_standardize_columns_zero_mean_unit_variance() {
        let rows = [[1.0, 10.0], [2.0, 20.0], [6.0, 60.0]];
        let refs: Vec<&[f64]> = rows.iter().map(|r| r.as_slice()).collect();
        let z = standardize_columns(&refs);
        for col in 0..2 {
            let column: Vec<f64> = z.iter().map(|r| r[col]).collect();
            assert!(mean(&column).abs() < 1e-12);
            assert!((std_dev(&column) - 1.0).abs() < 1e-12);
        }
    }
}
