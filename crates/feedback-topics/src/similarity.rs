//! Vector helpers for dense TF-IDF rows.

/// Squared Euclidean distance.
///
/// # Panics
/// Panics if vectors have different dimensions.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vectors must have same dimension");

    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Mean of a set of rows.
///
/// Unlike a spherical centroid, the mean is not renormalized: k-means
/// centres and keyword weights are plain averages.
pub fn mean(rows: &[&[f64]]) -> Vec<f64> {
    if rows.is_empty() {
        return Vec::new();
    }

    let dim = rows[0].len();
    let n = rows.len() as f64;
    let mut centroid = vec![0.0f64; dim];

    for row in rows {
        assert_eq!(row.len(), dim, "All rows must have same dimension");
        for (i, &val) in row.iter().enumerate() {
            centroid[i] += val;
        }
    }

    for val in centroid.iter_mut() {
        *val /= n;
    }

    centroid
}

/// Normalize a vector to unit length in place. Zero vectors stay zero.
pub fn normalize(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for val in v.iter_mut() {
            *val /= norm;
        }
    }
}

/// Mean per-feature variance of the rows.
pub fn mean_variance(rows: &[Vec<f64>]) -> f64 {
    let Some(first) = rows.first() else {
        return 0.0;
    };
    let dim = first.len();
    if dim == 0 {
        return 0.0;
    }

    let refs: Vec<&[f64]> = rows.iter().map(Vec::as_slice).collect();
    let centre = mean(&refs);
    let n = rows.len() as f64;

    let total: f64 = (0..dim)
        .map(|j| rows.iter().map(|r| (r[j] - centre[j]).powi(2)).sum::<f64>() / n)
        .sum();
    total / dim as f64
}
