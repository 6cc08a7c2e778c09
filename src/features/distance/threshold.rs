//! Percentile thresholding of pairwise distances

use crate::config::Combination;
use crate::error::SimilarityError;
use crate::linalg::{pairwise_distance, percentile, transpose, MatrixMultiply};

/// 1 for non-negative values, 0 otherwise (NaN included).
#[inline]
fn heaviside(v: f32) -> f32 {
    if v >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Binarize each row against its own `kappa` percentile
///
/// Entry `(i, j)` is 1 when `distances[i][j]` is at or below the
/// `kappa * 100`-th percentile of row `i`, else 0.
///
/// # Errors
///
/// Returns `SimilarityError::EmptyInput` for an empty row and
/// `SimilarityError::Configuration` if `kappa` is outside `[0, 1]`
pub fn binarize_rows(distances: &[Vec<f32>], kappa: f32) -> Result<Vec<Vec<f32>>, SimilarityError> {
    distances
        .iter()
        .map(|row| -> Result<Vec<f32>, SimilarityError> {
            let threshold = percentile(row, kappa * 100.0)?;
            Ok(row.iter().map(|&d| heaviside(threshold - d)).collect())
        })
        .collect()
}

/// Binarize each row against its own percentile, writing the result transposed
///
/// Same thresholding as [`binarize_rows`], but entry `(i, j)` of the input
/// lands at `(j, i)` of the output so no second transpose pass is needed.
pub fn binarize_rows_transposed(
    distances: &[Vec<f32>],
    kappa: f32,
) -> Result<Vec<Vec<f32>>, SimilarityError> {
    let cols = distances.first().map_or(0, Vec::len);
    let mut out = vec![vec![0.0f32; distances.len()]; cols];
    for (u, row) in distances.iter().enumerate() {
        let threshold = percentile(row, kappa * 100.0)?;
        for (v, &d) in row.iter().enumerate() {
            out[v][u] = heaviside(threshold - d);
        }
    }
    Ok(out)
}

/// Compute the thresholded cross-similarity between two embedded sequences
///
/// # Arguments
///
/// * `query` - Embedded query frames
/// * `reference` - Embedded reference frames (same dimension)
/// * `kappa` - Percentile fraction for the adaptive threshold
/// * `optimise_threshold` - Use all ones for the query axis instead of thresholding it
/// * `combination` - How the query-axis and reference-axis similarities are joined
///
/// # Returns
///
/// With [`Combination::MatrixProduct`], `similarity_x × similarity_y`, where
/// both factors are `query.len() × reference.len()`; each entry counts the
/// thresholded agreements along the shared axis. With
/// [`Combination::CrossRecurrence`], the element-wise product (binary,
/// `query.len() × reference.len()`).
///
/// # Errors
///
/// - `SimilarityError::EmptyMatrix` if the distance matrix is empty
/// - `SimilarityError::DimensionMismatch` if the matrix product is not
///   conformable (query and reference lengths differ)
pub fn threshold_similarity<M: MatrixMultiply>(
    query: &[Vec<f32>],
    reference: &[Vec<f32>],
    kappa: f32,
    optimise_threshold: bool,
    combination: Combination,
) -> Result<Vec<Vec<f32>>, SimilarityError> {
    let distances = pairwise_distance(query, reference);
    if distances.is_empty() || distances[0].is_empty() {
        return Err(SimilarityError::EmptyMatrix(
            "empty array found inside euclidean cross similarity matrix".to_string(),
        ));
    }

    let x_rows = distances.len();
    let x_cols = distances[0].len();
    log::debug!(
        "Thresholding {}x{} distance matrix (kappa={}, optimise_threshold={})",
        x_rows,
        x_cols,
        kappa,
        optimise_threshold
    );

    let similarity_x = if optimise_threshold {
        vec![vec![1.0f32; x_cols]; x_rows]
    } else {
        binarize_rows(&distances, kappa)?
    };

    let tp_distances = transpose(&distances);
    let similarity_y = binarize_rows_transposed(&tp_distances, kappa)?;

    match combination {
        Combination::MatrixProduct => M::multiply(&similarity_x, &similarity_y),
        Combination::CrossRecurrence => Ok(similarity_x
            .iter()
            .zip(similarity_y.iter())
            .map(|(x_row, y_row)| x_row.iter().zip(y_row.iter()).map(|(x, y)| x * y).collect())
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::SerialMultiply;

    fn frames(n: usize, dim: usize, seed: usize) -> Vec<Vec<f32>> {
        (0..n)
            .map(|i| {
                (0..dim)
                    .map(|b| (((i + seed) * 31 + b * 17) % 23) as f32 / 23.0)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_binarized_values_are_binary() {
        let d = pairwise_distance(&frames(6, 12, 0), &frames(9, 12, 3));
        for kappa in [0.0, 0.095, 0.5, 1.0] {
            let x = binarize_rows(&d, kappa).unwrap();
            let y = binarize_rows_transposed(&transpose(&d), kappa).unwrap();
            assert_eq!(x.len(), 6);
            assert_eq!(y.len(), 6);
            assert!(x.iter().chain(y.iter()).all(|row| row.len() == 9));
            assert!(x.iter().chain(y.iter()).flatten().all(|&v| v == 0.0 || v == 1.0));
        }
    }

    #[test]
    fn test_binarize_rows_threshold() {
        let d = vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]];
        // 50th percentile is 3.0; at or below passes
        assert_eq!(binarize_rows(&d, 0.5).unwrap(), vec![vec![1.0, 1.0, 1.0, 0.0, 0.0]]);
        assert_eq!(binarize_rows(&d, 1.0).unwrap(), vec![vec![1.0; 5]]);
    }

    #[test]
    fn test_binarize_rows_transposed_matches_transpose() {
        let d = pairwise_distance(&frames(4, 3, 1), &frames(5, 3, 2));
        let direct = binarize_rows_transposed(&d, 0.3).unwrap();
        let two_pass = transpose(&binarize_rows(&d, 0.3).unwrap());
        assert_eq!(direct, two_pass);
    }

    #[test]
    fn test_matrix_product_counts() {
        let q = frames(7, 12, 0);
        let csm = threshold_similarity::<SerialMultiply>(&q, &q, 0.2, false, Combination::MatrixProduct)
            .unwrap();
        assert_eq!(csm.len(), 7);
        assert!(csm.iter().all(|row| row.len() == 7));
        for &v in csm.iter().flatten() {
            assert!(v >= 0.0 && v <= 7.0 && v.fract() == 0.0);
        }
    }

    #[test]
    fn test_optimised_axis_sums_columns() {
        let q = frames(5, 4, 0);
        let r = frames(5, 4, 2);
        let csm = threshold_similarity::<SerialMultiply>(&q, &r, 0.4, true, Combination::MatrixProduct)
            .unwrap();
        let y = binarize_rows_transposed(&transpose(&pairwise_distance(&q, &r)), 0.4).unwrap();
        for j in 0..5 {
            let column_sum: f32 = y.iter().map(|row| row[j]).sum();
            for row in &csm {
                assert_eq!(row[j], column_sum);
            }
        }
    }

    #[test]
    fn test_matrix_product_needs_square() {
        let q = frames(3, 4, 0);
        let r = frames(6, 4, 1);
        assert!(matches!(
            threshold_similarity::<SerialMultiply>(&q, &r, 0.1, false, Combination::MatrixProduct),
            Err(SimilarityError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_cross_recurrence_shape() {
        let q = frames(3, 4, 0);
        let r = frames(6, 4, 1);
        let csm =
            threshold_similarity::<SerialMultiply>(&q, &r, 0.5, false, Combination::CrossRecurrence)
                .unwrap();
        assert_eq!(csm.len(), 3);
        assert!(csm.iter().all(|row| row.len() == 6));
        assert!(csm.iter().flatten().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_self_similarity_diagonal_under_cross_recurrence() {
        let q = frames(8, 12, 0);
        let csm =
            threshold_similarity::<SerialMultiply>(&q, &q, 0.1, false, Combination::CrossRecurrence)
                .unwrap();
        for i in 0..8 {
            assert_eq!(csm[i][i], 1.0, "frame {i} should recur with itself");
        }
    }

    #[test]
    fn test_empty_matrix() {
        let q: Vec<Vec<f32>> = vec![];
        let r = frames(3, 4, 0);
        assert!(matches!(
            threshold_similarity::<SerialMultiply>(&q, &r, 0.1, false, Combination::MatrixProduct),
            Err(SimilarityError::EmptyMatrix(_))
        ));
    }
}
