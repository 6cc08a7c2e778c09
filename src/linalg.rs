//! Dense numeric helpers over row-major `Vec<Vec<f32>>` matrices
//!
//! Dot product, argmax, percentile, transpose, pairwise distances and the
//! [`MatrixMultiply`] capability used to combine thresholded similarity axes.

use crate::error::SimilarityError;

/// Compute dot product between two vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Index of the largest value; the first one wins on ties.
///
/// Returns 0 for an empty slice. NaN values never win.
pub fn argmax(values: &[f32]) -> usize {
    let mut best_idx = 0;
    let mut best = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best {
            best = v;
            best_idx = i;
        }
    }
    best_idx
}

/// Percentile with linear interpolation between closest ranks
///
/// `q` is in percent (`0.0..=100.0`). The rank is `(n - 1) * q / 100`.
///
/// # Errors
///
/// Returns `SimilarityError::EmptyInput` for an empty slice and
/// `SimilarityError::Configuration` if `q` is outside `[0, 100]`
pub fn percentile(values: &[f32], q: f32) -> Result<f32, SimilarityError> {
    if values.is_empty() {
        return Err(SimilarityError::EmptyInput(
            "Empty values for percentile calculation".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(SimilarityError::Configuration(format!(
            "Percentile must be in [0.0, 100.0], got {}",
            q
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = (sorted.len() - 1) as f32 * q / 100.0;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(sorted.len() - 1);
    let frac = rank - lo as f32;

    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Transpose a rectangular matrix.
pub fn transpose(matrix: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let cols = matrix.first().map_or(0, Vec::len);
    let mut out = vec![vec![0.0f32; matrix.len()]; cols];
    for (i, row) in matrix.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            out[j][i] = v;
        }
    }
    out
}

/// Euclidean distance between every row of `a` and every row of `b`
///
/// Output is `a.len() × b.len()`.
pub fn pairwise_distance(a: &[Vec<f32>], b: &[Vec<f32>]) -> Vec<Vec<f32>> {
    a.iter()
        .map(|x| {
            b.iter()
                .map(|y| {
                    x.iter()
                        .zip(y.iter())
                        .map(|(p, q)| (p - q) * (p - q))
                        .sum::<f32>()
                        .sqrt()
                })
                .collect()
        })
        .collect()
}

/// Matrix product over rectangular real arrays
///
/// Algorithms are generic over `M: MatrixMultiply` so the product can be
/// swapped (e.g. for the rayon-backed [`ParallelMultiply`]) without touching
/// the thresholding code.
pub trait MatrixMultiply: Send + Sync {
    /// Multiply `a` (`n × k`) by `b` (`k × p`), giving `n × p`.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::DimensionMismatch` if the inner dimensions
    /// disagree or `b` is ragged.
    fn multiply(a: &[Vec<f32>], b: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, SimilarityError>;
}

/// Straightforward triple-loop product on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialMultiply;

impl MatrixMultiply for SerialMultiply {
    fn multiply(a: &[Vec<f32>], b: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, SimilarityError> {
        let p = check_conformable(a, b)?;
        Ok(a.iter().map(|row| multiply_row(row, b, p)).collect())
    }
}

/// Row-parallel product on the rayon pool
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelMultiply;

#[cfg(feature = "parallel")]
impl MatrixMultiply for ParallelMultiply {
    fn multiply(a: &[Vec<f32>], b: &[Vec<f32>]) -> Result<Vec<Vec<f32>>, SimilarityError> {
        use rayon::prelude::*;

        let p = check_conformable(a, b)?;
        Ok(a.par_iter().map(|row| multiply_row(row, b, p)).collect())
    }
}

/// Validate shapes and return the output column count.
fn check_conformable(a: &[Vec<f32>], b: &[Vec<f32>]) -> Result<usize, SimilarityError> {
    let k = b.len();
    for (i, row) in a.iter().enumerate() {
        if row.len() != k {
            return Err(SimilarityError::DimensionMismatch(format!(
                "Cannot multiply: left row {} has {} columns, right matrix has {} rows",
                i,
                row.len(),
                k
            )));
        }
    }
    let p = b.first().map_or(0, Vec::len);
    if b.iter().any(|row| row.len() != p) {
        return Err(SimilarityError::DimensionMismatch(
            "Cannot multiply: right matrix is ragged".to_string(),
        ));
    }
    Ok(p)
}

fn multiply_row(row: &[f32], b: &[Vec<f32>], p: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; p];
    for (&a_ik, b_row) in row.iter().zip(b.iter()) {
        if a_ik == 0.0 {
            continue;
        }
        for (o, &b_kj) in out.iter_mut().zip(b_row.iter()) {
            *o += a_ik * b_kj;
        }
    }
    out
}
