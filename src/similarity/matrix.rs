//! Cross-similarity matrix result type

/// Which pipeline produced a similarity matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityScheme {
    /// Per-pair OTI match/mismatch scoring
    BinaryOti,

    /// Thresholded Euclidean distances joined by matrix product
    EuclideanProduct,

    /// Thresholded Euclidean distances joined element-wise
    EuclideanCrossRecurrence,
}

/// Cross-similarity matrix between a query and a reference sequence
///
/// Rows index query frames, columns index reference frames (after any
/// embedding).
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Vec<Vec<f32>>,
    scheme: SimilarityScheme,
}

impl SimilarityMatrix {
    pub(crate) fn new(values: Vec<Vec<f32>>, scheme: SimilarityScheme) -> Self {
        Self { values, scheme }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// Value at `(row, col)`, if in bounds
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Row-major values
    pub fn values(&self) -> &[Vec<f32>] {
        &self.values
    }

    /// Take ownership of the row-major values
    pub fn into_values(self) -> Vec<Vec<f32>> {
        self.values
    }

    /// Pipeline that produced this matrix
    pub fn scheme(&self) -> SimilarityScheme {
        self.scheme
    }

    /// Whether every entry is 0 or 1
    pub fn is_binary(&self) -> bool {
        self.values.iter().flatten().all(|&v| v == 0.0 || v == 1.0)
    }

    /// Fraction of non-zero entries (recurrence rate)
    pub fn density(&self) -> f32 {
        let total = self.rows() * self.cols();
        if total == 0 {
            return 0.0;
        }
        let nonzero = self.values.iter().flatten().filter(|&&v| v != 0.0).count();
        nonzero as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let m = SimilarityMatrix::new(
            vec![vec![1.0, 0.0, 1.0], vec![0.0, 0.0, 1.0]],
            SimilarityScheme::BinaryOti,
        );
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(1, 2), Some(1.0));
        assert_eq!(m.get(2, 0), None);
        assert!(m.is_binary());
        assert!((m.density() - 0.5).abs() < 1e-6);
        assert_eq!(m.scheme(), SimilarityScheme::BinaryOti);
        assert_eq!(m.into_values()[0], vec![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_counts_are_not_binary() {
        let m = SimilarityMatrix::new(vec![vec![2.0, 0.0]], SimilarityScheme::EuclideanProduct);
        assert!(!m.is_binary());
    }
}
