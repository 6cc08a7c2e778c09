//! Error types for cross-similarity computation

use std::fmt;

/// Errors that can occur while building a cross-similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Query or reference sequence has no frames
    EmptyInput(String),

    /// Embedding parameters leave no usable frames
    DegenerateInput(String),

    /// Pairwise distance computation produced an empty matrix
    EmptyMatrix(String),

    /// Invalid or mistyped configuration value
    Configuration(String),

    /// Frame bin counts disagree within or across sequences
    DimensionMismatch(String),
}

impl fmt::Display for SimilarityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityError::EmptyInput(msg) => write!(f, "Empty input: {}", msg),
            SimilarityError::DegenerateInput(msg) => write!(f, "Degenerate input: {}", msg),
            SimilarityError::EmptyMatrix(msg) => write!(f, "Empty matrix: {}", msg),
            SimilarityError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            SimilarityError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {}", msg),
        }
    }
}

impl std::error::Error for SimilarityError {}
