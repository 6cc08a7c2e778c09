//! Chroma sequence utilities
//!
//! Helpers over sequences of pitch-class vectors:
//! - Shape validation
//! - Global chroma reduction and max normalization
//! - Circular bin rotation

pub mod normalization;
pub mod rotation;

pub use normalization::{global_average_chroma, normalize_by_max};
pub use rotation::{rotate_bins, rotate_sequence};

use crate::error::SimilarityError;

/// Validate a feature sequence and return its bin count
///
/// # Errors
///
/// Returns `SimilarityError::EmptyInput` if the sequence has no frames and
/// `SimilarityError::DimensionMismatch` if frames disagree on bin count or
/// have zero bins
pub fn validate_sequence(frames: &[Vec<f32>], name: &str) -> Result<usize, SimilarityError> {
    let first = frames.first().ok_or_else(|| {
        SimilarityError::EmptyInput(format!("input {} array is empty", name))
    })?;

    let n_bins = first.len();
    if n_bins == 0 {
        return Err(SimilarityError::DimensionMismatch(format!(
            "{} frames have zero bins",
            name
        )));
    }

    for (i, frame) in frames.iter().enumerate() {
        if frame.len() != n_bins {
            return Err(SimilarityError::DimensionMismatch(format!(
                "{} frame at index {} has {} bins, expected {}",
                name,
                i,
                frame.len(),
                n_bins
            )));
        }
    }

    Ok(n_bins)
}

/// Validate a query/reference pair: both non-empty, rectangular, same bin count.
pub fn validate_pair(query: &[Vec<f32>], reference: &[Vec<f32>]) -> Result<usize, SimilarityError> {
    // Emptiness of either side is reported before any shape check
    if query.is_empty() {
        return Err(SimilarityError::EmptyInput(
            "input queryFeature array is empty".to_string(),
        ));
    }
    if reference.is_empty() {
        return Err(SimilarityError::EmptyInput(
            "input referenceFeature array is empty".to_string(),
        ));
    }

    let query_bins = validate_sequence(query, "queryFeature")?;
    let reference_bins = validate_sequence(reference, "referenceFeature")?;
    if query_bins != reference_bins {
        return Err(SimilarityError::DimensionMismatch(format!(
            "query has {} bins per frame, reference has {}",
            query_bins, reference_bins
        )));
    }
    Ok(query_bins)
}
