//! Stacked chroma embedding

use std::borrow::Cow;

use crate::error::SimilarityError;

/// Construct a time-delay embedding of a feature sequence
///
/// With `m == 1` the input is returned as-is. Otherwise the output has
/// `frames.len() - m * tau` rows of `n_bins * m` values. Row `i` is populated
/// for `i = 0, tau, 2 * tau, ...` with the concatenation of frames
/// `i, i + tau, ..., i + (m - 1) * tau`; rows off that stride are zero vectors.
///
/// # Arguments
///
/// * `frames` - Input feature sequence (all frames same bin count)
/// * `m` - Embedding dimension (number of stacked frames)
/// * `tau` - Stride between stacked frames
///
/// # Errors
///
/// Returns `SimilarityError::DegenerateInput` if `m * tau >= frames.len()` and
/// `SimilarityError::Configuration` if `m` or `tau` is zero
///
/// # Example
///
/// ```
/// use stratum_csm::features::embedding::to_time_embedding;
///
/// let frames = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0], vec![0.0, 0.0]];
/// let embedded = to_time_embedding(&frames, 2, 1)?;
/// assert_eq!(embedded.len(), 2);
/// assert_eq!(embedded[0], vec![1.0, 0.0, 0.0, 1.0]);
/// # Ok::<(), stratum_csm::SimilarityError>(())
/// ```
pub fn to_time_embedding(
    frames: &[Vec<f32>],
    m: usize,
    tau: usize,
) -> Result<Cow<'_, [Vec<f32>]>, SimilarityError> {
    if m == 0 || tau == 0 {
        return Err(SimilarityError::Configuration(format!(
            "Embedding needs m >= 1 and tau >= 1, got m={}, tau={}",
            m, tau
        )));
    }

    if m == 1 {
        return Ok(Cow::Borrowed(frames));
    }

    let increment = m.checked_mul(tau).unwrap_or(usize::MAX);
    if increment >= frames.len() {
        return Err(SimilarityError::DegenerateInput(format!(
            "embedding of {} frames with m={}, tau={} leaves no usable frames",
            frames.len(),
            m,
            tau
        )));
    }

    let frame_size = frames.len() - increment;
    let n_bins = frames[0].len();
    let mut embedding = vec![vec![0.0f32; n_bins * m]; frame_size];

    for i in (0..frame_size).step_by(tau) {
        let row = &mut embedding[i];
        for (slot, start) in (i..i + increment).step_by(tau).enumerate() {
            row[slot * n_bins..(slot + 1) * n_bins].copy_from_slice(&frames[start]);
        }
    }

    log::debug!(
        "Time embedding: {} frames -> {} rows of dimension {} (m={}, tau={})",
        frames.len(),
        frame_size,
        n_bins * m,
        m,
        tau
    );

    Ok(Cow::Owned(embedding))
}
