//! OTI-based binary similarity matrix

use super::oti::frame_oti;

/// Minimum number of rows before dispatching to the rayon pool.
#[cfg(feature = "parallel")]
const MIN_PARALLEL_ROWS: usize = 64;

/// Compute a binary similarity matrix from two chroma sequences using per-pair OTI
///
/// For every pair `(i, j)` the best circular shift of `chroma_b[j]` against
/// `chroma_a[i]` is searched over `0..=nshifts`. A shift of 0 or 1 semitone
/// counts as a match.
///
/// # Arguments
///
/// * `chroma_a` - Query frames (raw or embedded)
/// * `chroma_b` - Reference frames (same dimension as `chroma_a`)
/// * `nshifts` - Highest shift tried
/// * `match_coef` - Value for matching pairs
/// * `mismatch_coef` - Value for all other pairs
///
/// # Returns
///
/// `chroma_a.len() × chroma_b.len()` matrix holding only `match_coef` and
/// `mismatch_coef`
pub fn chroma_binary_sim_matrix(
    chroma_a: &[Vec<f32>],
    chroma_b: &[Vec<f32>],
    nshifts: usize,
    match_coef: f32,
    mismatch_coef: f32,
) -> Vec<Vec<f32>> {
    log::debug!(
        "Binary OTI similarity: {} x {} frames, {} shifts",
        chroma_a.len(),
        chroma_b.len(),
        nshifts + 1
    );

    let score_row = |frame_a: &Vec<f32>| -> Vec<f32> {
        chroma_b
            .iter()
            .map(|frame_b| match frame_oti(frame_a, frame_b, nshifts) {
                0 | 1 => match_coef,
                _ => mismatch_coef,
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    if chroma_a.len() >= MIN_PARALLEL_ROWS {
        use rayon::prelude::*;
        return chroma_a.par_iter().map(score_row).collect();
    }

    chroma_a.iter().map(score_row).collect()
}
