//! Optimal transposition index

use crate::features::chroma::{global_average_chroma, rotate_bins};
use crate::linalg::{argmax, dot_product};

/// Circular shift in `[0, nshifts]` that best aligns `b` with `a`
///
/// Dots `a` with `b` rotated by each candidate shift and returns the index of
/// the largest value (lowest shift on ties).
pub fn frame_oti(a: &[f32], b: &[f32], nshifts: usize) -> usize {
    let value_at_shifts: Vec<f32> = (0..=nshifts)
        .map(|k| dot_product(a, &rotate_bins(b, k)))
        .collect();
    argmax(&value_at_shifts)
}

/// Compute the optimal transposition index of `chroma_b` towards the key of `chroma_a`
///
/// Both sequences are reduced to their max-normalized global chroma, then
/// compared at every circular shift `0..=nshifts`. Rotating each frame of
/// `chroma_b` by the returned index (see
/// [`rotate_sequence`](crate::features::chroma::rotate_sequence)) transposes it
/// to the key of `chroma_a`.
///
/// # Arguments
///
/// * `chroma_a` - Query chroma frames
/// * `chroma_b` - Reference chroma frames (same bin count)
/// * `nshifts` - Highest shift tried
///
/// # Returns
///
/// Shift index in `[0, nshifts]`
///
/// # Example
///
/// ```
/// use stratum_csm::features::chroma::rotate_sequence;
/// use stratum_csm::features::transposition::optimal_transposition_index;
///
/// let mut frame = vec![0.0f32; 12];
/// frame[0] = 1.0;
/// frame[4] = 0.6;
/// frame[7] = 0.8;
/// let query = vec![frame.clone(); 4];
/// // Reference played three semitones lower
/// let reference = rotate_sequence(&query, 9);
///
/// assert_eq!(optimal_transposition_index(&query, &reference, 12), 3);
/// ```
pub fn optimal_transposition_index(
    chroma_a: &[Vec<f32>],
    chroma_b: &[Vec<f32>],
    nshifts: usize,
) -> usize {
    let global_a = global_average_chroma(chroma_a);
    let global_b = global_average_chroma(chroma_b);
    let oti = frame_oti(&global_a, &global_b, nshifts);

    log::debug!(
        "Optimal transposition index: {} (of {} shifts, {} vs {} frames)",
        oti,
        nshifts + 1,
        chroma_a.len(),
        chroma_b.len()
    );

    oti
}
