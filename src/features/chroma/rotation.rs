//! Circular pitch-class rotation
//!
//! A shift of `k` moves bin `b` to `(b + k) % n_bins`, i.e. the last `k` bins
//! wrap around to the front. Shifts larger than the bin count wrap.

/// Return a copy of `frame` rotated by `shift` bins.
pub fn rotate_bins(frame: &[f32], shift: usize) -> Vec<f32> {
    let mut out = frame.to_vec();
    let n = out.len();
    if n > 0 {
        out.rotate_right(shift % n);
    }
    out
}

/// Rotate every frame of a sequence by the same number of bins
///
/// The input is left untouched; a new sequence is returned.
pub fn rotate_sequence(frames: &[Vec<f32>], shift: usize) -> Vec<Vec<f32>> {
    frames.iter().map(|frame| rotate_bins(frame, shift)).collect()
}
