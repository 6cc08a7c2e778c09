//! Global chroma reduction and normalization

/// Scale a vector so its largest element becomes 1.0
///
/// Leaves the vector untouched when the maximum is not positive.
pub fn normalize_by_max(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if max > 0.0 {
        for v in values.iter_mut() {
            *v /= max;
        }
    }
}

/// Sum chroma frames per bin and normalize the result to the 0-1 range
///
/// This is the global pitch-class distribution used to compare the key of two
/// performances (Serra, Gómez & Herrera, 2008).
///
/// # Arguments
///
/// * `frames` - Chroma frames sharing one bin count
///
/// # Returns
///
/// One vector with the bin count of the input frames (empty for no frames)
pub fn global_average_chroma(frames: &[Vec<f32>]) -> Vec<f32> {
    let n_bins = frames.first().map_or(0, Vec::len);
    let mut global = vec![0.0f32; n_bins];
    for frame in frames {
        for (acc, &v) in global.iter_mut().zip(frame.iter()) {
            *acc += v;
        }
    }

    if global.iter().all(|&v| v <= 0.0) && !global.is_empty() {
        log::warn!(
            "Global chroma over {} frames has no positive energy; leaving unnormalized",
            frames.len()
        );
    }

    normalize_by_max(&mut global);
    global
}
