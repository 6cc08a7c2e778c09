//! Euclidean cross-recurrence similarity
//!
//! Pairwise distances between embedded frames are binarized per row and per
//! column with an adaptive percentile threshold, then the two axes are
//! combined into one similarity matrix (Serra, Serra & Andrzejak, 2009).

pub mod threshold;

pub use threshold::{binarize_rows, binarize_rows_transposed, threshold_similarity};
