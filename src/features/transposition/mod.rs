//! Transposition-invariant chroma comparison
//!
//! - Optimal transposition index (OTI) between two sequences
//! - OTI-based binary similarity between every pair of frames
//!
//! # References
//!
//! Serra, J., Gómez, E., & Herrera, P. (2008). Transposing chroma representations
//! to a common key. *IEEE Conference on The Use of Symbols to Represent Music and
//! Multimedia Objects*.
//!
//! Serra, J., Gómez, E., Herrera, P., & Serra, X. (2008). Chroma binary similarity
//! and local alignment applied to cover song identification. *IEEE Transactions on
//! Audio, Speech, and Language Processing*, 16(6).

pub mod binary;
pub mod oti;

pub use binary::chroma_binary_sim_matrix;
pub use oti::{frame_oti, optimal_transposition_index};
