//! # Stratum CSM
//!
//! Cross-similarity matrices between two chroma (pitch-class) feature
//! sequences, for cover song identification and structural alignment of two
//! performances.
//!
//! ## Features
//!
//! - **Time-delay embedding**: stacked chroma frames for short-term context
//! - **Optimal transposition index**: key-invariant alignment of the reference
//! - **Euclidean cross recurrence**: percentile-thresholded pairwise distances
//! - **Binary OTI similarity**: per-frame-pair transposition matching
//! - **Streaming**: bounded-window computation over a pull-based frame buffer
//!
//! ## Quick Start
//!
//! ```
//! use stratum_csm::{cross_similarity_matrix, CrossSimilarityConfig};
//!
//! // Chroma frames (e.g. 12-bin HPCP), one vector per frame
//! let query: Vec<Vec<f32>> = (0..40)
//!     .map(|i| (0..12).map(|b| ((i + b) % 12) as f32 / 12.0).collect())
//!     .collect();
//! let reference = query.clone();
//!
//! let csm = cross_similarity_matrix(&query, &reference, &CrossSimilarityConfig::default())?;
//! println!("{} x {} cross-similarity matrix", csm.rows(), csm.cols());
//! # Ok::<(), stratum_csm::SimilarityError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Chroma → (OTI rotation) → Time Embedding → Thresholded Distances | Binary OTI → Matrix
//! ```
//!
//! # References
//!
//! - Serra, J., Gómez, E., & Herrera, P. (2008). Transposing chroma representations to a common key.
//! - Serra, J., Serra, X., & Andrzejak, R. G. (2009). Cross recurrence quantification for cover
//!   song identification. *New Journal of Physics*.
//! - Serra, J., et al. (2008). Chroma binary similarity and local alignment applied to cover song
//!   identification. *IEEE TASLP* 16(6).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod linalg;
pub mod similarity;

// Re-export main types
pub use config::{Combination, CrossSimilarityConfig, MATCH_COEF, MISMATCH_COEF};
pub use error::SimilarityError;
pub use io::FrameBuffer;
pub use linalg::{MatrixMultiply, SerialMultiply};
pub use similarity::{
    CrossSimilarity, SimilarityMatrix, SimilarityScheme, StreamStatus, StreamingCrossSimilarity,
};

#[cfg(feature = "parallel")]
pub use linalg::ParallelMultiply;

/// Cross-similarity on the calling thread.
pub type SerialCrossSimilarity = CrossSimilarity<SerialMultiply>;

/// Cross-similarity with row-parallel matrix products.
#[cfg(feature = "parallel")]
pub type ParallelCrossSimilarity = CrossSimilarity<ParallelMultiply>;

/// Main batch function
///
/// Computes the cross-similarity matrix between a query and a reference
/// chroma sequence with the serial matrix product.
///
/// # Arguments
///
/// * `query` - Query chroma frames, all of one bin count
/// * `reference` - Reference chroma frames, same bin count as the query
/// * `config` - Cross-similarity configuration
///
/// # Returns
///
/// `SimilarityMatrix` with one row per (embedded) query frame
///
/// # Errors
///
/// Returns `SimilarityError` if the configuration is invalid, an input is
/// empty or ragged, or the embedding leaves no frames
///
/// # Example
///
/// ```
/// use stratum_csm::{cross_similarity_matrix, CrossSimilarityConfig};
///
/// let config = CrossSimilarityConfig {
///     oti_binary: true,
///     embed_dimension: 1,
///     noti: 0,
///     ..Default::default()
/// };
/// let mut frame = vec![0.0f32; 12];
/// frame[0] = 1.0;
/// let frames = vec![frame; 5];
///
/// let csm = cross_similarity_matrix(&frames, &frames, &config)?;
/// assert!(csm.values().iter().flatten().all(|&v| v == 1.0));
/// # Ok::<(), stratum_csm::SimilarityError>(())
/// ```
pub fn cross_similarity_matrix(
    query: &[Vec<f32>],
    reference: &[Vec<f32>],
    config: &CrossSimilarityConfig,
) -> Result<SimilarityMatrix, SimilarityError> {
    SerialCrossSimilarity::new(config.clone())?.compute(query, reference)
}
