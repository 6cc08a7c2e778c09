//! Batch cross-similarity over whole sequences

use std::borrow::Cow;
use std::marker::PhantomData;

use super::matrix::{SimilarityMatrix, SimilarityScheme};
use super::streaming::StreamingCrossSimilarity;
use crate::config::{Combination, CrossSimilarityConfig, MATCH_COEF, MISMATCH_COEF};
use crate::error::SimilarityError;
use crate::features::chroma::{rotate_sequence, validate_pair};
use crate::features::distance::threshold_similarity;
use crate::features::embedding::to_time_embedding;
use crate::features::transposition::{chroma_binary_sim_matrix, optimal_transposition_index};
use crate::linalg::MatrixMultiply;

/// Configured cross-similarity computation, generic over the matrix product.
///
/// Holds only an immutable configuration, so one instance can serve any
/// number of threads.
///
/// # Example
///
/// ```
/// use stratum_csm::{CrossSimilarityConfig, SerialCrossSimilarity};
///
/// let config = CrossSimilarityConfig {
///     oti_binary: true,
///     embed_dimension: 1,
///     noti: 0,
///     ..Default::default()
/// };
/// let frames = vec![vec![1.0f32, 0.0, 0.0]; 5];
/// let csm = SerialCrossSimilarity::new(config)?.compute(&frames, &frames)?;
/// assert_eq!((csm.rows(), csm.cols()), (5, 5));
/// # Ok::<(), stratum_csm::SimilarityError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CrossSimilarity<M: MatrixMultiply> {
    config: CrossSimilarityConfig,
    _multiply: PhantomData<M>,
}

impl<M: MatrixMultiply> CrossSimilarity<M> {
    /// Create a cross-similarity computation with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::Configuration` if the configuration fails
    /// [`CrossSimilarityConfig::validate`].
    pub fn new(config: CrossSimilarityConfig) -> Result<Self, SimilarityError> {
        config.validate()?;
        Ok(Self {
            config,
            _multiply: PhantomData,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &CrossSimilarityConfig {
        &self.config
    }

    /// Compute the cross-similarity matrix of two whole sequences
    ///
    /// # Arguments
    ///
    /// * `query` - Query chroma frames
    /// * `reference` - Reference chroma frames (same bin count)
    ///
    /// # Errors
    ///
    /// - `SimilarityError::EmptyInput` if either sequence is empty
    /// - `SimilarityError::DimensionMismatch` for ragged sequences, differing
    ///   bin counts, or a non-conformable matrix product
    /// - `SimilarityError::DegenerateInput` if embedding leaves no frames
    /// - `SimilarityError::EmptyMatrix` if the distance matrix is empty
    pub fn compute(
        &self,
        query: &[Vec<f32>],
        reference: &[Vec<f32>],
    ) -> Result<SimilarityMatrix, SimilarityError> {
        let n_bins = validate_pair(query, reference)?;
        let config = &self.config;

        log::debug!(
            "Computing cross-similarity: {} query x {} reference frames, {} bins (oti_binary={})",
            query.len(),
            reference.len(),
            n_bins,
            config.oti_binary
        );

        if config.oti_binary {
            if config.to_blocked {
                // Stacked embeddings are only checked here; scoring runs on the raw frames
                to_time_embedding(query, config.embed_dimension, config.tau)?;
                to_time_embedding(reference, config.embed_dimension, config.tau)?;
            }
            let values =
                chroma_binary_sim_matrix(query, reference, config.noti, MATCH_COEF, MISMATCH_COEF);
            return Ok(SimilarityMatrix::new(values, SimilarityScheme::BinaryOti));
        }

        let reference: Cow<'_, [Vec<f32>]> = if config.oti {
            let oti_idx = optimal_transposition_index(query, reference, config.noti);
            Cow::Owned(rotate_sequence(reference, oti_idx))
        } else {
            Cow::Borrowed(reference)
        };

        let query_embed = to_time_embedding(query, config.embed_dimension, config.tau)?;
        let reference_embed = to_time_embedding(&reference, config.embed_dimension, config.tau)?;

        let values = threshold_similarity::<M>(
            &query_embed,
            &reference_embed,
            config.kappa,
            config.optimise_threshold,
            config.combination,
        )?;
        Ok(SimilarityMatrix::new(values, euclidean_scheme(config.combination)))
    }

    /// Start a streaming computation against a fixed reference sequence.
    ///
    /// See [`StreamingCrossSimilarity`].
    pub fn streaming(
        &self,
        reference: Vec<Vec<f32>>,
    ) -> Result<StreamingCrossSimilarity<M>, SimilarityError> {
        StreamingCrossSimilarity::new(self.config.clone(), reference)
    }
}

pub(crate) fn euclidean_scheme(combination: Combination) -> SimilarityScheme {
    match combination {
        Combination::MatrixProduct => SimilarityScheme::EuclideanProduct,
        Combination::CrossRecurrence => SimilarityScheme::EuclideanCrossRecurrence,
    }
}
