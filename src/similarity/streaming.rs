//! Streaming cross-similarity against a fixed reference
//!
//! Each step acquires a small window of query frames (`embed_dimension + 1`),
//! embeds it, scores it against the whole reference and releases `tau`
//! frames. Memory stays bounded to one window plus the reference.

use std::marker::PhantomData;

use super::batch::euclidean_scheme;
use super::matrix::{SimilarityMatrix, SimilarityScheme};
use crate::config::{Combination, CrossSimilarityConfig, MATCH_COEF, MISMATCH_COEF};
use crate::error::SimilarityError;
use crate::features::chroma::{rotate_sequence, validate_sequence};
use crate::features::distance::threshold_similarity;
use crate::features::embedding::to_time_embedding;
use crate::features::transposition::{chroma_binary_sim_matrix, optimal_transposition_index};
use crate::io::FrameBuffer;
use crate::linalg::MatrixMultiply;

/// Outcome of one streaming step
#[derive(Debug, Clone, PartialEq)]
pub enum StreamStatus {
    /// One similarity matrix for the current window
    Produced(SimilarityMatrix),

    /// Not enough frames yet and the input is still open; drive again later
    NeedMoreInput,

    /// Input closed with nothing left to consume
    NoInput,
}

/// Step-driven cross-similarity over a stream of query frames
///
/// Created from a [`CrossSimilarity`](super::CrossSimilarity) via
/// `streaming()`, or directly with [`StreamingCrossSimilarity::new`].
///
/// The Euclidean path always treats the query axis as all ones (the
/// optimised threshold), since a window is too short for a meaningful
/// per-row percentile.
#[derive(Debug, Clone)]
pub struct StreamingCrossSimilarity<M: MatrixMultiply> {
    /// Configuration
    config: CrossSimilarityConfig,
    /// Reference frames held for the stream's lifetime
    reference: Vec<Vec<f32>>,
    /// Embedded reference, reused across steps when no OTI rotation applies
    reference_embed: Option<Vec<Vec<f32>>>,
    /// Bin count shared by reference and query frames
    n_bins: usize,
    /// Frames requested per step
    acquire_size: usize,
    /// Frames consumed per step
    release_size: usize,
    _multiply: PhantomData<M>,
}

impl<M: MatrixMultiply> StreamingCrossSimilarity<M> {
    /// Create a streaming computation against `reference`.
    ///
    /// # Errors
    ///
    /// - `SimilarityError::Configuration` for an invalid configuration, or for
    ///   `Combination::MatrixProduct` on the Euclidean path (a one-row window
    ///   never conforms with the reference)
    /// - `SimilarityError::EmptyInput` / `DimensionMismatch` for a bad reference
    /// - `SimilarityError::DegenerateInput` if the reference is too short to
    ///   embed, or a window of `embed_dimension + 1` frames cannot be embedded
    ///   (`tau > 1` with `embed_dimension > 1`)
    pub fn new(
        config: CrossSimilarityConfig,
        reference: Vec<Vec<f32>>,
    ) -> Result<Self, SimilarityError> {
        config.validate()?;
        if !config.oti_binary && config.combination == Combination::MatrixProduct {
            return Err(SimilarityError::Configuration(
                "streaming needs combination 'crossRecurrence' when otiBinary is false".to_string(),
            ));
        }

        let window = config.min_frames();
        if config.embed_dimension > 1 && config.embed_dimension.saturating_mul(config.tau) >= window {
            return Err(SimilarityError::DegenerateInput(format!(
                "a window of {} frames cannot be embedded with m={}, tau={}",
                window, config.embed_dimension, config.tau
            )));
        }

        let n_bins = validate_sequence(&reference, "referenceFeature")?;

        let reference_embed = {
            let embedded = to_time_embedding(&reference, config.embed_dimension, config.tau)?;
            if config.oti {
                None
            } else {
                Some(embedded.into_owned())
            }
        };

        log::debug!(
            "Streaming cross-similarity: reference of {} frames, window {} frames, hop {}",
            reference.len(),
            config.min_frames(),
            config.tau
        );

        Ok(Self {
            acquire_size: config.min_frames(),
            release_size: config.tau,
            config,
            reference,
            reference_embed,
            n_bins,
            _multiply: PhantomData,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &CrossSimilarityConfig {
        &self.config
    }

    /// Reference frames (unrotated)
    pub fn reference(&self) -> &[Vec<f32>] {
        &self.reference
    }

    /// Restore the default window and hop sizes after a drained stream
    pub fn reset(&mut self) {
        self.acquire_size = self.config.min_frames();
        self.release_size = self.config.tau;
    }

    /// Run one step over `input`
    ///
    /// When the input is closed with fewer frames than a full window, the
    /// window shrinks to whatever is left and the short batch is padded by
    /// reusing its leading frames.
    ///
    /// # Errors
    ///
    /// - `SimilarityError::DimensionMismatch` if query frames disagree with the reference
    /// - `SimilarityError::EmptyMatrix` from the Euclidean path
    pub fn process(&mut self, input: &mut FrameBuffer) -> Result<StreamStatus, SimilarityError> {
        let available = input.available();
        if available < self.acquire_size {
            if !input.is_closed() {
                return Ok(StreamStatus::NeedMoreInput);
            }
            if available == 0 {
                return Ok(StreamStatus::NoInput);
            }
            log::debug!(
                "Input closed: shrinking window from {} to {} frames",
                self.acquire_size,
                available
            );
            self.acquire_size = available;
            self.release_size = available;
        }

        let mut frames = match input.acquire(self.acquire_size) {
            Some(window) => window.to_vec(),
            None => return Ok(StreamStatus::NeedMoreInput),
        };

        let query_bins = validate_sequence(&frames, "queryFeature")?;
        if query_bins != self.n_bins {
            return Err(SimilarityError::DimensionMismatch(format!(
                "query has {} bins per frame, reference has {}",
                query_bins, self.n_bins
            )));
        }

        let acquired = frames.len();
        let min_frames = self.config.min_frames();
        for i in 0..min_frames.saturating_sub(acquired) {
            let frame = frames[i % acquired].clone();
            frames.push(frame);
        }

        let matrix = self.score_window(&frames)?;
        input.release(self.release_size);
        Ok(StreamStatus::Produced(matrix))
    }

    /// Drive steps until the input runs dry, collecting every produced matrix
    pub fn run_to_end(
        &mut self,
        input: &mut FrameBuffer,
    ) -> Result<Vec<SimilarityMatrix>, SimilarityError> {
        let mut out = Vec::new();
        loop {
            match self.process(input)? {
                StreamStatus::Produced(matrix) => out.push(matrix),
                StreamStatus::NeedMoreInput | StreamStatus::NoInput => break,
            }
        }
        Ok(out)
    }

    fn score_window(&self, frames: &[Vec<f32>]) -> Result<SimilarityMatrix, SimilarityError> {
        let config = &self.config;
        let query_embed = to_time_embedding(frames, config.embed_dimension, config.tau)?;

        let rotated_embed;
        let reference_embed: &[Vec<f32>] = match &self.reference_embed {
            Some(cached) => cached,
            None => {
                let oti_idx = optimal_transposition_index(frames, &self.reference, config.noti);
                let rotated = rotate_sequence(&self.reference, oti_idx);
                rotated_embed =
                    to_time_embedding(&rotated, config.embed_dimension, config.tau)?.into_owned();
                &rotated_embed
            }
        };

        if config.oti_binary {
            let values = chroma_binary_sim_matrix(
                &query_embed,
                reference_embed,
                config.noti,
                MATCH_COEF,
                MISMATCH_COEF,
            );
            return Ok(SimilarityMatrix::new(values, SimilarityScheme::BinaryOti));
        }

        let values = threshold_similarity::<M>(
            &query_embed,
            reference_embed,
            config.kappa,
            true,
            config.combination,
        )?;
        Ok(SimilarityMatrix::new(values, euclidean_scheme(config.combination)))
    }
}
