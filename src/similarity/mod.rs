//! Cross-similarity orchestration
//!
//! Selects and sequences the feature stages according to configuration:
//! - Batch computation over whole sequences
//! - Step-driven streaming against a fixed reference
//! - Result matrix type

pub mod batch;
pub mod matrix;
pub mod streaming;

pub use batch::CrossSimilarity;
pub use matrix::{SimilarityMatrix, SimilarityScheme};
pub use streaming::{StreamStatus, StreamingCrossSimilarity};
