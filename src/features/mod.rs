//! Feature-sequence processing stages
//!
//! This module contains the building blocks of a cross-similarity matrix:
//! - Chroma sequence utilities (validation, global chroma, rotation)
//! - Time-delay embedding
//! - Transposition (OTI and binary OTI similarity)
//! - Distance thresholding

pub mod chroma;
pub mod distance;
pub mod embedding;
pub mod transposition;
