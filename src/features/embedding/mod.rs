//! Time-delay embedding
//!
//! Stacks `m` frames spaced `tau` apart into one vector so that each embedded
//! frame carries short-term temporal context (Serra, Serra & Andrzejak, 2009).

pub mod time_delay;

pub use time_delay::to_time_embedding;
