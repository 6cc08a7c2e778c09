//! Streaming input
//!
//! Pull-based frame buffering for the streaming cross-similarity step.

pub mod frame_buffer;

pub use frame_buffer::FrameBuffer;
