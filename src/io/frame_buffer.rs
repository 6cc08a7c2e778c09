//! Pull-based buffer of incoming query frames

use std::collections::VecDeque;

/// Queue of feature frames feeding a streaming cross-similarity step
///
/// Producers `push` frames and `close` the buffer once no more data will come.
/// The consumer looks at a window with `acquire` and drops consumed frames
/// with `release`; the two sizes may differ, so consecutive windows overlap.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    /// Pending frames, oldest first
    frames: VecDeque<Vec<f32>>,
    /// Set once the producer has signalled end of stream
    closed: bool,
}

impl FrameBuffer {
    /// Create an empty, open buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, open buffer with room for `capacity` frames
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            closed: false,
        }
    }

    /// Append a frame
    ///
    /// Frames pushed after [`close`](Self::close) are dropped.
    pub fn push(&mut self, frame: Vec<f32>) {
        if self.closed {
            log::warn!("Dropping frame pushed to a closed frame buffer");
            return;
        }
        self.frames.push_back(frame);
    }

    /// Append several frames
    pub fn extend<I: IntoIterator<Item = Vec<f32>>>(&mut self, frames: I) {
        for frame in frames {
            self.push(frame);
        }
    }

    /// Signal that no more frames will arrive
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether the producer has signalled end of stream
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of frames waiting to be consumed
    pub fn available(&self) -> usize {
        self.frames.len()
    }

    /// Borrow the oldest `n` frames without consuming them
    ///
    /// Returns `None` if fewer than `n` frames are available.
    pub fn acquire(&mut self, n: usize) -> Option<&[Vec<f32>]> {
        if n > self.frames.len() {
            return None;
        }
        let contiguous = self.frames.make_contiguous();
        Some(&contiguous[..n])
    }

    /// Drop the oldest `n` frames (fewer if not that many are buffered)
    pub fn release(&mut self, n: usize) {
        let n = n.min(self.frames.len());
        self.frames.drain(..n);
    }
}
