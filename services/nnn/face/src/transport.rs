//! The seam between a face and whatever carries its bytes.

use bytes::Bytes;

/// Lower layer a face hands encoded packets to.
///
/// Implementations report whether the frame was accepted for transmission;
/// a `false` return means the packet was dropped.
pub trait Transport {
    /// Hand a fully encoded packet to the lower layer
    fn send(&mut self, wire: Bytes) -> bool;
}

/// Transport that records every frame handed to it, for tests and loopback
#[derive(Debug, Default)]
pub struct RecordingTransport {
    frames: Vec<Bytes>,
}

impl RecordingTransport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames sent so far, oldest first
    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, wire: Bytes) -> bool {
        self.frames.push(wire);
        true
    }
}
