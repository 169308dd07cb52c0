//! General-purpose growable byte buffer.

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Owned byte sequence with lexicographic ordering.
///
/// A `Blob` has no identity beyond its content; two blobs holding the same
/// bytes are interchangeable.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Blob(Vec<u8>);

impl Blob {
    /// Create an empty blob
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create a blob holding a copy of `bytes`
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Append a single byte
    pub fn push(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Append a byte slice
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// View the content as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Exchange contents with another blob without copying
    pub fn swap(&mut self, other: &mut Blob) {
        std::mem::swap(&mut self.0, &mut other.0);
    }

    /// Consume the blob, returning the underlying vector
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl DerefMut for Blob {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl From<&str> for Blob {
    fn from(text: &str) -> Self {
        Self::from_slice(text.as_bytes())
    }
}

impl Extend<u8> for Blob {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
