//! A single labeled binary segment of an NNN address.

use crate::blob::Blob;
use crate::error::NameError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Marker byte for sequence-number components
pub const SEQ_MARKER: u8 = 0x00;
/// Marker byte for control-number components
pub const CONTROL_MARKER: u8 = 0xC1;
/// Marker byte for block-id components
pub const BLOCK_ID_MARKER: u8 = 0xFB;
/// Marker byte for version components
pub const VERSION_MARKER: u8 = 0xFD;

/// Bytes that pass through URI encoding unescaped: `[A-Za-z0-9+\-._]`
fn is_unescaped(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'-' | b'.' | b'_')
}

/// One segment of an NNN address.
///
/// A component is a byte blob with a canonical ordering of its own: shorter
/// components sort first, and equal-length components compare by the numeric
/// value of their bytes rather than lexicographically.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component(Blob);

impl Component {
    /// Create an empty component
    pub fn new() -> Self {
        Self(Blob::new())
    }

    /// Create a component from raw bytes, without any conversion
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(Blob::from_slice(bytes))
    }

    /// Decode a URI-escaped string into a component.
    ///
    /// Characters outside `[A-Za-z0-9+\-._]` must appear as `%XX` escapes;
    /// anything else fails with the offending byte position.
    pub fn from_uri(uri: &str) -> Result<Self, NameError> {
        let bytes = uri.as_bytes();
        let mut out = Blob::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hi = bytes
                    .get(i + 1)
                    .and_then(|&b| hex_value(b))
                    .ok_or(NameError::Escape(i))?;
                let lo = bytes
                    .get(i + 2)
                    .and_then(|&b| hex_value(b))
                    .ok_or(NameError::Escape(i))?;
                out.push((hi << 4) | lo);
                i += 3;
            } else if is_unescaped(bytes[i]) {
                out.push(bytes[i]);
                i += 1;
            } else {
                return Err(NameError::Escape(i));
            }
        }
        Ok(Self(out))
    }

    /// Encode a number as the minimal big-endian byte sequence.
    ///
    /// Zero encodes to an empty component.
    pub fn from_number(mut number: u64) -> Self {
        let mut bytes = Vec::new();
        while number > 0 {
            bytes.push((number & 0xFF) as u8);
            number >>= 8;
        }
        bytes.reverse();
        Self(Blob::from(bytes))
    }

    /// Encode a number prefixed with a naming-convention marker byte.
    ///
    /// Known markers: [`SEQ_MARKER`], [`CONTROL_MARKER`], [`BLOCK_ID_MARKER`],
    /// [`VERSION_MARKER`].
    pub fn from_number_with_marker(mut number: u64, marker: u8) -> Self {
        let mut bytes = vec![marker];
        let value_start = bytes.len();
        while number > 0 {
            bytes.push((number & 0xFF) as u8);
            number >>= 8;
        }
        bytes[value_start..].reverse();
        Self(Blob::from(bytes))
    }

    /// Parse a hexadecimal text label into a numeric component
    pub fn from_dot_hex(label: &str) -> Result<Self, NameError> {
        let value = u64::from_str_radix(label, 16)
            .map_err(|_| NameError::HexLabel(label.to_string()))?;
        Ok(Self::from_number(value))
    }

    /// Interpret the bytes as a big-endian unsigned integer.
    ///
    /// An empty component has the numeric value 0.
    pub fn to_number(&self) -> u64 {
        let mut ret: u64 = 0;
        for &byte in self.0.iter() {
            ret <<= 8;
            ret |= byte as u64;
        }
        ret
    }

    /// Big-endian decode, validating that the first byte equals `marker`
    pub fn to_number_with_marker(&self, marker: u8) -> Result<u64, NameError> {
        if self.0.first() != Some(&marker) {
            return Err(NameError::MarkerMismatch {
                marker,
                uri: self.to_uri(),
            });
        }
        let mut ret: u64 = 0;
        for &byte in self.0[1..].iter() {
            ret <<= 8;
            ret |= byte as u64;
        }
        Ok(ret)
    }

    /// Decode assuming the sequence-number convention (marker 0x00)
    pub fn to_seq_num(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(SEQ_MARKER)
    }

    /// Decode assuming the control-number convention (marker 0xC1)
    pub fn to_control_num(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(CONTROL_MARKER)
    }

    /// Decode assuming the block-id convention (marker 0xFB)
    pub fn to_block_id(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(BLOCK_ID_MARKER)
    }

    /// Decode assuming the version convention (marker 0xFD)
    pub fn to_version(&self) -> Result<u64, NameError> {
        self.to_number_with_marker(VERSION_MARKER)
    }

    /// Render the component as a URI-escaped string.
    ///
    /// A component consisting of zero or more periods is prefixed with `...`
    /// to disambiguate it from the address separator.
    pub fn to_uri(&self) -> String {
        let mut out = String::new();
        if self.0.iter().all(|&b| b == b'.') {
            out.push_str("...");
            for _ in 0..self.0.len() {
                out.push('.');
            }
        } else {
            for &byte in self.0.iter() {
                if is_unescaped(byte) {
                    out.push(byte as char);
                } else {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
        out
    }

    /// Render the numeric value as uppercase hexadecimal text
    pub fn to_hex(&self) -> String {
        format!("{:X}", self.to_number())
    }

    /// Canonical comparison: byte-length first, then numeric value
    pub fn compare(&self, other: &Component) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.to_number().cmp(&other.to_number()))
    }

    /// Exchange contents with another component without copying
    pub fn swap(&mut self, other: &mut Component) {
        self.0.swap(&mut other.0);
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Deref for Component {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Blob> for Component {
    fn from(blob: Blob) -> Self {
        Self(blob)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
