//! NULL packet: an opaque payload with no addressing information, used
//! before any name has been enrolled.

use crate::codec::{get_common_header, put_common_header, COMMON_HEADER_SIZE};
use crate::{PacketType, WireError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

/// NULL packet
#[derive(Debug, Clone)]
pub struct NullP {
    ttl: u16,
    payload: Bytes,
    wire: Option<Bytes>,
}

impl NullP {
    /// Wire type tag
    pub const TAG: u32 = PacketType::Null as u32;

    /// Create an empty NULL packet with a zero TTL
    pub fn new() -> Self {
        Self {
            ttl: 0,
            payload: Bytes::new(),
            wire: None,
        }
    }

    /// Create a NULL packet carrying `payload`, with a TTL of 1
    pub fn with_payload(payload: Bytes) -> Self {
        Self {
            ttl: 1,
            payload,
            wire: None,
        }
    }

    /// TTL in seconds
    pub fn ttl(&self) -> u16 {
        self.ttl
    }

    /// Set the TTL, invalidating any cached encoding
    pub fn set_ttl(&mut self, ttl: u16) {
        self.ttl = ttl;
        self.wire = None;
    }

    /// Opaque payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Replace the payload, invalidating any cached encoding
    pub fn set_payload(&mut self, payload: Bytes) {
        self.payload = payload;
        self.wire = None;
    }

    /// Cached wire encoding, if one exists
    pub fn wire(&self) -> Option<&Bytes> {
        self.wire.as_ref()
    }

    /// Total encoded size in bytes
    pub fn serialized_size(&self) -> usize {
        COMMON_HEADER_SIZE + self.payload.len()
    }

    /// Encode to wire bytes, reusing the cached encoding when present
    pub fn to_wire(&mut self) -> Result<Bytes, WireError> {
        if let Some(wire) = &self.wire {
            return Ok(wire.clone());
        }
        let total = self.serialized_size();
        trace!(size = total, "serializing NULL packet");

        let mut buf = BytesMut::with_capacity(total);
        put_common_header(&mut buf, Self::TAG, total, self.ttl)?;
        buf.put_slice(&self.payload);

        let wire = buf.freeze();
        self.wire = Some(wire.clone());
        Ok(wire)
    }

    /// Decode from wire bytes, caching the consumed bytes as the encoding
    pub fn from_wire(mut buf: Bytes) -> Result<Self, WireError> {
        let full = buf.clone();
        let start = buf.remaining();

        let (rest, ttl) = get_common_header(&mut buf, Self::TAG)?;
        if buf.remaining() < rest {
            return Err(WireError::Incomplete);
        }
        let payload = buf.copy_to_bytes(rest);

        let consumed = start - buf.remaining();
        let packet = Self {
            ttl,
            payload,
            wire: Some(full.slice(..consumed)),
        };
        let computed = packet.serialized_size();
        if consumed != computed {
            return Err(WireError::Consistency { consumed, computed });
        }
        Ok(packet)
    }
}

impl Default for NullP {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = NullP::new();
        assert_eq!(p.ttl(), 0);
        assert!(p.payload().is_empty());

        let p = NullP::with_payload(Bytes::from_static(b"hi"));
        assert_eq!(p.ttl(), 1);
    }

    #[test]
    fn test_round_trip() {
        let mut p = NullP::with_payload(Bytes::from_static(b"payload"));
        p.set_ttl(3);
        let wire = p.to_wire().unwrap();
        assert_eq!(wire.len(), p.serialized_size());

        let decoded = NullP::from_wire(wire.clone()).unwrap();
        assert_eq!(decoded.ttl(), 3);
        assert_eq!(decoded.payload(), &Bytes::from_static(b"payload"));
        assert_eq!(decoded.wire(), Some(&wire));
    }

    #[test]
    fn test_cache_invalidated_by_mutation() {
        let mut p = NullP::new();
        let first = p.to_wire().unwrap();
        p.set_ttl(9);
        assert!(p.wire().is_none());
        let second = p.to_wire().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_tag_rejected() {
        let mut p = NullP::new();
        let mut wire = BytesMut::from(&p.to_wire().unwrap()[..]);
        wire[3] = 2;
        assert!(matches!(
            NullP::from_wire(wire.freeze()),
            Err(WireError::UnexpectedType { .. })
        ));
    }
}
