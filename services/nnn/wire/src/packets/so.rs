//! SO packet: a solicitation carrying the requester's own address and an
//! opaque payload.

use crate::codec::{
    get_common_header, get_name, put_common_header, put_name, serialized_size_name,
    COMMON_HEADER_SIZE,
};
use crate::{PacketType, WireError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use nnn_naming::NNNAddress;
use tracing::trace;

/// Solicitation packet
#[derive(Debug, Clone)]
pub struct So {
    ttl: u16,
    name: Option<NNNAddress>,
    payload: Bytes,
    wire: Option<Bytes>,
}

impl So {
    /// Wire type tag
    pub const TAG: u32 = PacketType::So as u32;

    /// Create an empty solicitation with no address and a zero TTL
    pub fn new() -> Self {
        Self {
            ttl: 0,
            name: None,
            payload: Bytes::new(),
            wire: None,
        }
    }

    /// Create a solicitation from `name` carrying `payload`, with a TTL of 1
    pub fn with_payload(name: NNNAddress, payload: Bytes) -> Self {
        Self {
            ttl: 1,
            name: Some(name),
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

    /// Source address; fails if none has been assigned
    pub fn name(&self) -> Result<&NNNAddress, WireError> {
        self.name.as_ref().ok_or(WireError::AddressNotSet)
    }

    /// Assign the source address, invalidating any cached encoding
    pub fn set_name(&mut self, name: NNNAddress) {
        self.name = Some(name);
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

    /// Total encoded size in bytes; fails if no address has been assigned
    pub fn serialized_size(&self) -> Result<usize, WireError> {
        Ok(self.size_with(self.name()?))
    }

    fn size_with(&self, name: &NNNAddress) -> usize {
        COMMON_HEADER_SIZE + serialized_size_name(name) + self.payload.len()
    }

    /// Encode to wire bytes, reusing the cached encoding when present
    pub fn to_wire(&mut self) -> Result<Bytes, WireError> {
        if let Some(wire) = &self.wire {
            return Ok(wire.clone());
        }
        let name = self.name.as_ref().ok_or(WireError::AddressNotSet)?;
        let total = self.size_with(name);
        trace!(size = total, "serializing SO packet");

        let mut buf = BytesMut::with_capacity(total);
        put_common_header(&mut buf, Self::TAG, total, self.ttl)?;
        put_name(&mut buf, name);
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
        let before_name = buf.remaining();
        let name = get_name(&mut buf)?;
        let name_len = before_name - buf.remaining();
        let payload_len = rest.checked_sub(name_len).ok_or(WireError::Malformed)?;
        if buf.remaining() < payload_len {
            return Err(WireError::Incomplete);
        }
        let payload = buf.copy_to_bytes(payload_len);

        let consumed = start - buf.remaining();
        let packet = Self {
            ttl,
            name: Some(name),
            payload,
            wire: Some(full.slice(..consumed)),
        };
        let computed = packet.size_with(packet.name.as_ref().unwrap());
        if consumed != computed {
            return Err(WireError::Consistency { consumed, computed });
        }
        Ok(packet)
    }
}

impl Default for So {
    fn default() -> Self {
        Self::new()
    }
}
