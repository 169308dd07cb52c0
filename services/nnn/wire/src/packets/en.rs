//! EN packet: an enrollment request advertising the node's points of
//! attachment. Carries no address, since the node does not have one yet.

use crate::codec::{
    get_common_header, get_poas, put_common_header, put_poas, serialized_size_poas,
    COMMON_HEADER_SIZE,
};
use crate::packets::{Poa, PoaList, POA_TYPE_MAC48};
use crate::{PacketType, WireError};
use bytes::{Buf, Bytes, BytesMut};
use tracing::trace;

/// Enrollment packet
#[derive(Debug, Clone)]
pub struct En {
    ttl: u16,
    poa_type: u16,
    poas: PoaList,
    wire: Option<Bytes>,
}

impl En {
    /// Wire type tag
    pub const TAG: u32 = PacketType::En as u32;

    /// Create an enrollment with no tokens, a MAC-48 PoA type and a zero TTL
    pub fn new() -> Self {
        Self {
            ttl: 0,
            poa_type: POA_TYPE_MAC48,
            poas: PoaList::new(),
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

    /// PoA type tag
    pub fn poa_type(&self) -> u16 {
        self.poa_type
    }

    /// Set the PoA type tag, invalidating any cached encoding
    pub fn set_poa_type(&mut self, poa_type: u16) {
        self.poa_type = poa_type;
        self.wire = None;
    }

    /// Append a PoA token, invalidating any cached encoding
    pub fn add_poa(&mut self, poa: Poa) {
        self.poas.push(poa);
        self.wire = None;
    }

    /// PoA tokens in insertion order
    pub fn poas(&self) -> &[Poa] {
        &self.poas
    }

    /// Number of PoA tokens
    pub fn num_poa(&self) -> usize {
        self.poas.len()
    }

    /// The `i`th PoA token, if one exists
    pub fn poa(&self, i: usize) -> Option<&Poa> {
        self.poas.get(i)
    }

    /// Cached wire encoding, if one exists
    pub fn wire(&self) -> Option<&Bytes> {
        self.wire.as_ref()
    }

    /// Total encoded size in bytes
    pub fn serialized_size(&self) -> usize {
        COMMON_HEADER_SIZE + serialized_size_poas(self.poas.len())
    }

    /// Encode to wire bytes, reusing the cached encoding when present
    pub fn to_wire(&mut self) -> Result<Bytes, WireError> {
        if let Some(wire) = &self.wire {
            return Ok(wire.clone());
        }
        let total = self.serialized_size();
        trace!(size = total, "serializing EN packet");

        let mut buf = BytesMut::with_capacity(total);
        put_common_header(&mut buf, Self::TAG, total, self.ttl)?;
        put_poas(&mut buf, self.poa_type, &self.poas);

        let wire = buf.freeze();
        self.wire = Some(wire.clone());
        Ok(wire)
    }

    /// Decode from wire bytes, caching the consumed bytes as the encoding
    pub fn from_wire(mut buf: Bytes) -> Result<Self, WireError> {
        let full = buf.clone();
        let start = buf.remaining();

        let (_, ttl) = get_common_header(&mut buf, Self::TAG)?;
        let (poa_type, poas) = get_poas(&mut buf)?;

        let consumed = start - buf.remaining();
        let packet = Self {
            ttl,
            poa_type,
            poas,
            wire: Some(full.slice(..consumed)),
        };
        let computed = packet.serialized_size();
        if consumed != computed {
            return Err(WireError::Consistency { consumed, computed });
        }
        Ok(packet)
    }
}

impl Default for En {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = En::new();
        assert_eq!(p.ttl(), 0);
        assert_eq!(p.poa_type(), POA_TYPE_MAC48);
        assert_eq!(p.num_poa(), 0);
    }

    #[test]
    fn test_round_trip() {
        let mut p = En::new();
        p.set_ttl(2);
        p.add_poa(Poa::new([0xDE, 0xAD, 0xBE, 0xEF, 0, 1]));
        p.add_poa(Poa::new([2; 6]));
        let wire = p.to_wire().unwrap();
        assert_eq!(wire.len(), p.serialized_size());

        let decoded = En::from_wire(wire).unwrap();
        assert_eq!(decoded.ttl(), 2);
        assert_eq!(decoded.num_poa(), 2);
        assert_eq!(decoded.poa(0), Some(&Poa::new([0xDE, 0xAD, 0xBE, 0xEF, 0, 1])));
        assert_eq!(decoded.poa(2), None);
    }

    #[test]
    fn test_add_poa_invalidates_cache() {
        let mut p = En::new();
        p.to_wire().unwrap();
        p.add_poa(Poa::new([1; 6]));
        assert!(p.wire().is_none());
    }
}
