//! REN packet: asks to renew the lease on an already-held address. Shares
//! wire tag 5 with INF, so decoding must be invoked knowing a REN is expected.

use crate::codec::{
    get_common_header, get_name, get_poas, put_common_header, put_name, put_poas,
    serialized_size_name, serialized_size_poas, COMMON_HEADER_SIZE,
};
use crate::packets::{Poa, PoaList, POA_TYPE_MAC48};
use crate::{PacketType, WireError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use nnn_naming::NNNAddress;
use tracing::trace;

/// Renewal packet
#[derive(Debug, Clone)]
pub struct Ren {
    ttl: u16,
    poa_type: u16,
    poas: PoaList,
    lease: u16,
    name: Option<NNNAddress>,
    wire: Option<Bytes>,
}

impl Ren {
    /// Wire type tag, shared with INF
    pub const TAG: u32 = PacketType::RenInf as u32;

    /// Create a renewal with no address, no tokens, a zero lease and a
    /// zero TTL
    pub fn new() -> Self {
        Self {
            ttl: 0,
            poa_type: POA_TYPE_MAC48,
            poas: PoaList::new(),
            lease: 0,
            name: None,
            wire: None,
        }
    }

    /// Create a renewal for the held address `name`
    pub fn with_name(name: NNNAddress) -> Self {
        Self {
            name: Some(name),
            ..Self::new()
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

    /// Requested lease extension in seconds
    pub fn lease(&self) -> u16 {
        self.lease
    }

    /// Set the requested lease extension, invalidating any cached encoding
    pub fn set_lease(&mut self, lease: u16) {
        self.lease = lease;
        self.wire = None;
    }

    /// Address being renewed; fails if none has been assigned
    pub fn name(&self) -> Result<&NNNAddress, WireError> {
        self.name.as_ref().ok_or(WireError::AddressNotSet)
    }

    /// Assign the address being renewed, invalidating any cached encoding
    pub fn set_name(&mut self, name: NNNAddress) {
        self.name = Some(name);
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
        COMMON_HEADER_SIZE + serialized_size_poas(self.poas.len()) + 2 + serialized_size_name(name)
    }

    /// Encode to wire bytes, reusing the cached encoding when present
    pub fn to_wire(&mut self) -> Result<Bytes, WireError> {
        if let Some(wire) = &self.wire {
            return Ok(wire.clone());
        }
        let name = self.name.as_ref().ok_or(WireError::AddressNotSet)?;
        let total = self.size_with(name);
        trace!(size = total, "serializing REN packet");

        let mut buf = BytesMut::with_capacity(total);
        put_common_header(&mut buf, Self::TAG, total, self.ttl)?;
        put_poas(&mut buf, self.poa_type, &self.poas);
        buf.put_u16(self.lease);
        put_name(&mut buf, name);

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
        if buf.remaining() < 2 {
            return Err(WireError::Incomplete);
        }
        let lease = buf.get_u16();
        let name = get_name(&mut buf)?;

        let consumed = start - buf.remaining();
        let packet = Self {
            ttl,
            poa_type,
            poas,
            lease,
            name: Some(name),
            wire: Some(full.slice(..consumed)),
        };
        let computed = packet.size_with(packet.name.as_ref().unwrap());
        if consumed != computed {
            return Err(WireError::Consistency { consumed, computed });
        }
        Ok(packet)
    }
}

impl Default for Ren {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let name: NNNAddress = "1.2.3".parse().unwrap();
        let mut p = Ren::with_name(name.clone());
        p.set_lease(300);
        p.add_poa(Poa::new([9; 6]));
        let decoded = Ren::from_wire(p.to_wire().unwrap()).unwrap();
        assert_eq!(decoded.name().unwrap(), &name);
        assert_eq!(decoded.lease(), 300);
        assert_eq!(decoded.num_poa(), 1);
    }

    #[test]
    fn test_shares_tag_with_inf() {
        assert_eq!(Ren::TAG, super::super::Inf::TAG);
    }
}
