//! INF packet: informs that a node formerly reachable at one address is now
//! reachable at another, for a limited time. Shares wire tag 5 with REN, so
//! decoding must be invoked knowing an INF is expected.

use crate::codec::{
    get_common_header, get_name, put_common_header, put_name, serialized_size_name,
    COMMON_HEADER_SIZE,
};
use crate::{PacketType, WireError};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use nnn_naming::NNNAddress;
use tracing::trace;

/// Inform packet
#[derive(Debug, Clone)]
pub struct Inf {
    ttl: u16,
    lease: u16,
    old_name: Option<NNNAddress>,
    new_name: Option<NNNAddress>,
    wire: Option<Bytes>,
}

impl Inf {
    /// Wire type tag, shared with REN
    pub const TAG: u32 = PacketType::RenInf as u32;

    /// Create an inform with neither address assigned, a zero lease and a
    /// zero TTL
    pub fn new() -> Self {
        Self {
            ttl: 0,
            lease: 0,
            old_name: None,
            new_name: None,
            wire: None,
        }
    }

    /// Create an inform redirecting `old_name` to `new_name`
    pub fn with_names(old_name: NNNAddress, new_name: NNNAddress) -> Self {
        Self {
            old_name: Some(old_name),
            new_name: Some(new_name),
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

    /// Remaining validity of the redirection, in seconds
    pub fn lease(&self) -> u16 {
        self.lease
    }

    /// Set the redirection validity, invalidating any cached encoding
    pub fn set_lease(&mut self, lease: u16) {
        self.lease = lease;
        self.wire = None;
    }

    /// Former address; fails if none has been assigned
    pub fn old_name(&self) -> Result<&NNNAddress, WireError> {
        self.old_name.as_ref().ok_or(WireError::AddressNotSet)
    }

    /// Assign the former address, invalidating any cached encoding
    pub fn set_old_name(&mut self, name: NNNAddress) {
        self.old_name = Some(name);
        self.wire = None;
    }

    /// Current address; fails if none has been assigned
    pub fn new_name(&self) -> Result<&NNNAddress, WireError> {
        self.new_name.as_ref().ok_or(WireError::AddressNotSet)
    }

    /// Assign the current address, invalidating any cached encoding
    pub fn set_new_name(&mut self, name: NNNAddress) {
        self.new_name = Some(name);
        self.wire = None;
    }

    /// Cached wire encoding, if one exists
    pub fn wire(&self) -> Option<&Bytes> {
        self.wire.as_ref()
    }

    /// Total encoded size in bytes; fails if either address is missing
    pub fn serialized_size(&self) -> Result<usize, WireError> {
        Ok(self.size_with(self.old_name()?, self.new_name()?))
    }

    fn size_with(&self, old_name: &NNNAddress, new_name: &NNNAddress) -> usize {
        COMMON_HEADER_SIZE + 2 + serialized_size_name(old_name) + serialized_size_name(new_name)
    }

    /// Encode to wire bytes, reusing the cached encoding when present
    pub fn to_wire(&mut self) -> Result<Bytes, WireError> {
        if let Some(wire) = &self.wire {
            return Ok(wire.clone());
        }
        let old_name = self.old_name.as_ref().ok_or(WireError::AddressNotSet)?;
        let new_name = self.new_name.as_ref().ok_or(WireError::AddressNotSet)?;
        let total = self.size_with(old_name, new_name);
        trace!(size = total, "serializing INF packet");

        let mut buf = BytesMut::with_capacity(total);
        put_common_header(&mut buf, Self::TAG, total, self.ttl)?;
        buf.put_u16(self.lease);
        put_name(&mut buf, old_name);
        put_name(&mut buf, new_name);

        let wire = buf.freeze();
        self.wire = Some(wire.clone());
        Ok(wire)
    }

    /// Decode from wire bytes, caching the consumed bytes as the encoding
    pub fn from_wire(mut buf: Bytes) -> Result<Self, WireError> {
        let full = buf.clone();
        let start = buf.remaining();

        let (_, ttl) = get_common_header(&mut buf, Self::TAG)?;
        if buf.remaining() < 2 {
            return Err(WireError::Incomplete);
        }
        let lease = buf.get_u16();
        let old_name = get_name(&mut buf)?;
        let new_name = get_name(&mut buf)?;

        let consumed = start - buf.remaining();
        let packet = Self {
            ttl,
            lease,
            old_name: Some(old_name),
            new_name: Some(new_name),
            wire: Some(full.slice(..consumed)),
        };
        let computed = packet.size_with(
            packet.old_name.as_ref().unwrap(),
            packet.new_name.as_ref().unwrap(),
        );
        if consumed != computed {
            return Err(WireError::Consistency { consumed, computed });
        }
        Ok(packet)
    }
}

impl Default for Inf {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let old: NNNAddress = "1.2.3".parse().unwrap();
        let new: NNNAddress = "a.b.c".parse().unwrap();
        let mut p = Inf::with_names(old.clone(), new.clone());
        p.set_lease(120);
        p.set_ttl(4);
        let wire = p.to_wire().unwrap();
        assert_eq!(wire.len(), p.serialized_size().unwrap());

        let decoded = Inf::from_wire(wire).unwrap();
        assert_eq!(decoded.old_name().unwrap(), &old);
        assert_eq!(decoded.new_name().unwrap(), &new);
        assert_eq!(decoded.lease(), 120);
        assert_eq!(decoded.ttl(), 4);
    }

    #[test]
    fn test_both_names_required() {
        let mut p = Inf::new();
        p.set_old_name("1".parse().unwrap());
        assert!(matches!(p.to_wire(), Err(WireError::AddressNotSet)));
    }

    #[test]
    fn test_ren_bytes_do_not_decode_as_inf() {
        // a REN with a PoA passes the tag check but its field layout differs,
        // which the consistency check catches
        let name: NNNAddress = "1.2".parse().unwrap();
        let mut ren = super::super::Ren::with_name(name);
        ren.add_poa(crate::packets::Poa::new([3; 6]));
        let wire = ren.to_wire().unwrap();
        assert!(Inf::from_wire(wire).is_err());
    }
}
