//! The seven NNN packet kinds.
//!
//! Each kind owns its wire layout (always big-endian) and a lazily cached
//! encoding: the wire bytes are computed once and reused until a mutator
//! clears the cache.

use crate::WireError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

pub mod aen;
pub mod do_p;
pub mod en;
pub mod inf;
pub mod nullp;
pub mod ren;
pub mod so;

pub use aen::Aen;
pub use do_p::Do;
pub use en::En;
pub use inf::Inf;
pub use nullp::NullP;
pub use ren::Ren;
pub use so::So;

use crate::PacketType;
use bytes::Bytes;

/// PoA type tag for MAC-48 hardware addresses
pub const POA_TYPE_MAC48: u16 = 0;

/// A point-of-attachment token: a fixed 6-byte link-layer address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Poa([u8; 6]);

impl Poa {
    /// Token length in bytes
    pub const LEN: usize = 6;

    /// Create a token from its 6 bytes
    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Create a token from a slice, which must be exactly 6 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WireError> {
        let arr: [u8; 6] = bytes.try_into().map_err(|_| WireError::Malformed)?;
        Ok(Self(arr))
    }

    /// View the token bytes
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for Poa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

/// Inline list of PoA tokens; enrollment packets rarely carry more than a few
pub type PoaList = SmallVec<[Poa; 4]>;

/// A decoded NNN packet of any kind
#[derive(Debug, Clone)]
pub enum Packet {
    /// NULL packet
    Null(NullP),
    /// Solicitation
    So(So),
    /// Data object
    Do(Do),
    /// Enrollment
    En(En),
    /// Acknowledge enrollment
    Aen(Aen),
    /// Renewal
    Ren(Ren),
    /// Inform (rename)
    Inf(Inf),
}

impl Packet {
    /// The wire-level kind of this packet.
    ///
    /// REN and INF both report [`PacketType::RenInf`] since they share a tag.
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Null(_) => PacketType::Null,
            Packet::So(_) => PacketType::So,
            Packet::Do(_) => PacketType::Do,
            Packet::En(_) => PacketType::En,
            Packet::Aen(_) => PacketType::Aen,
            Packet::Ren(_) | Packet::Inf(_) => PacketType::RenInf,
        }
    }

    /// TTL in seconds
    pub fn ttl(&self) -> u16 {
        match self {
            Packet::Null(p) => p.ttl(),
            Packet::So(p) => p.ttl(),
            Packet::Do(p) => p.ttl(),
            Packet::En(p) => p.ttl(),
            Packet::Aen(p) => p.ttl(),
            Packet::Ren(p) => p.ttl(),
            Packet::Inf(p) => p.ttl(),
        }
    }

    /// Encode to wire bytes, caching the result on the inner packet
    pub fn to_wire(&mut self) -> Result<Bytes, WireError> {
        match self {
            Packet::Null(p) => p.to_wire(),
            Packet::So(p) => p.to_wire(),
            Packet::Do(p) => p.to_wire(),
            Packet::En(p) => p.to_wire(),
            Packet::Aen(p) => p.to_wire(),
            Packet::Ren(p) => p.to_wire(),
            Packet::Inf(p) => p.to_wire(),
        }
    }
}
