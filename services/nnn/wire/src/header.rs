//! Type-tag sniffing for inbound buffers.
//!
//! Every NNN packet opens with a big-endian `u32` type tag. The sniffer reads
//! only those 4 bytes to select a decoder without touching the rest of the
//! frame.

use crate::WireError;
use serde::{Deserialize, Serialize};

/// Packet kinds as discriminated by the 4-byte wire tag.
///
/// REN and INF share tag 5 on the wire; the sniffer cannot tell them apart,
/// so their decoding must be invoked with expected-kind context. The tags are
/// kept bit-exact for interoperability, collision included.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketType {
    /// NULL packet
    Null = 0,
    /// Solicitation
    So = 1,
    /// Data object
    Do = 2,
    /// Enrollment
    En = 3,
    /// Acknowledge enrollment
    Aen = 4,
    /// Renewal or inform; the tag alone cannot disambiguate
    RenInf = 5,
}

impl PacketType {
    /// Inspect the first 4 bytes of a buffer and map them to a packet kind.
    ///
    /// A buffer shorter than 4 bytes or a tag with no corresponding kind
    /// fails with an unknown-header error.
    pub fn sniff(buf: &[u8]) -> Result<PacketType, WireError> {
        if buf.len() < 4 {
            return Err(WireError::Incomplete);
        }
        let tag = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        PacketType::try_from(tag)
    }
}

impl TryFrom<u32> for PacketType {
    type Error = WireError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(PacketType::Null),
            1 => Ok(PacketType::So),
            2 => Ok(PacketType::Do),
            3 => Ok(PacketType::En),
            4 => Ok(PacketType::Aen),
            5 => Ok(PacketType::RenInf),
            _ => Err(WireError::UnknownHeader(tag)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_tags() {
        assert_eq!(PacketType::sniff(&[0, 0, 0, 0]).unwrap(), PacketType::Null);
        assert_eq!(PacketType::sniff(&[0, 0, 0, 2]).unwrap(), PacketType::Do);
        assert_eq!(
            PacketType::sniff(&[0, 0, 0, 5, 0xAA]).unwrap(),
            PacketType::RenInf
        );
    }

    #[test]
    fn test_sniff_unknown_tag() {
        assert!(matches!(
            PacketType::sniff(&[0, 0, 0, 6]),
            Err(WireError::UnknownHeader(6))
        ));
        assert!(matches!(
            PacketType::sniff(&[0xFF, 0, 0, 0]),
            Err(WireError::UnknownHeader(_))
        ));
    }

    #[test]
    fn test_sniff_short_buffer() {
        assert!(matches!(
            PacketType::sniff(&[0, 0, 0]),
            Err(WireError::Incomplete)
        ));
    }
}
