//! Shared field codecs: the common packet header and the name field.
//!
//! Every packet opens with `u32 tag | u16 body_len | u16 ttl`, all big-endian,
//! where `body_len` is the total packet size minus the 4-byte tag. An address
//! field is a length-prefixed list of length-prefixed components:
//! `u16 total_name_len` followed by `(u16 component_len, component_bytes)`
//! entries.

use crate::packets::{Poa, PoaList};
use crate::WireError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use nnn_naming::NNNAddress;

/// Fixed size of the common header: tag, body length, TTL
pub const COMMON_HEADER_SIZE: usize = 8;

/// Serialized size of an address field
pub fn serialized_size_name(name: &NNNAddress) -> usize {
    2 + name.iter().map(|c| 2 + c.len()).sum::<usize>()
}

/// Write an address field
pub fn put_name(buf: &mut BytesMut, name: &NNNAddress) {
    buf.put_u16((serialized_size_name(name) - 2) as u16);
    for comp in name {
        buf.put_u16(comp.len() as u16);
        buf.put_slice(comp);
    }
}

/// Read an address field
pub fn get_name(buf: &mut Bytes) -> Result<NNNAddress, WireError> {
    if buf.remaining() < 2 {
        return Err(WireError::Incomplete);
    }
    let mut left = buf.get_u16() as usize;

    let mut name = NNNAddress::new();
    while left > 0 {
        if buf.remaining() < 2 {
            return Err(WireError::Incomplete);
        }
        let len = buf.get_u16() as usize;
        left = left.checked_sub(2 + len).ok_or(WireError::Malformed)?;
        if buf.remaining() < len {
            return Err(WireError::Incomplete);
        }
        let bytes = buf.copy_to_bytes(len);
        name.append_bytes(&bytes);
    }
    Ok(name)
}

/// Serialized size of a PoA section with `count` tokens
pub fn serialized_size_poas(count: usize) -> usize {
    4 + count * Poa::LEN
}

/// Write a PoA section: type, count, then the fixed-width tokens
pub fn put_poas(buf: &mut BytesMut, poa_type: u16, poas: &[Poa]) {
    buf.put_u16(poa_type);
    buf.put_u16(poas.len() as u16);
    for poa in poas {
        buf.put_slice(poa.as_bytes());
    }
}

/// Read a PoA section
pub fn get_poas(buf: &mut Bytes) -> Result<(u16, PoaList), WireError> {
    if buf.remaining() < 4 {
        return Err(WireError::Incomplete);
    }
    let poa_type = buf.get_u16();
    let count = buf.get_u16() as usize;
    if buf.remaining() < count * Poa::LEN {
        return Err(WireError::Incomplete);
    }
    let mut poas = PoaList::new();
    for _ in 0..count {
        let bytes = buf.copy_to_bytes(Poa::LEN);
        poas.push(Poa::from_slice(&bytes)?);
    }
    Ok((poa_type, poas))
}

/// Write the common header for a packet of `total` serialized bytes
pub(crate) fn put_common_header(
    buf: &mut BytesMut,
    tag: u32,
    total: usize,
    ttl: u16,
) -> Result<(), WireError> {
    let body = total - 4;
    if body > u16::MAX as usize {
        return Err(WireError::Size(total));
    }
    buf.put_u32(tag);
    buf.put_u16(body as u16);
    buf.put_u16(ttl);
    Ok(())
}

/// Read the common header, verifying the tag matches the expected kind.
///
/// Returns the byte count remaining in the body after the length and TTL
/// fields, and the TTL.
pub(crate) fn get_common_header(buf: &mut Bytes, expected: u32) -> Result<(usize, u16), WireError> {
    if buf.remaining() < COMMON_HEADER_SIZE {
        return Err(WireError::Incomplete);
    }
    let tag = buf.get_u32();
    if tag != expected {
        return Err(WireError::UnexpectedType {
            expected,
            found: tag,
        });
    }
    let body = buf.get_u16() as usize;
    let ttl = buf.get_u16();
    // length and TTL are part of the body count
    let rest = body.checked_sub(4).ok_or(WireError::Malformed)?;
    Ok((rest, ttl))
}
