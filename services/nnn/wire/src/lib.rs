//! Wire protocol for NNN packets.
//!
//! All seven packet kinds open with the same big-endian common header:
//!
//! ```text
//! 0       4       6       8
//! +-------+-------+-------+----------------+
//! |  tag  | length|  TTL  |  kind body ... |
//! | (u32) | (u16) | (u16) |                |
//! +-------+-------+-------+----------------+
//! ```
//!
//! `length` counts everything after the tag, so a packet of `n` total bytes
//! carries `n - 4` there. The tag values are 0 NULL, 1 SO, 2 DO, 3 EN,
//! 4 AEN and 5 for both REN and INF; that collision is part of the wire
//! format and is preserved as-is.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod header;
pub mod packets;

// Re-export main types
pub use codec::{get_name, put_name, serialized_size_name, COMMON_HEADER_SIZE};
pub use error::WireError;
pub use header::PacketType;
pub use packets::{
    Aen, Do, En, Inf, NullP, Packet, Poa, PoaList, Ren, So, POA_TYPE_MAC48,
};
