//! NNN mobility protocol core.
//!
//! This crate ties together the protocol layers:
//!
//! - [`naming`]: sector-structured dot-hex addresses and name components
//! - [`wire`]: the seven packet kinds and their binary codec
//! - [`face`]: attachment points with type-tag dispatch to packet handlers
//!
//! The common types are re-exported at the root, so most users only need
//! `use nnn::*` style imports.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use nnn_face as face;
pub use nnn_naming as naming;
pub use nnn_wire as wire;

pub use nnn_face::{Face, FaceConfig, FaceFlags, FaceId, FaceIdAllocator, PacketHandlers, Transport};
pub use nnn_naming::{Blob, Component, NNNAddress, NameError};
pub use nnn_wire::{
    Aen, Do, En, Inf, NullP, Packet, PacketType, Poa, Ren, So, WireError, POA_TYPE_MAC48,
};
