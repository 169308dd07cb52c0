//! Faces: the attachment points through which NNN packets enter and leave
//! a node.
//!
//! A face binds a [`Transport`] (the lower layer carrying the bytes) to a
//! set of [`PacketHandlers`] (the upper layer consuming decoded packets).
//! Faces start down; until brought up they silently drop traffic in both
//! directions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod face;
pub mod handlers;
pub mod transport;

// Re-export main types
pub use config::{FaceConfig, FaceFlags};
pub use face::{Face, FaceId, FaceIdAllocator};
pub use handlers::PacketHandlers;
pub use transport::{RecordingTransport, Transport};
