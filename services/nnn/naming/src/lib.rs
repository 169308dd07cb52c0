//! Hierarchical sector-structured addressing for the NNN mobility protocol.
//!
//! This crate provides the naming layer: general-purpose byte blobs, name
//! components with canonical (length, then numeric value) ordering, and the
//! dot-separated hexadecimal NNN address with its sector-relationship queries.
//!
//! ## Address format
//!
//! An address is at most 16 hexadecimal characters split into labels by at
//! most 15 dots, e.g. `"ae.3.4f"`. Each label is one component; components
//! within the same sector share all but their last label.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod blob;
pub mod component;
pub mod error;

// Re-export main types
pub use address::{NNNAddress, MAX_DOTS, MAX_HEX_CHARS, SEP};
pub use blob::Blob;
pub use component::{
    Component, BLOCK_ID_MARKER, CONTROL_MARKER, SEQ_MARKER, VERSION_MARKER,
};
pub use error::NameError;
