//! Naming error types.

use thiserror::Error;

/// Errors raised while parsing or manipulating NNN names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Address text contains something other than hex digits and dots
    #[error("address should be composed of only hexadecimal characters and dots")]
    Charset,

    /// Address text carries more dots than the format allows
    #[error("address should not have more than {0} dots")]
    DotCount(usize),

    /// Address text carries more hex characters than the format allows
    #[error("address is of maximum {0} hexadecimal characters")]
    HexLength(usize),

    /// A dot is not followed by a hexadecimal label
    #[error("address dot must be followed by a hexadecimal number")]
    DanglingDot,

    /// A label could not be parsed as a hexadecimal number
    #[error("invalid hexadecimal label `{0}`")]
    HexLabel(String),

    /// Malformed or forbidden byte in a URI-escaped component
    #[error("malformed escape in component at byte {0}")]
    Escape(usize),

    /// Numeric decode found a different marker byte than requested
    #[error("component does not have required marker [{uri}]")]
    MarkerMismatch {
        /// Marker byte the caller asked for
        marker: u8,
        /// URI rendering of the offending component, for diagnostics
        uri: String,
    },

    /// Component index outside the address
    #[error("index {0} out of range")]
    IndexOutOfRange(isize),
}
