//! Wire codec error types.

use nnn_naming::NameError;
use thiserror::Error;

/// Wire codec errors
#[derive(Error, Debug)]
pub enum WireError {
    /// Buffer ended before the packet did
    #[error("incomplete packet")]
    Incomplete,

    /// Type-tag sniff found no matching packet kind
    #[error("unknown packet type {0}")]
    UnknownHeader(u32),

    /// Buffer carries a valid tag, but not the kind the caller asked for
    #[error("packet type {found} where {expected} was expected")]
    UnexpectedType {
        /// Tag of the kind the decoder was invoked for
        expected: u32,
        /// Tag actually present in the buffer
        found: u32,
    },

    /// Packet field lengths do not add up
    #[error("malformed packet")]
    Malformed,

    /// Encoded size exceeds the 16-bit body-length field
    #[error("size limit exceeded: {0}")]
    Size(usize),

    /// Packet address accessed before one was assigned
    #[error("address not set")]
    AddressNotSet,

    /// Decoded byte count disagrees with the computed serialized size.
    ///
    /// This is an internal-invariant violation: it can only happen through a
    /// codec bug, never through well-formed input. The reference treats it as
    /// an assertion; here it is isolated to dropping the packet.
    #[error("codec consistency violation: consumed {consumed} bytes, computed {computed}")]
    Consistency {
        /// Bytes actually consumed by the decoder
        consumed: usize,
        /// Size independently computed from the decoded packet
        computed: usize,
    },

    /// Error from the naming layer while decoding an address field
    #[error(transparent)]
    Name(#[from] NameError),
}
