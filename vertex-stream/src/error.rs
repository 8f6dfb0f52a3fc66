//! Error types for vertex stream decoding

use std::io;

/// Errors that can occur while decoding a vertex stream
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The byte source ran out before a read completed
    #[error(
        "unexpected end of data at offset {offset}: needed {requested} bytes, {available} available"
    )]
    UnexpectedEndOfData {
        offset: u64,
        requested: u64,
        available: u64,
    },

    /// A size table entry is not a whole number of elements
    #[error(
        "inconsistent size table: slot {slot} ({attribute}) holds {size} bytes, not a multiple of stride {stride}"
    )]
    InconsistentSizeTable {
        slot: usize,
        attribute: &'static str,
        size: u64,
        stride: usize,
    },

    /// An element count too large to address on this host
    #[error("element count {count} in slot {slot} overflows addressable memory")]
    CountOverflow { slot: usize, count: u64 },

    /// Underlying reader failed for a reason other than end of data
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate
pub type DecodeResult<T> = Result<T, DecodeError>;
