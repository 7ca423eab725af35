//! Error types for huffpack.
//!
//! All operations return structured errors rather than panicking.
//! Corrupt input and caller mistakes both surface here, so the binary can
//! report them and exit cleanly.

use thiserror::Error;

use crate::Symbol;

/// Top-level error type for all operations in the library.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit array: indexing or sizing a packed bit buffer
/// - Frequency: counting character units
/// - Tree: code tree construction or code lookup
/// - Encode / Decode: turning text into bits and back
/// - Container: parsing the persisted binary format
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Packed bit buffer misuse (e.g., index past the logical length)
    #[error("bit array error: {0}")]
    BitArray(#[from] BitArrayError),

    /// Frequency counting failed
    #[error("frequency table error: {0}")]
    Frequency(#[from] FrequencyError),

    /// Code tree construction or lookup failed
    #[error("code tree error: {0}")]
    Tree(#[from] TreeError),

    /// Encoding text into a bit sequence failed
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Decoding a bit sequence back into text failed
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The binary container is truncated or malformed
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Packed bit buffer errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitArrayError {
    /// Bit index outside `[0, len)`
    #[error("bit index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Backing buffer does not hold exactly ceil(len/8) bytes
    #[error("buffer of {actual} bytes cannot back {bits} bits (need {expected})")]
    LengthMismatch {
        bits: usize,
        expected: usize,
        actual: usize,
    },
}

/// Frequency counting errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrequencyError {
    /// A count no longer fits the persisted int32 field
    #[error("count for unit {symbol:#06x} exceeds {max}")]
    CountOverflow { symbol: Symbol, max: u32 },

    /// Counts must be at least 1
    #[error("zero count for unit {symbol:#06x}")]
    ZeroCount { symbol: Symbol },

    /// The same unit appears twice in a list of entries
    #[error("duplicate entry for unit {symbol:#06x}")]
    DuplicateSymbol { symbol: Symbol },
}

/// Code tree errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// No units with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build code tree")]
    EmptyFrequencyTable,

    /// Code lookup for a unit that is not a leaf of the tree
    #[error("unit {symbol:#06x} is not in the code tree")]
    SymbolNotFound { symbol: Symbol },
}

/// Encoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A unit of the text has no code
    #[error("unit {symbol:#06x} at position {position} has no code")]
    SymbolNotInTable { symbol: Symbol, position: usize },

    /// The bit count does not fit the container's int32 field
    #[error("encoded payload of {bits} bits exceeds maximum {max}")]
    PayloadTooLarge { bits: u64, max: u64 },
}

/// Decoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Bit stream ended in the middle of a code
    #[error("bit stream ends mid-code after {consumed} bits")]
    Truncated { consumed: usize },

    /// A bit that leads nowhere in the tree
    #[error("invalid code at bit position {position}")]
    InvalidCode { position: usize },

    /// Decoded unit count differs from the frequency total
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: u64, actual: u64 },

    /// Decoded units do not form valid UTF-16
    #[error("decoded units are not valid UTF-16")]
    InvalidUtf16,
}

/// Container parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    /// Input ended before the declared number of bytes
    #[error("container truncated while reading {section}")]
    Truncated { section: &'static str },

    /// A header field holds a value no writer produces
    #[error("corrupt container: {0}")]
    Corrupt(String),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
