//! huffpack-core: lossless text compression with Huffman prefix codes
//!
//! This library provides the components of a round trip that:
//! - Counts how often each character unit occurs in a text
//! - Builds a Huffman code tree from those counts
//! - Encodes the text into a packed bit buffer
//! - Persists the frequency table and the bits in a binary container
//! - Rebuilds the tree from the stored table and decodes the text back
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitarray`: Fixed-length packed bit buffer
//! - `frequency`: Character unit frequency table
//! - `tree`: Code tree construction and code derivation
//! - `encoder` / `decoder`: Text to bits and back
//! - `container`: Binary container format
//! - `pipeline`: Compress / decompress in one call
//! - `metrics`: Observable run statistics
//!
//! # Character Units
//!
//! A character unit is a UTF-16 code unit. Characters outside the Basic
//! Multilingual Plane are two units (a surrogate pair) and are coded as two
//! symbols.
//!
//! # Example
//! ```
//! use huffpack_core::pipeline::{compress_to_bytes, decompress_bytes};
//!
//! let bytes = compress_to_bytes("abracadabra").unwrap();
//! assert_eq!(decompress_bytes(&bytes).unwrap(), "abracadabra");
//! ```

pub mod bitarray;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod pipeline;
pub mod tree;

/// A character unit: one UTF-16 code unit.
pub type Symbol = u16;

// Re-export commonly used types
pub use bitarray::BitArray;
pub use container::Container;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::{CodeTable, CodeTree};
