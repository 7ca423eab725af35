//! Packed bit buffer with a fixed logical length.
//!
//! `BitArray` stores bits LSB-first: bit `i` lives in byte `i / 8` at bit
//! position `i % 8`. This ordering is part of the container format, so the
//! writer and the reader must both go through this type.
//!
//! # Padding Rules
//! - The backing buffer always holds exactly `ceil(len / 8)` bytes
//! - Bits past `len` in the last byte are never read; callers wrapping an
//!   existing buffer may leave garbage there
//!
//! # Example
//! ```
//! use huffpack_core::bitarray::BitArray;
//!
//! let mut bits = BitArray::new(3);
//! bits.set(0, true).unwrap();
//! bits.set(2, true).unwrap();
//!
//! assert_eq!(bits.as_bytes(), &[0b0000_0101]);
//! assert_eq!(bits.to_string(), "101");
//! ```

use std::fmt;

use crate::error::{BitArrayError, Result};

/// Number of bytes needed to hold `bits` bits.
pub fn bytes_for_bits(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Fixed-length sequence of bits packed into bytes.
///
/// # Invariants
/// - `bytes.len() == ceil(len / 8)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    /// Backing storage
    bytes: Vec<u8>,
    /// Logical number of bits
    len: usize,
}

impl BitArray {
    /// Create an all-zero array of `len` bits.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; bytes_for_bits(len)],
            len,
        }
    }

    /// Wrap an existing buffer as `len` bits.
    ///
    /// # Errors
    /// Returns `BitArrayError::LengthMismatch` unless the buffer holds exactly
    /// `ceil(len / 8)` bytes.
    pub fn from_bytes(len: usize, bytes: Vec<u8>) -> Result<Self> {
        let expected = bytes_for_bits(len);
        if bytes.len() != expected {
            return Err(BitArrayError::LengthMismatch {
                bits: len,
                expected,
                actual: bytes.len(),
            }
            .into());
        }
        Ok(Self { bytes, len })
    }

    /// Read bit `index`.
    ///
    /// # Errors
    /// Returns `BitArrayError::IndexOutOfRange` if `index >= len`.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.bytes[index / 8] & (1 << (index % 8)) != 0)
    }

    /// Set or clear bit `index`.
    ///
    /// # Errors
    /// Returns `BitArrayError::IndexOutOfRange` if `index >= len`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        self.check(index)?;
        let mask = 1 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
        Ok(())
    }

    /// Logical number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of backing bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Iterate over the logical bits in order, skipping padding.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (1 << (i % 8)) != 0)
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(BitArrayError::IndexOutOfRange {
                index,
                len: self.len,
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for BitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
