//! Bit sequence to text.
//!
//! Decoding walks the tree from the root, one bit per step, and emits a unit
//! each time a leaf is reached. A stream that stops anywhere other than the
//! root was cut off mid-code.

use crate::bitarray::BitArray;
use crate::error::{DecodeError, Result};
use crate::tree::{CodeTree, Node};
use crate::Symbol;

/// Decode `bits` into UTF-16 units.
///
/// # Errors
/// - `DecodeError::Truncated` if the bits end in the middle of a code
/// - `DecodeError::InvalidCode` for a `1` bit in a single-leaf tree
pub fn decode_units(bits: &BitArray, tree: &CodeTree) -> Result<Vec<Symbol>> {
    let root = tree.root();

    if let Node::Leaf { symbol, .. } = root {
        // Single-unit alphabet: every unit is the one-bit code 0
        let mut units = Vec::with_capacity(bits.len());
        for (position, bit) in bits.iter().enumerate() {
            if bit {
                return Err(DecodeError::InvalidCode { position }.into());
            }
            units.push(*symbol);
        }
        return Ok(units);
    }

    let mut units = Vec::new();
    let mut node = root;
    for bit in bits.iter() {
        // The walk resets to the root on every leaf, so `node` is internal here
        if let Node::Internal { left, right, .. } = node {
            node = if bit { &**right } else { &**left };
        }

        if let Node::Leaf { symbol, .. } = node {
            units.push(*symbol);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(DecodeError::Truncated {
            consumed: bits.len(),
        }
        .into());
    }

    Ok(units)
}

/// Decode `bits` into text.
///
/// # Errors
/// Everything `decode_units` reports, plus `DecodeError::InvalidUtf16` if the
/// units do not form valid UTF-16.
pub fn decode(bits: &BitArray, tree: &CodeTree) -> Result<String> {
    let units = decode_units(bits, tree)?;
    log::debug!("decoded {} bits into {} units", bits.len(), units.len());
    String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16.into())
}
