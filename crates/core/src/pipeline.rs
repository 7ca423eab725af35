//! End-to-end compression and decompression.
//!
//! Compress: text -> frequency table -> code tree -> code table -> bits.
//! Decompress: frequency table -> rebuilt code tree -> bits -> text.
//!
//! Empty text has no tree. It compresses to an empty frequency table with a
//! zero-length payload and decompresses back to an empty string.

use std::fs;
use std::path::Path;

use crate::bitarray::BitArray;
use crate::container::{self, Container};
use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::{ContainerError, DecodeError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::CodeTree;

/// Compress `text` into a container.
pub fn compress(text: &str) -> Result<Container> {
    let frequencies = FrequencyTable::count(text)?;
    if frequencies.is_empty() {
        log::debug!("empty input, writing empty container");
        return Ok(Container {
            frequencies,
            bits: BitArray::new(0),
        });
    }

    let tree = CodeTree::build(&frequencies)?;
    let bits = encode(text, &tree.code_table())?;

    log::debug!(
        "compressed {} units ({} distinct) into {} bits",
        frequencies.total(),
        frequencies.len(),
        bits.len()
    );
    Ok(Container { frequencies, bits })
}

/// Rebuild the text stored in `container`.
///
/// # Errors
/// - `ContainerError::Corrupt` if an empty table comes with payload bits
/// - `DecodeError::LengthMismatch` if the payload does not hold exactly the
///   number of units the frequency table declares
/// - Any decoder error
pub fn decompress(container: &Container) -> Result<String> {
    let Container { frequencies, bits } = container;
    if frequencies.is_empty() {
        if !bits.is_empty() {
            return Err(ContainerError::Corrupt(format!(
                "{} payload bits without a frequency table",
                bits.len()
            ))
            .into());
        }
        return Ok(String::new());
    }

    let tree = CodeTree::build(frequencies)?;
    let text = decode(bits, &tree)?;

    let expected = frequencies.total();
    let actual = text.encode_utf16().count() as u64;
    if actual != expected {
        return Err(DecodeError::LengthMismatch { expected, actual }.into());
    }

    Ok(text)
}

/// Compress `text` straight into container bytes.
pub fn compress_to_bytes(text: &str) -> Result<Vec<u8>> {
    let compressed = compress(text)?;
    container::to_bytes(&compressed.frequencies, &compressed.bits)
}

/// Decompress container bytes into text.
pub fn decompress_bytes(bytes: &[u8]) -> Result<String> {
    decompress(&container::from_bytes(bytes)?)
}

/// Compress the text file at `input` into a container file at `output`.
///
/// Returns the container that was written.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Container> {
    let text = fs::read_to_string(input.as_ref())?;
    let compressed = compress(&text)?;
    container::write_file(output.as_ref(), &compressed.frequencies, &compressed.bits)?;

    log::info!(
        "compressed {} -> {} ({} bytes)",
        input.as_ref().display(),
        output.as_ref().display(),
        compressed.encoded_len()
    );
    Ok(compressed)
}

/// Decompress the container file at `input` into a text file at `output`.
///
/// Returns the recovered text.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<String> {
    let compressed = container::read_file(input.as_ref())?;
    let text = decompress(&compressed)?;
    fs::write(output.as_ref(), &text)?;

    log::info!(
        "decompressed {} -> {} ({} bytes)",
        input.as_ref().display(),
        output.as_ref().display(),
        text.len()
    );
    Ok(text)
}
