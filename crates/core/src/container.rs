//! Binary container serialization and parsing.
//!
//! A container stores everything needed to rebuild the text:
//! - Frequency table: the decoder rebuilds the same code tree from it
//! - Payload: the encoded bits, packed LSB-first
//!
//! # Container Format
//!
//! ```text
//! +---------------------+
//! | entry_count (4)     |  i32 big-endian, number of distinct units
//! +---------------------+
//! | unit (2)            |  u16 big-endian  \
//! | count (4)           |  i32 big-endian  / repeated entry_count times
//! +---------------------+
//! | bit_count (4)       |  i32 big-endian, logical payload length in bits
//! +---------------------+
//! | payload             |  ceil(bit_count / 8) bytes
//! | (variable)          |
//! +---------------------+
//! ```
//!
//! Padding bits in the last payload byte are written as zero and ignored on
//! read. Bytes after the payload are ignored.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::bitarray::{bytes_for_bits, BitArray};
use crate::error::{ContainerError, Error, Result};
use crate::frequency::FrequencyTable;
use crate::Symbol;

/// Size of one frequency entry in bytes
pub const ENTRY_SIZE: usize = 6;

/// Most entries a valid container can hold (one per possible unit)
pub const MAX_ENTRIES: usize = 1 << 16;

/// A parsed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Frequencies the code tree is rebuilt from
    pub frequencies: FrequencyTable,

    /// Encoded payload
    pub bits: BitArray,
}

impl Container {
    /// Total serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        encoded_len(&self.frequencies, &self.bits)
    }
}

/// Serialized size of a container holding `frequencies` and `bits`.
pub fn encoded_len(frequencies: &FrequencyTable, bits: &BitArray) -> usize {
    4 + frequencies.len() * ENTRY_SIZE + 4 + bits.byte_len()
}

/// Write a container to `writer`.
///
/// # Errors
/// - `ContainerError::Corrupt` if a length does not fit its int32 field
/// - `Error::Io` if the writer fails
pub fn write_container<W: Write>(
    writer: &mut W,
    frequencies: &FrequencyTable,
    bits: &BitArray,
) -> Result<()> {
    let entry_count = i32::try_from(frequencies.len())
        .map_err(|_| ContainerError::Corrupt("too many entries".to_string()))?;
    let bit_count = i32::try_from(bits.len())
        .map_err(|_| ContainerError::Corrupt("payload too large".to_string()))?;

    writer.write_all(&entry_count.to_be_bytes())?;
    for (symbol, count) in frequencies.iter() {
        // FrequencyTable caps counts at i32::MAX
        let count = count as i32;
        writer.write_all(&symbol.to_be_bytes())?;
        writer.write_all(&count.to_be_bytes())?;
    }

    writer.write_all(&bit_count.to_be_bytes())?;
    writer.write_all(bits.as_bytes())?;

    log::debug!(
        "wrote container: {} entries, {} bits, {} bytes",
        entry_count,
        bit_count,
        encoded_len(frequencies, bits)
    );
    Ok(())
}

/// Serialize a container into a byte vector.
pub fn to_bytes(frequencies: &FrequencyTable, bits: &BitArray) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded_len(frequencies, bits));
    write_container(&mut out, frequencies, bits)?;
    Ok(out)
}

/// Read a container from `reader`.
///
/// # Errors
/// - `ContainerError::Truncated` if input ends before a declared field or
///   before the declared payload length
/// - `ContainerError::Corrupt` for negative counts, too many entries,
///   zero counts or duplicate units
/// - `Error::Io` for other read failures
pub fn read_container<R: Read>(reader: &mut R) -> Result<Container> {
    let entry_count = read_i32(reader, "entry count")?;
    let entry_count = usize::try_from(entry_count)
        .map_err(|_| ContainerError::Corrupt(format!("negative entry count {}", entry_count)))?;
    if entry_count > MAX_ENTRIES {
        return Err(ContainerError::Corrupt(format!(
            "entry count {} exceeds {}",
            entry_count, MAX_ENTRIES
        ))
        .into());
    }

    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        let symbol = read_u16(reader, "frequency entry")?;
        let count = read_i32(reader, "frequency entry")?;
        let count = u32::try_from(count).map_err(|_| {
            ContainerError::Corrupt(format!("negative count {} for unit {:#06x}", count, symbol))
        })?;
        entries.push((symbol, count));
    }
    let frequencies = FrequencyTable::from_entries(entries)
        .map_err(|e| ContainerError::Corrupt(e.to_string()))?;

    let bit_count = read_i32(reader, "bit count")?;
    let bit_count = usize::try_from(bit_count)
        .map_err(|_| ContainerError::Corrupt(format!("negative bit count {}", bit_count)))?;

    // At most `expected` bytes; a short read means the file was cut
    let expected = bytes_for_bits(bit_count);
    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(expected as u64)
        .read_to_end(&mut payload)?;
    if payload.len() < expected {
        return Err(ContainerError::Truncated { section: "payload" }.into());
    }
    let bits = BitArray::from_bytes(bit_count, payload)?;

    log::debug!(
        "read container: {} entries, {} bits",
        frequencies.len(),
        bits.len()
    );
    Ok(Container { frequencies, bits })
}

/// Parse a container from a byte slice.
///
/// Trailing bytes after the payload are ignored.
pub fn from_bytes(bytes: &[u8]) -> Result<Container> {
    let mut cursor = io::Cursor::new(bytes);
    let container = read_container(&mut cursor)?;

    let trailing = bytes.len() - cursor.position() as usize;
    if trailing > 0 {
        log::warn!("ignoring {} trailing bytes after container payload", trailing);
    }
    Ok(container)
}

/// Write a container to a file, creating or truncating it.
///
/// The file is flushed before returning.
pub fn write_file<P: AsRef<Path>>(
    path: P,
    frequencies: &FrequencyTable,
    bits: &BitArray,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_container(&mut writer, frequencies, bits)?;
    writer.flush()?;
    Ok(())
}

/// Read a container from a file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Container> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let container = read_container(&mut reader)?;

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest)?;
    if !rest.is_empty() {
        log::warn!(
            "ignoring {} trailing bytes after container payload in {}",
            rest.len(),
            path.as_ref().display()
        );
    }
    Ok(container)
}

fn read_section<R: Read>(reader: &mut R, buf: &mut [u8], section: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::from(ContainerError::Truncated { section }),
        _ => Error::Io(e),
    })
}

fn read_i32<R: Read>(reader: &mut R, section: &'static str) -> Result<i32> {
    let mut buf = [0u8; 4];
    read_section(reader, &mut buf, section)?;
    Ok(i32::from_be_bytes(buf))
}

fn read_u16<R: Read>(reader: &mut R, section: &'static str) -> Result<Symbol> {
    let mut buf = [0u8; 2];
    read_section(reader, &mut buf, section)?;
    Ok(u16::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::tree::CodeTree;

    fn container_bytes(text: &str) -> Vec<u8> {
        let freqs = FrequencyTable::count(text).unwrap();
        let bits = if freqs.is_empty() {
            BitArray::new(0)
        } else {
            encode(text, &CodeTree::build(&freqs).unwrap().code_table()).unwrap()
        };
        to_bytes(&freqs, &bits).unwrap()
    }

    #[test]
    fn test_aab_layout() {
        let bytes = container_bytes("aab");

        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 2,             // entry_count
            0, b'a', 0, 0, 0, 2,    // 'a' x2
            0, b'b', 0, 0, 0, 1,    // 'b' x1
            0, 0, 0, 3,             // bit_count
            0b0000_0011,            // "110" LSB-first
        ];
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 21);
    }

    #[test]
    fn test_parse_aab() {
        let container = from_bytes(&container_bytes("aab")).unwrap();

        assert_eq!(container.frequencies.len(), 2);
        assert_eq!(container.frequencies.get(b'a' as Symbol), 2);
        assert_eq!(container.frequencies.get(b'b' as Symbol), 1);
        assert_eq!(container.bits.len(), 3);
        assert_eq!(container.bits.to_string(), "110");
        assert_eq!(container.encoded_len(), 21);
    }

    #[test]
    fn test_empty_container() {
        let bytes = container_bytes("");
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0, 0]);

        let container = from_bytes(&bytes).unwrap();
        assert!(container.frequencies.is_empty());
        assert!(container.bits.is_empty());
    }

    #[test]
    fn test_padding_bits_ignored() {
        let mut bytes = container_bytes("aab");
        let last = bytes.len() - 1;
        bytes[last] |= 0b1111_1000;

        let container = from_bytes(&bytes).unwrap();
        assert_eq!(container.bits.to_string(), "110");
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = container_bytes("some text that spans several payload bytes");
        bytes.pop();

        let result = from_bytes(&bytes);
        assert!(matches!(
            result,
            Err(Error::Container(ContainerError::Truncated { section: "payload" }))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let bytes = container_bytes("aab");

        assert!(matches!(
            from_bytes(&bytes[..2]),
            Err(Error::Container(ContainerError::Truncated { section: "entry count" }))
        ));
        assert!(matches!(
            from_bytes(&bytes[..9]),
            Err(Error::Container(ContainerError::Truncated { section: "frequency entry" }))
        ));
        assert!(matches!(
            from_bytes(&bytes[..18]),
            Err(Error::Container(ContainerError::Truncated { section: "bit count" }))
        ));
    }

    #[test]
    fn test_negative_entry_count() {
        let bytes = (-1i32).to_be_bytes();
        assert!(matches!(
            from_bytes(&bytes),
            Err(Error::Container(ContainerError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_too_many_entries() {
        let bytes = (MAX_ENTRIES as i32 + 1).to_be_bytes();
        assert!(matches!(
            from_bytes(&bytes),
            Err(Error::Container(ContainerError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_zero_count_entry() {
        let mut bytes = container_bytes("aab");
        // count of 'b'
        bytes[12..16].copy_from_slice(&0i32.to_be_bytes());

        assert!(matches!(
            from_bytes(&bytes),
            Err(Error::Container(ContainerError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_duplicate_entry() {
        let mut bytes = container_bytes("aab");
        // rename 'b' to 'a'
        bytes[11] = b'a';

        assert!(matches!(
            from_bytes(&bytes),
            Err(Error::Container(ContainerError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = container_bytes("aab");
        bytes.extend_from_slice(&[0xAA, 0xBB]);

        let container = from_bytes(&bytes).unwrap();
        assert_eq!(container.bits.to_string(), "110");
    }
}
