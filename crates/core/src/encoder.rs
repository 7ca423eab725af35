//! Text to bit sequence.
//!
//! The output length is computed up front so the payload lands in a
//! `BitArray` of exactly the right size.

use crate::bitarray::BitArray;
use crate::error::{EncodeError, Result};
use crate::tree::CodeTable;

/// Largest bit count the container can persist (int32).
pub const MAX_PAYLOAD_BITS: u64 = i32::MAX as u64;

/// Encode `text` with `table`, one code per UTF-16 unit, in text order.
///
/// # Errors
/// - `EncodeError::SymbolNotInTable` if a unit has no code
/// - `EncodeError::PayloadTooLarge` if the output exceeds `MAX_PAYLOAD_BITS`
pub fn encode(text: &str, table: &CodeTable) -> Result<BitArray> {
    let mut total: u64 = 0;
    for (position, symbol) in text.encode_utf16().enumerate() {
        let code = table
            .get(&symbol)
            .ok_or(EncodeError::SymbolNotInTable { symbol, position })?;
        total += code.len() as u64;
    }

    if total > MAX_PAYLOAD_BITS {
        return Err(EncodeError::PayloadTooLarge {
            bits: total,
            max: MAX_PAYLOAD_BITS,
        }
        .into());
    }

    let mut bits = BitArray::new(total as usize);
    let mut index = 0;
    for (position, symbol) in text.encode_utf16().enumerate() {
        let code = table
            .get(&symbol)
            .ok_or(EncodeError::SymbolNotInTable { symbol, position })?;
        for &bit in code {
            bits.set(index, bit)?;
            index += 1;
        }
    }

    log::debug!(
        "encoded {} units into {} bits ({} bytes)",
        text.encode_utf16().count(),
        bits.len(),
        bits.byte_len()
    );
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::FrequencyTable;
    use crate::tree::CodeTree;

    fn table_for(text: &str) -> CodeTable {
        let freqs = FrequencyTable::count(text).unwrap();
        CodeTree::build(&freqs).unwrap().code_table()
    }

    #[test]
    fn test_encode_aab() {
        let bits = encode("aab", &table_for("aab")).unwrap();

        // a = "1", b = "0"
        assert_eq!(bits.len(), 3);
        assert_eq!(bits.to_string(), "110");
        assert_eq!(bits.as_bytes(), &[0b0000_0011]);
    }

    #[test]
    fn test_encode_empty() {
        let bits = encode("", &CodeTable::new()).unwrap();
        assert!(bits.is_empty());
        assert_eq!(bits.byte_len(), 0);
    }

    #[test]
    fn test_encode_single_symbol() {
        let bits = encode("qqqqq", &table_for("qqqqq")).unwrap();
        assert_eq!(bits.to_string(), "00000");
    }

    #[test]
    fn test_length_matches_weighted_code_lengths() {
        let text = "she sells sea shells by the sea shore";
        let freqs = FrequencyTable::count(text).unwrap();
        let table = CodeTree::build(&freqs).unwrap().code_table();

        let expected: u64 = freqs
            .iter()
            .map(|(s, c)| c as u64 * table[&s].len() as u64)
            .sum();
        let bits = encode(text, &table).unwrap();
        assert_eq!(bits.len() as u64, expected);
    }

    #[test]
    fn test_empty_table_rejects_text() {
        let result = encode("x", &CodeTable::new());
        assert!(matches!(
            result,
            Err(Error::Encode(EncodeError::SymbolNotInTable { position: 0, .. }))
        ));
    }

    #[test]
    fn test_missing_symbol() {
        let result = encode("abc", &table_for("ab"));
        assert!(matches!(
            result,
            Err(Error::Encode(EncodeError::SymbolNotInTable { position: 2, .. }))
        ));
    }
}
