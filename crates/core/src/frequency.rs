//! Character unit frequency counting.
//!
//! Units are UTF-16 code units. The table is ordered by unit value so the
//! encode side and the decode side walk the entries in the same order, which
//! keeps tree construction reproducible.

use std::collections::BTreeMap;

use crate::error::{FrequencyError, Result};
use crate::Symbol;

/// Largest count the container can persist (int32).
pub const MAX_COUNT: u32 = i32::MAX as u32;

/// Occurrence count of each distinct unit in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol, u32>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every unit of `text` in a single pass.
    ///
    /// # Errors
    /// Returns `FrequencyError::CountOverflow` if one unit occurs more than
    /// `MAX_COUNT` times.
    pub fn count(text: &str) -> Result<Self> {
        let mut table = Self::new();
        for unit in text.encode_utf16() {
            table.increment(unit)?;
        }
        Ok(table)
    }

    /// Build a table from explicit `(unit, count)` entries.
    ///
    /// # Errors
    /// - `FrequencyError::ZeroCount` for a zero count
    /// - `FrequencyError::CountOverflow` for a count above `MAX_COUNT`
    /// - `FrequencyError::DuplicateSymbol` if a unit appears twice
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, u32)>,
    {
        let mut counts = BTreeMap::new();
        for (symbol, count) in entries {
            if count == 0 {
                return Err(FrequencyError::ZeroCount { symbol }.into());
            }
            if count > MAX_COUNT {
                return Err(FrequencyError::CountOverflow {
                    symbol,
                    max: MAX_COUNT,
                }
                .into());
            }
            if counts.insert(symbol, count).is_some() {
                return Err(FrequencyError::DuplicateSymbol { symbol }.into());
            }
        }
        Ok(Self { counts })
    }

    fn increment(&mut self, symbol: Symbol) -> Result<()> {
        let count = self.counts.entry(symbol).or_insert(0);
        if *count == MAX_COUNT {
            return Err(FrequencyError::CountOverflow {
                symbol,
                max: MAX_COUNT,
            }
            .into());
        }
        *count += 1;
        Ok(())
    }

    /// Count for `symbol`, or 0 if it never occurred.
    pub fn get(&self, symbol: Symbol) -> u32 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct units.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the text length in units.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// Entries in ascending unit order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u32)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }

    /// Shannon entropy of the distribution in bits per unit.
    ///
    /// Returns 0.0 for an empty table.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.counts
            .values()
            .map(|&c| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_count_simple() {
        let table = FrequencyTable::count("aab").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b'a' as Symbol), 2);
        assert_eq!(table.get(b'b' as Symbol), 1);
        assert_eq!(table.get(b'z' as Symbol), 0);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_empty_text() {
        let table = FrequencyTable::count("").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_iteration_is_ordered() {
        let table = FrequencyTable::count("zyxzy").unwrap();
        let symbols: Vec<Symbol> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'x' as Symbol, b'y' as Symbol, b'z' as Symbol]);
    }

    #[test]
    fn test_counts_utf16_units() {
        // U+1F600 is a surrogate pair: two distinct units
        let table = FrequencyTable::count("é😀").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0x00E9), 1);
        assert_eq!(table.get(0xD83D), 1);
        assert_eq!(table.get(0xDE00), 1);
    }

    #[test]
    fn test_from_entries_rejects_zero() {
        let result = FrequencyTable::from_entries([(1, 4), (2, 0)]);
        assert!(matches!(
            result,
            Err(Error::Frequency(FrequencyError::ZeroCount { symbol: 2 }))
        ));
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = FrequencyTable::from_entries([(7, 1), (7, 2)]);
        assert!(matches!(
            result,
            Err(Error::Frequency(FrequencyError::DuplicateSymbol { symbol: 7 }))
        ));
    }

    #[test]
    fn test_from_entries_rejects_overflow() {
        let result = FrequencyTable::from_entries([(7, MAX_COUNT + 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_entropy_uniform() {
        let table = FrequencyTable::count("abcd").unwrap();
        assert!((table.entropy() - 2.0).abs() < 1e-9);
    }
}
