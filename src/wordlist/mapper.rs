//! Index to string mapping

use std::ops::Range;

use super::Alphabet;
use crate::config_error;
use crate::error::{Result, WordlistError};

/// Bijection between `[0, total)` and every string of length `1..=max_length`
/// over an alphabet.
///
/// `cumulative[l]` holds the number of strings of length `<= l`, so the
/// length-`l` block occupies `[cumulative[l - 1], cumulative[l])`.
#[derive(Debug, Clone)]
pub struct ComboMapper {
    alphabet: Alphabet,
    max_length: usize,
    cumulative: Vec<u64>,
}

impl ComboMapper {
    /// Precompute the cumulative table. Fails if the universe does not fit in u64.
    pub fn new(alphabet: Alphabet, max_length: usize) -> Result<Self> {
        if max_length == 0 {
            return Err(config_error!("max_length must be at least 1"));
        }

        let base = alphabet.len() as u64;
        let mut cumulative = Vec::with_capacity(max_length + 1);
        cumulative.push(0u64);
        let mut block = 1u64;
        for length in 1..=max_length {
            block = block.checked_mul(base).ok_or_else(|| {
                config_error!("{}^{} strings overflow a 64-bit index", base, length)
            })?;
            let previous = cumulative[length - 1];
            let next = previous.checked_add(block).ok_or_else(|| {
                config_error!("total combinations up to length {} overflow a 64-bit index", length)
            })?;
            cumulative.push(next);
        }

        Ok(Self {
            alphabet,
            max_length,
            cumulative,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Total number of strings in the universe
    pub fn total(&self) -> u64 {
        self.cumulative[self.max_length]
    }

    pub fn cumulative(&self) -> &[u64] {
        &self.cumulative
    }

    /// Length of the string at `index`
    pub fn block_len(&self, index: u64) -> Result<usize> {
        if index >= self.total() {
            return Err(WordlistError::index_out_of_range(index, self.total()));
        }
        // cumulative[0] == 0 <= index, so the partition point is in 1..=max_length
        Ok(self.cumulative.partition_point(|&c| c <= index))
    }

    /// String at a global index
    pub fn combo_at(&self, index: u64) -> Result<String> {
        let length = self.block_len(index)?;
        Ok(self.render(length, index))
    }

    /// Inverse of [`Self::combo_at`]. `None` for strings outside the universe.
    pub fn index_of(&self, combo: &str) -> Option<u64> {
        let length = combo.chars().count();
        if length == 0 || length > self.max_length {
            return None;
        }

        let base = self.alphabet.len() as u64;
        let mut offset = 0u64;
        for c in combo.chars() {
            offset = offset * base + self.alphabet.digit_of(c)?;
        }
        Some(self.cumulative[length - 1] + offset)
    }

    /// Ordered iterator over `range`, checked up front
    pub fn combos(&self, range: Range<u64>) -> Result<Combos<'_>> {
        if range.start > range.end || range.end > self.total() {
            return Err(WordlistError::index_out_of_range(
                range.end.max(range.start),
                self.total(),
            ));
        }
        Ok(Combos {
            mapper: self,
            range,
        })
    }

    /// Size in bytes of the complete output, one newline per string
    pub fn estimated_bytes(&self) -> u128 {
        (1..=self.max_length)
            .map(|l| {
                let count = self.cumulative[l] - self.cumulative[l - 1];
                count as u128 * (l as u128 + 1)
            })
            .sum()
    }

    /// Base-N digits of the in-block offset, most significant first
    fn render(&self, length: usize, index: u64) -> String {
        let symbols = self.alphabet.symbols();
        let base = symbols.len() as u64;
        let mut offset = index - self.cumulative[length - 1];
        let mut result = vec![symbols[0]; length];

        for slot in result.iter_mut().rev() {
            *slot = symbols[(offset % base) as usize];
            offset /= base;
        }

        result.into_iter().collect()
    }
}

/// Iterator returned by [`ComboMapper::combos`]
pub struct Combos<'a> {
    mapper: &'a ComboMapper,
    range: Range<u64>,
}

impl Iterator for Combos<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.range.next()?;
        let length = self.mapper.cumulative.partition_point(|&c| c <= index);
        Some(self.mapper.render(length, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}
