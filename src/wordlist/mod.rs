//! Wordlist generation - enumerate every string over a fixed alphabet
//!
//! Strings are ordered by length first, then as a big-endian counter over
//! the alphabet. Output is split into numbered files and the cursor is
//! persisted after each file so an interrupted run can resume.

mod checkpoint;
mod clock;
mod mapper;
mod progress;
mod state;
mod writer;

pub use checkpoint::{CheckpointRequest, Checkpointer, GitCheckpointer, NoopCheckpointer};
pub use clock::{Clock, ManualClock, SystemClock};
pub use mapper::{ComboMapper, Combos};
pub use progress::{
    format_count, format_eta, ConsoleReporter, ProgressReporter, ProgressThrottle, SilentReporter,
};
pub use state::CursorState;
pub use writer::BatchWriter;

use crate::config_error;
use crate::error::Result;

/// Ordered set of distinct symbols used as digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: crate::types::DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

impl Alphabet {
    /// Build an alphabet, rejecting empty input and repeated symbols
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(config_error!("alphabet must not be empty"));
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(config_error!("alphabet contains '{}' more than once", c));
            }
        }
        Ok(Self { symbols })
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Position of a symbol, used as its digit value
    pub fn digit_of(&self, c: char) -> Option<u64> {
        self.symbols.iter().position(|&s| s == c).map(|p| p as u64)
    }

    /// Compact description, runs of three or more consecutive code points
    /// collapse to ranges: `a-z A-Z 0-9 _ .`
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        let mut start = 0;
        while start < self.symbols.len() {
            let mut end = start;
            while end + 1 < self.symbols.len()
                && self.symbols[end + 1] as u32 == self.symbols[end] as u32 + 1
            {
                end += 1;
            }
            if end - start >= 2 {
                parts.push(format!("{}-{}", self.symbols[start], self.symbols[end]));
            } else {
                parts.extend(self.symbols[start..=end].iter().map(|c| c.to_string()));
            }
            start = end + 1;
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabet() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 64);
        assert_eq!(alphabet.symbols()[0], 'a');
        assert_eq!(alphabet.symbols()[63], '.');
    }

    #[test]
    fn test_alphabet_rejects_duplicates() {
        assert!(Alphabet::new("abca").is_err());
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("abc").is_ok());
    }

    #[test]
    fn test_summary() {
        assert_eq!(Alphabet::default().summary(), "a-z A-Z 0-9 _ .");
        assert_eq!(Alphabet::new("ab").unwrap().summary(), "a b");
        assert_eq!(Alphabet::new("xabc").unwrap().summary(), "x a-c");
    }

    #[test]
    fn test_digit_of() {
        let alphabet = Alphabet::new("abc").unwrap();
        assert_eq!(alphabet.digit_of('c'), Some(2));
        assert_eq!(alphabet.digit_of('z'), None);
    }
}
