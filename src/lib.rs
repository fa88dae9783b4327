//! Wordlist Forge - resumable fixed-alphabet wordlist generation
//!
//! Enumerates every string of length 1..=N over a fixed alphabet, shortest
//! first, writes them to numbered files and checkpoints progress to git.

pub mod error;
pub mod types;
pub mod wordlist;

// Re-export commonly used types
pub use error::{Result, WordlistError};
pub use types::{
    FileReport, GeneratorConfig, ProgressReport, ResumeMode, RunSummary, StartInfo,
    DEFAULT_ALPHABET,
};

// Re-export main functionality
pub use wordlist::{Alphabet, BatchWriter, ComboMapper};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
