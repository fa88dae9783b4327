//! Core types and structures for wordlist-forge

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config_error;
use crate::error::Result;

/// Symbols used by the default build: a-z, A-Z, 0-9, `_` and `.`
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_.";

/// Generator configuration.
///
/// Fixed for the lifetime of a run. The binary always uses [`Default`], tests
/// build small instances (tiny alphabet, short strings) for fast verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Ordered, distinct symbols
    pub alphabet: String,
    /// Longest string length to enumerate (lengths 1..=max_length)
    pub max_length: usize,
    /// Entries generated between progress samples
    pub batch_size: u64,
    /// Entries per output file
    pub entries_per_file: u64,
    /// Checkpoint every N completed files
    pub checkpoint_interval: u64,
    /// Minimum wall-clock time between progress reports
    pub progress_interval: Duration,
    /// Directory receiving output files
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    /// Durable cursor file
    pub state_file: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            max_length: 4,
            batch_size: 250_000,
            entries_per_file: 2_000_000,
            checkpoint_interval: 20,
            progress_interval: Duration::from_millis(150),
            output_dir: PathBuf::from("."),
            file_prefix: "combos_".to_string(),
            file_extension: "txt".to_string(),
            state_file: PathBuf::from("state.txt"),
        }
    }
}

impl GeneratorConfig {
    /// Check the sizing knobs. Alphabet and universe checks live in
    /// [`crate::wordlist::Alphabet::new`] and [`crate::wordlist::ComboMapper::new`].
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(config_error!("max_length must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(config_error!("batch_size must be at least 1"));
        }
        if self.entries_per_file == 0 {
            return Err(config_error!("entries_per_file must be at least 1"));
        }
        if self.checkpoint_interval == 0 {
            return Err(config_error!("checkpoint_interval must be at least 1"));
        }
        Ok(())
    }

    /// File name for a 1-based output file number, e.g. `combos_000001.txt`
    pub fn file_name(&self, file_number: u64) -> String {
        format!("{}{:06}.{}", self.file_prefix, file_number, self.file_extension)
    }

    /// Full output path for a 1-based output file number
    pub fn output_path(&self, file_number: u64) -> PathBuf {
        self.output_dir.join(self.file_name(file_number))
    }

    /// Number of output files needed for `total` entries
    pub fn file_count(&self, total: u64) -> u64 {
        total.div_ceil(self.entries_per_file)
    }

    pub fn state_path(&self) -> &Path {
        &self.state_file
    }
}

/// How a run found its starting point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeMode {
    /// No usable cursor, starting at index 0
    Fresh,
    /// Continuing after a persisted cursor
    Resumed { last_written: u64 },
}

/// Emitted once before generation begins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartInfo {
    pub mode: ResumeMode,
    pub next_index: u64,
    pub total: u64,
    pub files_completed: u64,
}

impl StartInfo {
    pub fn percent_complete(&self) -> f64 {
        percent(self.next_index, self.total)
    }
}

/// Throttled progress sample
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub file_number: u64,
    pub position: u64,
    pub total: u64,
    /// Entries per second since the previous report
    pub speed: f64,
    pub eta: Option<Duration>,
}

impl ProgressReport {
    pub fn percent(&self) -> f64 {
        percent(self.position, self.total)
    }
}

/// A finalized output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub file_number: u64,
    pub path: PathBuf,
    pub entries: u64,
    pub files_completed: u64,
    /// Cursor value persisted after this file
    pub last_index: u64,
}

/// Aggregate statistics for a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Size of the whole universe
    pub total: u64,
    /// Entries written by this process
    pub generated: u64,
    /// First index this process generated
    pub resumed_from: u64,
    pub files_completed: u64,
    pub elapsed: Duration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Average throughput in entries per second
    pub fn average_speed(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.generated as f64 / secs
        } else {
            0.0
        }
    }
}

fn percent(position: u64, total: u64) -> f64 {
    if total == 0 {
        100.0
    } else {
        (position as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.alphabet.chars().count(), 64);
        assert_eq!(config.max_length, 4);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let config = GeneratorConfig {
            entries_per_file: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            checkpoint_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_naming() {
        let config = GeneratorConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(config.file_name(1), "combos_000001.txt");
        assert_eq!(config.file_name(123456), "combos_123456.txt");
        assert_eq!(config.output_path(9), PathBuf::from("out/combos_000009.txt"));
    }

    #[test]
    fn test_file_count() {
        let config = GeneratorConfig::default();
        assert_eq!(config.file_count(17_043_520), 9);
        assert_eq!(config.file_count(2_000_000), 1);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"alphabet":"abc","max_length":2}"#).unwrap();
        assert_eq!(config.alphabet, "abc");
        assert_eq!(config.entries_per_file, 2_000_000);
        assert_eq!(config.file_prefix, "combos_");
    }

    #[test]
    fn test_average_speed() {
        let now = Utc::now();
        let summary = RunSummary {
            total: 12,
            generated: 10,
            resumed_from: 2,
            files_completed: 3,
            elapsed: Duration::from_secs(2),
            started_at: now,
            finished_at: now,
        };
        assert_eq!(summary.average_speed(), 5.0);
    }
}
