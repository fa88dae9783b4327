//! Cursor persistence for resume capability
//!
//! The state file holds a single decimal number: the index of the last entry
//! of the last fully written output file.

use std::path::{Path, PathBuf};

use crate::error::{Result, WordlistError};

/// Durable cursor stored as plain text
#[derive(Debug, Clone)]
pub struct CursorState {
    path: PathBuf,
}

impl CursorState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last written index, or `None` when the file is missing, unreadable,
    /// or does not parse as an index. Values past the end clamp to `total - 1`.
    pub fn load(&self, total: u64) -> Option<u64> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No cursor file, starting fresh");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cursor file unreadable, starting fresh");
                return None;
            }
        };

        match content.trim().parse::<u64>() {
            Ok(last) if last < total => Some(last),
            Ok(last) => {
                tracing::warn!(
                    path = %self.path.display(),
                    last,
                    total,
                    "Cursor beyond the enumeration range, treating the run as finished"
                );
                total.checked_sub(1)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    content = %content.trim(),
                    error = %e,
                    "Cursor file does not hold an index, starting fresh"
                );
                None
            }
        }
    }

    /// Overwrite the cursor with `last_written`.
    ///
    /// Writes a sibling temp file and renames it into place so readers see
    /// either the old or the new value.
    pub fn save(&self, last_written: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| WordlistError::state(e.to_string(), Some(parent)))?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, last_written.to_string())
            .map_err(|e| WordlistError::state(e.to_string(), Some(&tmp)))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| WordlistError::state(e.to_string(), Some(&self.path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let state = CursorState::new(dir.path().join("state.txt"));
        assert_eq!(state.load(100), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let state = CursorState::new(dir.path().join("state.txt"));
        state.save(41).unwrap();
        assert_eq!(state.load(100), Some(41));
        assert_eq!(std::fs::read_to_string(state.path()).unwrap(), "41");

        state.save(99).unwrap();
        assert_eq!(state.load(100), Some(99));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.txt");
        std::fs::write(&path, "  \n17\r\n").unwrap();
        assert_eq!(CursorState::new(&path).load(100), Some(17));
    }

    #[test]
    fn test_garbage_is_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.txt");
        for content in ["", "abc", "-5", "12.5"] {
            std::fs::write(&path, content).unwrap();
            assert_eq!(CursorState::new(&path).load(100), None, "content {:?}", content);
        }
    }

    #[test]
    fn test_out_of_range_clamps_to_last_index() {
        let dir = tempfile::tempdir().unwrap();
        let state = CursorState::new(dir.path().join("state.txt"));
        state.save(100).unwrap();
        assert_eq!(state.load(100), Some(99));
        state.save(u64::MAX).unwrap();
        assert_eq!(state.load(100), Some(99));
    }

    #[test]
    fn test_save_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let state = CursorState::new(dir.path().join("nested/state.txt"));
        state.save(3).unwrap();
        assert_eq!(state.load(10), Some(3));
    }
}
