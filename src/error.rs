//! Error handling for wordlist-forge

use std::path::Path;

use thiserror::Error;

/// Main error type for wordlist-forge
#[derive(Error, Debug, Clone)]
pub enum WordlistError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Index {index} is outside the enumeration range [0, {total})")]
    IndexOutOfRange { index: u64, total: u64 },

    #[error("Output file error ({path}): {message}")]
    Output { message: String, path: String },

    #[error("State file error: {message}")]
    State {
        message: String,
        path: Option<String>,
    },

    #[error("Checkpoint step '{step}' failed: {message}")]
    Checkpoint { step: String, message: String },
}

impl WordlistError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an out-of-range index error
    pub fn index_out_of_range(index: u64, total: u64) -> Self {
        Self::IndexOutOfRange { index, total }
    }

    /// Create an output file error
    pub fn output(message: impl Into<String>, path: &Path) -> Self {
        Self::Output {
            message: message.into(),
            path: path.to_string_lossy().to_string(),
        }
    }

    /// Create a state file error
    pub fn state(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self::State {
            message: message.into(),
            path: path.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// Create a checkpoint error
    pub fn checkpoint(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Checkpoint {
            step: step.into(),
            message: message.into(),
        }
    }

    /// Whether the generation loop has to stop on this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Checkpoint { .. } | Self::State { .. })
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check the generator constants", message)
            }
            Self::IndexOutOfRange { index, total } => {
                format!("❌ Index {} is out of range (total {})\n💡 This is a bug, please report it", index, total)
            }
            Self::Output { message, path } => {
                format!("❌ Could not write output file ({}): {}\n💡 Check disk space and permissions; the last saved cursor is still valid", path, message)
            }
            Self::State { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("⚠️  Could not save progress{}: {}\n💡 A restart may regenerate the last file", path_info, message)
            }
            Self::Checkpoint { step, message } => {
                format!("⚠️  {} failed: {}\n💡 Check git remote access; generation continues", step, message)
            }
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, WordlistError>;

/// Helper macro for configuration errors
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::WordlistError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::WordlistError::config(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_errors_are_not_fatal() {
        assert!(!WordlistError::checkpoint("git push", "rejected").is_fatal());
        assert!(!WordlistError::state("disk full", None).is_fatal());
        assert!(WordlistError::output("disk full", Path::new("combos_000001.txt")).is_fatal());
        assert!(WordlistError::index_out_of_range(12, 12).is_fatal());
    }

    #[test]
    fn test_config_macro() {
        let err = config_error!("max_length must be at least {}", 1);
        assert!(err.to_string().contains("max_length must be at least 1"));
    }

    #[test]
    fn test_user_message_mentions_path() {
        let err = WordlistError::output("permission denied", Path::new("out/combos_000003.txt"));
        assert!(err.user_message().contains("combos_000003.txt"));
    }
}
