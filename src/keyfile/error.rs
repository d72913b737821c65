use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading a key file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyFileError {
    /// The file could not be read.
    #[error("failed to read '{path}': {details}")]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        details: String,
    },

    /// A line could not be parsed.
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The requested group is not present.
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    /// The requested key is not present in its group.
    #[error("key '{key}' not found in group '{group}'")]
    KeyNotFound {
        /// Group that was searched
        group: String,
        /// Missing key
        key: String,
    },

    /// The key exists but its value has the wrong shape.
    #[error("invalid value for '{group}.{key}': {reason}")]
    InvalidValue {
        /// Group containing the key
        group: String,
        /// The key
        key: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl KeyFileError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        KeyFileError::Parse {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_value(group: &str, key: &str, reason: impl Into<String>) -> Self {
        KeyFileError::InvalidValue {
            group: group.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this is a missing group or key rather than a bad value.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            KeyFileError::GroupNotFound(_) | KeyFileError::KeyNotFound { .. }
        )
    }
}
