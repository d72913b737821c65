use std::path::PathBuf;

use thiserror::Error;

use crate::keyfile::KeyFileError;

/// Errors that can occur while locating, loading or watching a portal
/// configuration file.
///
/// None of these are fatal to the service: the caller logs them and keeps
/// whatever state it had before.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No candidate directory contains the file
    #[error("'{filename}' not found in any of {searched:?}")]
    NotFound {
        /// File name that was searched for
        filename: String,
        /// Directories that were searched, in priority order
        searched: Vec<PathBuf>,
    },

    /// The highest-priority file exists but could not be read or parsed
    #[error("failed to load '{path}': {source}")]
    Load {
        /// Path of the file
        path: PathBuf,
        /// Underlying key-file error
        #[source]
        source: KeyFileError,
    },

    /// Failed to initialize the file watcher
    #[error("failed to initialize file watcher: {details}")]
    FileWatcherInitError {
        /// File watcher initialization error details
        details: String,
    },

    /// Error occurred while watching a specific file
    #[error("file watcher error for '{path}': {details}")]
    FileWatchError {
        /// Path being watched when error occurred
        path: PathBuf,
        /// File watcher error details
        details: String,
    },
}
