//! Error types for build-specification operations.

use std::path::PathBuf;

use cefbuild_platform::{OsFamily, WordSize};

/// Errors that can occur while emitting constants or building a link plan.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// No link table entry for the resolved platform/word-size pair.
    ///
    /// The builder is closed-world: it never falls back to a default table
    /// or hands out a partial plan.
    #[error("unsupported platform: {os_family:?}/{word_size:?} has no link table entry")]
    UnsupportedPlatform {
        /// The resolved OS family.
        os_family: OsFamily,
        /// The resolved word size.
        word_size: WordSize,
    },

    /// The constants destination could not be written.
    #[error("cannot write constants file {}: {source}", path.display())]
    Write {
        /// The destination that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build-specification operations.
pub type Result<T> = std::result::Result<T, SpecError>;
