//! Unified error types for chatarchive.
//!
//! This module provides a single [`ChatarchiveError`] enum that covers every
//! failure the library can report.
//!
//! # Failure Scope
//!
//! Failures are local to the archive that produced them. Three variants
//! describe a whole archive that could not be turned into a conversation:
//!
//! - [`CorruptArchive`](ChatarchiveError::CorruptArchive)
//! - [`NoTranscript`](ChatarchiveError::NoTranscript)
//! - [`UndecodableTranscript`](ChatarchiveError::UndecodableTranscript)
//!
//! Callers processing several archives record these and move on; see
//! [`ChatarchiveError::is_per_archive`]. Unrecognized transcript lines and
//! unresolvable timestamps are not errors at all.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatarchive operations.
///
/// # Example
///
/// ```rust
/// use chatarchive::error::Result;
/// use chatarchive::Conversation;
///
/// fn my_function() -> Result<Vec<Conversation>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatarchiveError>;

/// The error type for all chatarchive operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatarchiveError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The archive or work directory doesn't exist
    /// - Permission denied
    /// - Disk is full (while extracting or writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The archive container could not be opened or extracted.
    #[error("Corrupt archive {}: {source}", path.display())]
    CorruptArchive {
        /// Path of the archive that failed
        path: PathBuf,
        /// The underlying zip error
        #[source]
        source: zip::result::ZipError,
    },

    /// Extraction succeeded but no `.txt` transcript was found.
    #[error("No transcript found in {}", path.display())]
    NoTranscript {
        /// Path of the archive (or directory) that was searched
        path: PathBuf,
    },

    /// The transcript could not be decoded with any supported text encoding.
    #[error("Could not decode transcript {} (tried: {})", path.display(), tried.join(", "))]
    UndecodableTranscript {
        /// Path of the transcript file
        path: PathBuf,
        /// Names of the encodings that were attempted, in order
        tried: Vec<&'static str>,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// An output format could not be determined or is unsupported.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when an in-memory output buffer is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatarchiveError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatarchiveError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatarchiveError {
    /// Creates a corrupt-archive error.
    pub fn corrupt_archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        ChatarchiveError::CorruptArchive {
            path: path.into(),
            source,
        }
    }

    /// Creates a no-transcript error.
    pub fn no_transcript(path: impl Into<PathBuf>) -> Self {
        ChatarchiveError::NoTranscript { path: path.into() }
    }

    /// Creates an undecodable-transcript error.
    pub fn undecodable(path: impl Into<PathBuf>, tried: Vec<&'static str>) -> Self {
        ChatarchiveError::UndecodableTranscript {
            path: path.into(),
            tried,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatarchiveError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatarchiveError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatarchiveError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatarchiveError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatarchiveError::InvalidDate { .. })
    }

    /// Returns `true` if this error means one archive could not be loaded.
    ///
    /// These never abort processing of the remaining archives.
    pub fn is_per_archive(&self) -> bool {
        matches!(
            self,
            ChatarchiveError::CorruptArchive { .. }
                | ChatarchiveError::NoTranscript { .. }
                | ChatarchiveError::UndecodableTranscript { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
