//! Error types for the LOCI core library.
//!
//! Two families live here: fatal errors ([`LociError`]) that abort a run
//! before any chapter is scanned, and per-chapter errors ([`ChapterError`])
//! that the [`CorpusProcessor`](crate::processor::CorpusProcessor) records
//! and recovers from.

use thiserror::Error;

use crate::types::ChapterId;

/// Top-level error type for fatal LOCI operations.
#[derive(Error, Debug)]
pub enum LociError {
    /// Registry or configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A canonical entity name was registered twice.
    #[error("Configuration error: entity `{0}` is already registered")]
    DuplicateEntity(String),

    /// A canonical name or alias is the empty string.
    #[error("Configuration error: entity `{entity}` has an empty surface form")]
    EmptySurfaceForm {
        /// Canonical name of the offending entity (may itself be empty).
        entity: String,
    },

    /// Generic I/O error (config file loading).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to obtain the text of one chapter.
#[derive(Error, Debug)]
pub enum ChapterReadError {
    /// The underlying source could not be read.
    #[error("could not read chapter source: {0}")]
    Io(#[from] std::io::Error),

    /// The source bytes are not valid UTF-8.
    #[error("chapter text is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// The source reported itself unavailable.
    #[error("chapter source unavailable: {0}")]
    Unavailable(String),
}

/// Failure while scanning the text of one chapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChapterScanError {
    /// The chapter exceeds the configured size limit.
    #[error("chapter is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Size of the chapter text in bytes.
        size: usize,
        /// Configured `max_chapter_bytes`.
        limit: usize,
    },
}

/// Any recoverable per-chapter failure.
#[derive(Error, Debug)]
pub enum ChapterError {
    /// Loading the chapter failed.
    #[error(transparent)]
    Read(#[from] ChapterReadError),

    /// Scanning the chapter failed.
    #[error(transparent)]
    Scan(#[from] ChapterScanError),
}

/// One skipped chapter, surfaced to the caller after a run.
#[derive(Debug)]
pub struct FailureRecord {
    /// The chapter that contributed nothing to the counts.
    pub chapter: ChapterId,
    /// Why it was skipped.
    pub error: ChapterError,
}

impl FailureRecord {
    /// Human-readable reason, suitable for display next to the chapter id.
    #[must_use]
    pub fn reason(&self) -> String {
        self.error.to_string()
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, LociError>;
