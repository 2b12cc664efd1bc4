//! Core type definitions for the LOCI analysis engine.
//!
//! All value types are serializable so that presentation layers can export
//! them without re-shaping.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChapterReadError;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Numeric identifier of a chapter, supplied by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChapterId(pub u32);

impl From<u32> for ChapterId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Mention Events
// ---------------------------------------------------------------------------

/// One located occurrence of a surface form.
///
/// `entity` is always the canonical name, even when an alias matched;
/// `surface_form` keeps the literal text that was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEvent {
    /// Chapter the mention was found in.
    pub chapter: ChapterId,
    /// Canonical entity name.
    pub entity: String,
    /// Literal surface form that matched.
    pub surface_form: String,
    /// Trimmed text surrounding the mention.
    pub context: String,
    /// Byte offset of the match start within the chapter text.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

// ---------------------------------------------------------------------------
// Chapters
// ---------------------------------------------------------------------------

/// Anything that can produce the text of one chapter.
///
/// `load` is the only fallible step the processor wraps in per-chapter
/// failure isolation; an error here skips the chapter and is recorded.
pub trait ChapterSource {
    /// Identifier of the chapter this source yields.
    fn chapter_id(&self) -> ChapterId;

    /// Materialise the chapter text.
    ///
    /// # Errors
    /// Returns a [`ChapterReadError`] if the text cannot be obtained or decoded.
    fn load(&self) -> Result<Cow<'_, str>, ChapterReadError>;
}

/// An in-memory chapter: `(id, text)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter identifier.
    pub id: ChapterId,
    /// Full chapter text.
    pub text: String,
}

impl Chapter {
    /// Create a chapter from an id and its text.
    #[must_use]
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id: ChapterId(id),
            text: text.into(),
        }
    }
}

impl ChapterSource for Chapter {
    fn chapter_id(&self) -> ChapterId {
        self.id
    }

    fn load(&self) -> Result<Cow<'_, str>, ChapterReadError> {
        Ok(Cow::Borrowed(&self.text))
    }
}

impl<T: ChapterSource + ?Sized> ChapterSource for &T {
    fn chapter_id(&self) -> ChapterId {
        (**self).chapter_id()
    }

    fn load(&self) -> Result<Cow<'_, str>, ChapterReadError> {
        (**self).load()
    }
}

// ---------------------------------------------------------------------------
// Tabular outputs
// ---------------------------------------------------------------------------

/// One non-zero cell of the chapter × entity frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// Chapter id (table row).
    pub chapter: ChapterId,
    /// Canonical entity (table column).
    pub entity: String,
    /// Number of mentions.
    pub count: usize,
}

/// Corpus-wide total for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTotal {
    /// Canonical entity name.
    pub entity: String,
    /// Total mentions across all successfully scanned chapters.
    pub total: usize,
}
