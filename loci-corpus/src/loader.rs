//! File-backed chapter sources.
//!
//! A [`FileChapter`] only remembers its path; the file is read when the
//! processor calls [`ChapterSource::load`], so a missing or undecodable file
//! becomes a per-chapter failure instead of aborting the run.

use std::borrow::Cow;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use loci_core::config::CorpusConfig;
use loci_core::error::{ChapterReadError, LociError, Result};
use loci_core::{ChapterId, ChapterSource};

/// Placeholder in a file pattern that is replaced by the chapter number.
pub const CHAPTER_PLACEHOLDER: &str = "{n}";

const UTF8_BOM: char = '\u{feff}';

/// A chapter stored as a UTF-8 text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChapter {
    id: ChapterId,
    path: PathBuf,
}

impl FileChapter {
    /// A chapter read from `path`.
    #[must_use]
    pub fn new(id: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            id: ChapterId(id),
            path: path.into(),
        }
    }

    /// Where the chapter text lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChapterSource for FileChapter {
    fn chapter_id(&self) -> ChapterId {
        self.id
    }

    fn load(&self) -> std::result::Result<Cow<'_, str>, ChapterReadError> {
        let bytes = std::fs::read(&self.path)?;
        let mut text = String::from_utf8(bytes)?;
        if text.starts_with(UTF8_BOM) {
            text.drain(..UTF8_BOM.len_utf8());
        }
        Ok(Cow::Owned(text))
    }
}

/// Path of chapter `n` under `dir`.
#[must_use]
pub fn chapter_path(dir: &Path, pattern: &str, n: u32) -> PathBuf {
    dir.join(pattern.replace(CHAPTER_PLACEHOLDER, &n.to_string()))
}

/// One [`FileChapter`] per number in `range`, in ascending order.
///
/// Files are not checked for existence here.
///
/// # Errors
/// Returns [`LociError::Config`] if `pattern` has no `{n}` placeholder or the
/// range is empty.
pub fn chapter_range(
    dir: &Path,
    pattern: &str,
    range: RangeInclusive<u32>,
) -> Result<Vec<FileChapter>> {
    if !pattern.contains(CHAPTER_PLACEHOLDER) {
        return Err(LociError::Config(format!(
            "file pattern `{pattern}` has no {CHAPTER_PLACEHOLDER} placeholder"
        )));
    }
    if range.is_empty() {
        return Err(LociError::Config(format!(
            "chapter range {}..={} is empty",
            range.start(),
            range.end()
        )));
    }
    Ok(range
        .map(|n| FileChapter::new(n, chapter_path(dir, pattern, n)))
        .collect())
}

/// Chapters described by the `[corpus]` section.
///
/// # Errors
/// See [`chapter_range`].
pub fn from_config(corpus: &CorpusConfig) -> Result<Vec<FileChapter>> {
    chapter_range(
        Path::new(&corpus.directory),
        &corpus.file_pattern,
        corpus.first_chapter..=corpus.last_chapter,
    )
}
