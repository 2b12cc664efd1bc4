//! Mention scanning — locating surface forms in one chapter's text.
//!
//! Matching is literal substring search. For each entity (registry order) and
//! each of its surface forms (canonical first), occurrences are found left to
//! right without overlap: after a match the search resumes at its end, so
//! `"aa"` occurs once in `"aaa"`.
//!
//! Events come out grouped entity → form → position, not sorted by position.
//! Downstream consumers rely on that order, so it must not be changed.

use crate::config::ScanConfig;
use crate::error::ChapterScanError;
use crate::registry::EntityRegistry;
use crate::types::{ChapterId, MentionEvent};

/// Scan `text` with the default configuration.
///
/// The default configuration has no size limit, so this never fails.
#[must_use]
pub fn scan(chapter: ChapterId, text: &str, registry: &EntityRegistry) -> Vec<MentionEvent> {
    collect_mentions(chapter, text, registry, ScanConfig::default().context_radius)
}

/// Stateless scanner carrying the scan settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MentionScanner {
    config: ScanConfig,
}

impl MentionScanner {
    /// Create a scanner with the given settings.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// The settings this scanner was built with.
    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Produce the ordered mention events for one chapter.
    ///
    /// # Errors
    /// Returns [`ChapterScanError::TooLarge`] if `text` exceeds
    /// `max_chapter_bytes` (when that limit is non-zero).
    pub fn scan(
        &self,
        chapter: ChapterId,
        text: &str,
        registry: &EntityRegistry,
    ) -> Result<Vec<MentionEvent>, ChapterScanError> {
        let limit = self.config.max_chapter_bytes;
        if limit > 0 && text.len() > limit {
            return Err(ChapterScanError::TooLarge {
                size: text.len(),
                limit,
            });
        }
        Ok(collect_mentions(chapter, text, registry, self.config.context_radius))
    }
}

fn collect_mentions(
    chapter: ChapterId,
    text: &str,
    registry: &EntityRegistry,
    radius: usize,
) -> Vec<MentionEvent> {
    let mut events = Vec::new();
    for (entity, forms) in registry.iter() {
        for form in forms {
            // `match_indices` is already non-overlapping and leftmost-first.
            for (start, matched) in text.match_indices(form.as_str()) {
                let end = start + matched.len();
                events.push(MentionEvent {
                    chapter,
                    entity: entity.to_string(),
                    surface_form: form.clone(),
                    context: context_snippet(text, start, end, radius).to_string(),
                    start,
                    end,
                });
            }
        }
    }
    events
}

/// Slice `radius` characters either side of `[start, end)`, clamped to the
/// text and trimmed of surrounding whitespace.
///
/// `start` and `end` must lie on char boundaries.
#[must_use]
pub fn context_snippet(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = if radius == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(radius - 1)
            .map_or(0, |(i, _)| i)
    };
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].trim()
}
