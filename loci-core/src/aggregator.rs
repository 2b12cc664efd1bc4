//! Mention aggregation — per-chapter counts, corpus totals, and the event log.
//!
//! One `Aggregator` accumulates one analysis run. Counts only ever grow;
//! re-running an analysis means building a fresh aggregator.

use indexmap::IndexMap;

use crate::types::{ChapterId, EntityTotal, FrequencyRow, MentionEvent};

/// Accumulated counts and mention events for one run.
///
/// Invariant: for every entity `e`, `total_for(e)` equals the sum of
/// `count_for(c, e)` over all chapters `c`.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    /// chapter → entity → count, both in first-seen order.
    counts: IndexMap<ChapterId, IndexMap<String, usize>>,
    /// entity → running corpus total.
    totals: IndexMap<String, usize>,
    /// entity → events, in the order they were added.
    events: IndexMap<String, Vec<MentionEvent>>,
    mentions: usize,
}

impl Aggregator {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one chapter's mention events.
    ///
    /// The chapter is marked as seen even when `events` is empty.
    pub fn add_mentions(&mut self, chapter: ChapterId, events: Vec<MentionEvent>) {
        let row = self.counts.entry(chapter).or_default();
        for event in events {
            debug_assert_eq!(event.chapter, chapter, "event filed under the wrong chapter");
            *row.entry(event.entity.clone()).or_default() += 1;
            *self.totals.entry(event.entity.clone()).or_default() += 1;
            self.events
                .entry(event.entity.clone())
                .or_default()
                .push(event);
            self.mentions += 1;
        }
    }

    /// Mentions of `entity` in `chapter`; 0 when never seen.
    #[must_use]
    pub fn count_for(&self, chapter: impl Into<ChapterId>, entity: &str) -> usize {
        self.counts
            .get(&chapter.into())
            .and_then(|row| row.get(entity))
            .copied()
            .unwrap_or(0)
    }

    /// Mentions of `entity` across every chapter added so far.
    #[must_use]
    pub fn total_for(&self, entity: &str) -> usize {
        self.totals.get(entity).copied().unwrap_or(0)
    }

    /// Events for `entity`, in the order they were added.
    #[must_use]
    pub fn events_for(&self, entity: &str) -> &[MentionEvent] {
        self.events.get(entity).map_or(&[][..], Vec::as_slice)
    }

    /// Chapters added so far, in the order they were first added.
    pub fn chapters(&self) -> impl Iterator<Item = ChapterId> + '_ {
        self.counts.keys().copied()
    }

    /// Total number of mention events recorded.
    #[must_use]
    pub fn mention_count(&self) -> usize {
        self.mentions
    }

    /// Every non-zero `(chapter, entity, count)` cell, chapter-major.
    #[must_use]
    pub fn frequency_table(&self) -> Vec<FrequencyRow> {
        self.counts
            .iter()
            .flat_map(|(&chapter, row)| {
                row.iter().map(move |(entity, &count)| FrequencyRow {
                    chapter,
                    entity: entity.clone(),
                    count,
                })
            })
            .collect()
    }

    /// Entity totals sorted by count, highest first.
    ///
    /// Ties keep the order in which the entities were first seen.
    #[must_use]
    pub fn ranked_totals(&self) -> Vec<EntityTotal> {
        let mut ranked: Vec<EntityTotal> = self
            .totals
            .iter()
            .map(|(entity, &total)| EntityTotal {
                entity: entity.clone(),
                total,
            })
            .collect();
        ranked.sort_by(|a, b| b.total.cmp(&a.total));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(chapter: u32, entity: &str, form: &str) -> MentionEvent {
        MentionEvent {
            chapter: ChapterId(chapter),
            entity: entity.to_string(),
            surface_form: form.to_string(),
            context: form.to_string(),
            start: 0,
            end: form.len(),
        }
    }

    #[test]
    fn unknown_cells_default_to_zero() {
        let agg = Aggregator::new();
        assert_eq!(agg.count_for(ChapterId(1), "A"), 0);
        assert_eq!(agg.total_for("A"), 0);
        assert!(agg.events_for("A").is_empty());
    }

    #[test]
    fn counts_and_totals_accumulate() {
        let mut agg = Aggregator::new();
        agg.add_mentions(ChapterId(1), vec![event(1, "A", "a1"), event(1, "A", "A")]);
        agg.add_mentions(ChapterId(2), vec![event(2, "A", "a1"), event(2, "B", "B")]);

        assert_eq!(agg.count_for(ChapterId(1), "A"), 2);
        assert_eq!(agg.count_for(ChapterId(2), "A"), 1);
        assert_eq!(agg.count_for(ChapterId(2), "B"), 1);
        assert_eq!(agg.total_for("A"), 3);
        assert_eq!(agg.total_for("B"), 1);
        assert_eq!(agg.mention_count(), 4);
    }

    #[test]
    fn event_log_preserves_insertion_order() {
        let mut agg = Aggregator::new();
        agg.add_mentions(ChapterId(5), vec![event(5, "A", "A"), event(5, "A", "a1")]);
        agg.add_mentions(ChapterId(2), vec![event(2, "A", "A")]);
        let log: Vec<_> = agg
            .events_for("A")
            .iter()
            .map(|e| (e.chapter.0, e.surface_form.as_str()))
            .collect();
        assert_eq!(log, [(5, "A"), (5, "a1"), (2, "A")]);
    }

    #[test]
    fn empty_batch_marks_chapter_seen() {
        let mut agg = Aggregator::new();
        agg.add_mentions(ChapterId(3), Vec::new());
        assert_eq!(agg.chapters().collect::<Vec<_>>(), [ChapterId(3)]);
        assert!(agg.frequency_table().is_empty());
    }

    #[test]
    fn frequency_table_is_chapter_major() {
        let mut agg = Aggregator::new();
        agg.add_mentions(ChapterId(10), vec![event(10, "B", "B"), event(10, "A", "A")]);
        agg.add_mentions(ChapterId(11), vec![event(11, "A", "A"), event(11, "A", "A")]);
        let rows = agg.frequency_table();
        let cells: Vec<_> = rows.iter().map(|r| (r.chapter.0, r.entity.as_str(), r.count)).collect();
        assert_eq!(cells, [(10, "B", 1), (10, "A", 1), (11, "A", 2)]);
    }

    #[test]
    fn ranked_totals_sort_descending_with_stable_ties() {
        let mut agg = Aggregator::new();
        agg.add_mentions(
            ChapterId(1),
            vec![event(1, "C", "C"), event(1, "A", "A"), event(1, "B", "B"), event(1, "B", "B")],
        );
        let ranked: Vec<_> = agg
            .ranked_totals()
            .into_iter()
            .map(|t| (t.entity, t.total))
            .collect();
        assert_eq!(
            ranked,
            [("B".to_string(), 2), ("C".to_string(), 1), ("A".to_string(), 1)]
        );
    }
}
