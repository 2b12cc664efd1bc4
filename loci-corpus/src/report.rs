//! Analysis report — the tables a chart, map, or browsing UI needs.
//!
//! The report is a plain serializable snapshot of a finished run. It can be
//! written as pretty JSON for downstream renderers or as a plain-text summary.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loci_core::metrics::RunStats;
use loci_core::{ChapterId, CorpusRun, EntityRegistry, EntityTotal, FrequencyRow, MentionEvent};

use crate::gazetteer::{Gazetteer, MapMarker};

/// All mentions of one entity, in corpus order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityContexts {
    /// Canonical entity name.
    pub entity: String,
    /// Mention events with their snippets.
    pub mentions: Vec<MentionEvent>,
}

/// A skipped chapter, flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedChapter {
    /// The chapter that was skipped.
    pub chapter: ChapterId,
    /// Why.
    pub reason: String,
}

/// Serializable snapshot of a finished analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the report was built.
    pub generated_at: DateTime<Utc>,
    /// Non-zero `(chapter, entity, count)` cells.
    pub frequency: Vec<FrequencyRow>,
    /// Corpus totals, highest first.
    pub totals: Vec<EntityTotal>,
    /// Every registered entity with its mentions, in registry order.
    pub contexts: Vec<EntityContexts>,
    /// Circle markers for entities with coordinates.
    pub markers: Vec<MapMarker>,
    /// Chapters that contributed nothing.
    pub skipped: Vec<SkippedChapter>,
    /// Run counters.
    pub stats: RunStats,
}

impl AnalysisReport {
    /// Assemble the report for `run`.
    #[must_use]
    pub fn build(
        registry: &EntityRegistry,
        run: &CorpusRun,
        gazetteer: &Gazetteer,
        marker_scale: f64,
    ) -> Self {
        let agg = &run.aggregator;
        let totals = agg.ranked_totals();
        let markers = gazetteer.markers(&totals, marker_scale);
        let contexts = registry
            .canonical_names()
            .map(|entity| EntityContexts {
                entity: entity.to_string(),
                mentions: agg.events_for(entity).to_vec(),
            })
            .collect();
        let skipped = run
            .failures
            .iter()
            .map(|f| SkippedChapter {
                chapter: f.chapter,
                reason: f.reason(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            frequency: agg.frequency_table(),
            totals,
            contexts,
            markers,
            skipped,
            stats: run.stats.clone(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates `serde_json` serialization failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text summary: totals, per-chapter table, snippets, skipped chapters.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Total mentions");
        if self.totals.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for t in &self.totals {
            let _ = writeln!(out, "  {:<8}{:>6}", t.entity, t.total);
        }

        let _ = writeln!(out, "\nPer chapter");
        for row in &self.frequency {
            let _ = writeln!(out, "  ch.{:<5}{:<8}{:>6}", row.chapter, row.entity, row.count);
        }

        let _ = writeln!(out, "\nContexts");
        for entry in self.contexts.iter().filter(|c| !c.mentions.is_empty()) {
            let _ = writeln!(out, "  [{}]", entry.entity);
            for m in &entry.mentions {
                let _ = writeln!(out, "    ch.{} - {}: {}", m.chapter, m.surface_form, m.context);
            }
        }

        if !self.skipped.is_empty() {
            let _ = writeln!(out, "\nSkipped chapters");
            for s in &self.skipped {
                let _ = writeln!(out, "  ch.{}: {}", s.chapter, s.reason);
            }
        }

        let _ = writeln!(out, "\n{}", self.stats.summary());
        out
    }
}
