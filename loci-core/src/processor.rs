//! Corpus processing — load, scan, and aggregate every chapter of a run.
//!
//! Each chapter is isolated: a read or scan failure skips that chapter,
//! produces a [`FailureRecord`], and the run moves on. A skipped chapter
//! contributes nothing to any count.
//!
//! With parallel scanning enabled, chapters are loaded and scanned on the
//! rayon pool, but their events are still handed to the [`Aggregator`] one
//! chapter at a time in submission order. Counts and the per-entity event
//! log are identical to a sequential run.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::aggregator::Aggregator;
use crate::config::{CorpusConfig, LociConfig, ScanConfig};
use crate::error::{ChapterError, FailureRecord};
use crate::metrics::{spans, RunStats, ScanMetrics};
use crate::registry::EntityRegistry;
use crate::scanner::MentionScanner;
use crate::types::{ChapterId, ChapterSource, MentionEvent};

/// Everything a finished run produces.
#[derive(Debug)]
pub struct CorpusRun {
    /// Counts and mention events of every successfully scanned chapter.
    pub aggregator: Aggregator,
    /// One record per skipped chapter, in submission order.
    pub failures: Vec<FailureRecord>,
    /// Counters and timings.
    pub stats: RunStats,
}

impl CorpusRun {
    /// Split into `(aggregator, failures)`.
    #[must_use]
    pub fn into_parts(self) -> (Aggregator, Vec<FailureRecord>) {
        (self.aggregator, self.failures)
    }
}

/// Orchestrates one analysis run over an ordered list of chapters.
#[derive(Debug, Clone, Default)]
pub struct CorpusProcessor {
    scanner: MentionScanner,
    parallel: bool,
    workers: usize,
}

impl CorpusProcessor {
    /// Sequential processor with the given scan settings.
    #[must_use]
    pub fn new(scan: ScanConfig) -> Self {
        Self {
            scanner: MentionScanner::new(scan),
            parallel: false,
            workers: 0,
        }
    }

    /// Processor configured from `[scan]` and `[corpus]`.
    #[must_use]
    pub fn from_config(config: &LociConfig) -> Self {
        Self::new(config.scan).with_corpus_config(&config.corpus)
    }

    /// Apply the parallelism settings of `[corpus]`.
    #[must_use]
    pub fn with_corpus_config(mut self, corpus: &CorpusConfig) -> Self {
        self.parallel = corpus.parallel;
        self.workers = corpus.workers;
        self
    }

    /// Enable or disable parallel scanning.
    #[must_use]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Run the analysis over `chapters`, in the given order.
    pub fn run<S>(&self, registry: &EntityRegistry, chapters: &[S]) -> CorpusRun
    where
        S: ChapterSource + Sync,
    {
        let started = Instant::now();
        let _span = info_span!(
            spans::CORPUS_RUN,
            chapters = chapters.len(),
            entities = registry.len(),
            parallel = self.parallel
        )
        .entered();

        let metrics = ScanMetrics::new();
        let mut aggregator = Aggregator::new();
        let mut failures = Vec::new();

        if self.parallel {
            let outcomes = self.scan_parallel(registry, chapters, &metrics);
            for (chapter, outcome) in outcomes {
                flush(chapter, outcome, &mut aggregator, &mut failures);
            }
        } else {
            for source in chapters {
                let outcome = self.process_chapter(registry, source, &metrics);
                flush(source.chapter_id(), outcome, &mut aggregator, &mut failures);
            }
        }

        let stats = metrics.snapshot(started.elapsed());
        info!(
            scanned = stats.chapters_scanned,
            failed = stats.chapters_failed,
            mentions = stats.mentions_recorded,
            elapsed_us = stats.elapsed_us,
            "Corpus run finished"
        );

        CorpusRun {
            aggregator,
            failures,
            stats,
        }
    }

    /// Scan on the rayon pool; the returned outcomes are in submission order.
    fn scan_parallel<S>(
        &self,
        registry: &EntityRegistry,
        chapters: &[S],
        metrics: &ScanMetrics,
    ) -> Vec<(ChapterId, Result<Vec<MentionEvent>, ChapterError>)>
    where
        S: ChapterSource + Sync,
    {
        let scan_all = || {
            chapters
                .par_iter()
                .map(|source| {
                    (
                        source.chapter_id(),
                        self.process_chapter(registry, source, metrics),
                    )
                })
                .collect()
        };

        if self.workers == 0 {
            return scan_all();
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(scan_all),
            Err(err) => {
                warn!(workers = self.workers, error = %err, "Falling back to the global rayon pool");
                scan_all()
            }
        }
    }

    /// Load and scan one chapter.
    fn process_chapter<S>(
        &self,
        registry: &EntityRegistry,
        source: &S,
        metrics: &ScanMetrics,
    ) -> Result<Vec<MentionEvent>, ChapterError>
    where
        S: ChapterSource + ?Sized,
    {
        let chapter = source.chapter_id();
        let _span = info_span!(spans::CHAPTER_SCAN, chapter = %chapter).entered();
        let started = Instant::now();

        let outcome = source
            .load()
            .map_err(ChapterError::from)
            .and_then(|text| {
                self.scanner
                    .scan(chapter, &text, registry)
                    .map_err(ChapterError::from)
            });
        metrics.record_timing(chapter, started.elapsed());

        match &outcome {
            Ok(events) => {
                metrics.record_scanned(events.len());
                debug!(mentions = events.len(), "Chapter scanned");
            }
            Err(_) => metrics.record_failed(),
        }
        outcome
    }
}

/// Hand one chapter's outcome to the aggregator or the failure list.
fn flush(
    chapter: ChapterId,
    outcome: Result<Vec<MentionEvent>, ChapterError>,
    aggregator: &mut Aggregator,
    failures: &mut Vec<FailureRecord>,
) {
    match outcome {
        Ok(events) => aggregator.add_mentions(chapter, events),
        Err(error) => {
            warn!(chapter = %chapter, error = %error, "Skipping chapter");
            failures.push(FailureRecord { chapter, error });
        }
    }
}
