//! Run metrics — counters and per-chapter timings for one corpus run.
//!
//! Counters are `AtomicU64` so parallel scan workers can bump them without
//! locking. Per-chapter timings go into a `parking_lot::Mutex`-guarded list,
//! read once when the run finishes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::types::ChapterId;

/// Live counters for a run in progress.
#[derive(Debug, Default)]
pub struct ScanMetrics {
    /// Chapters whose mentions were added to the aggregator.
    pub chapters_scanned: AtomicU64,
    /// Chapters skipped because of a read or scan failure.
    pub chapters_failed: AtomicU64,
    /// Mention events produced by successful scans.
    pub mentions_recorded: AtomicU64,
    timings: Mutex<Vec<ChapterTiming>>,
}

/// Wall-clock time spent loading and scanning one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterTiming {
    /// The chapter.
    pub chapter: ChapterId,
    /// Microseconds from load start to scan end.
    pub elapsed_us: u64,
}

impl ScanMetrics {
    /// Create zeroed metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful chapter.
    pub fn record_scanned(&self, mentions: usize) {
        self.chapters_scanned.fetch_add(1, Ordering::Relaxed);
        self.mentions_recorded
            .fetch_add(mentions as u64, Ordering::Relaxed);
    }

    /// Record a skipped chapter.
    pub fn record_failed(&self) {
        self.chapters_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how long one chapter took.
    pub fn record_timing(&self, chapter: ChapterId, elapsed: Duration) {
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.timings.lock().push(ChapterTiming {
            chapter,
            elapsed_us,
        });
    }

    /// Freeze the counters into a [`RunStats`].
    ///
    /// Timings are sorted by chapter id so parallel runs report the same
    /// order as sequential ones.
    #[must_use]
    pub fn snapshot(&self, elapsed: Duration) -> RunStats {
        let mut timings = self.timings.lock().clone();
        timings.sort_by_key(|t| t.chapter);
        RunStats {
            chapters_scanned: self.chapters_scanned.load(Ordering::Relaxed),
            chapters_failed: self.chapters_failed.load(Ordering::Relaxed),
            mentions_recorded: self.mentions_recorded.load(Ordering::Relaxed),
            elapsed_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            timings,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Chapters that contributed to the counts.
    pub chapters_scanned: u64,
    /// Chapters that were skipped.
    pub chapters_failed: u64,
    /// Mention events recorded.
    pub mentions_recorded: u64,
    /// Microseconds for the whole run.
    pub elapsed_us: u64,
    /// Per-chapter timings, by chapter id.
    pub timings: Vec<ChapterTiming>,
}

impl RunStats {
    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "scanned={} failed={} mentions={} elapsed={:.2}ms",
            self.chapters_scanned,
            self.chapters_failed,
            self.mentions_recorded,
            self.elapsed_us as f64 / 1000.0,
        )
    }
}

// ---------------------------------------------------------------------------
// Tracing Span Names
// ---------------------------------------------------------------------------

/// Span names used with `tracing::info_span!`.
pub mod spans {
    /// A whole corpus run.
    pub const CORPUS_RUN: &str = "loci::corpus::run";
    /// Loading and scanning one chapter.
    pub const CHAPTER_SCAN: &str = "loci::chapter::scan";
}
