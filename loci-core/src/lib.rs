//! # LOCI Core Library
//!
//! Place-name mention detection and aggregation for chapter-segmented texts.
//!
//! A fixed [`EntityRegistry`] maps each canonical place name to its surface
//! forms (the name itself plus aliases). The [`MentionScanner`] finds every
//! literal, non-overlapping occurrence of those forms in a chapter and emits
//! one [`MentionEvent`] per hit, tagged with the canonical name and a short
//! context snippet. The [`Aggregator`] turns the events into per-chapter
//! counts, corpus totals, and a per-entity event log, and the
//! [`CorpusProcessor`] drives a whole run while isolating chapter failures.
//!
//! ```text
//! chapter text ─► MentionScanner ─► MentionEvent* ─► Aggregator ─► counts / snippets
//! ```
//!
//! The crate performs no geocoding, rendering, or file discovery; those are
//! left to consumers of the aggregated output.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod metrics;
pub mod processor;
pub mod registry;
pub mod scanner;
pub mod types;

pub use aggregator::Aggregator;
pub use config::LociConfig;
pub use error::{ChapterError, ChapterReadError, ChapterScanError, FailureRecord, LociError};
pub use processor::{CorpusProcessor, CorpusRun};
pub use registry::EntityRegistry;
pub use scanner::MentionScanner;
pub use types::*;
