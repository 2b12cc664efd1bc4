//! # loci-corpus — Chapter Files In, Report Out
//!
//! Glue around `loci-core`: reads chapter files from disk, runs the analysis,
//! joins the totals against a coordinate table, and exports the result.
//!
//! ## Modules
//!
//! - `loader` — file-backed [`ChapterSource`](loci_core::ChapterSource)s
//! - `gazetteer` — entity coordinates and map-marker sizing
//! - `report` — JSON / text export of counts, totals, and snippets
//! - `telemetry` — tracing subscriber for the `loci` binary

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]

pub mod gazetteer;
pub mod loader;
pub mod report;
pub mod telemetry;

use tracing::info;

use loci_core::error::Result;
use loci_core::{CorpusProcessor, EntityRegistry, LociConfig};

pub use gazetteer::{Gazetteer, MapMarker};
pub use loader::FileChapter;
pub use report::AnalysisReport;

/// Run the full analysis described by `config`.
///
/// Unreadable chapters are reported inside the returned report, not as an
/// error.
///
/// # Errors
/// Returns a configuration error (duplicate entity, empty surface form, bad
/// file pattern or chapter range) before any chapter is read.
pub fn analyze(config: &LociConfig) -> Result<AnalysisReport> {
    let registry = EntityRegistry::from_config(&config.entities)?;
    let chapters = loader::from_config(&config.corpus)?;
    info!(
        entities = registry.len(),
        chapters = chapters.len(),
        directory = %config.corpus.directory,
        "Starting analysis"
    );

    let run = CorpusProcessor::from_config(config).run(&registry, &chapters);
    let gazetteer = Gazetteer::from_config(&config.entities);
    Ok(AnalysisReport::build(
        &registry,
        &run,
        &gazetteer,
        config.map.marker_scale,
    ))
}
