//! `loci` — count place-name mentions across a directory of chapter files.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::warn;

use loci_core::LociConfig;
use loci_corpus::{analyze, telemetry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "loci", version, about = "Place-name mention analysis for chapter-segmented texts")]
struct Args {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, env = "LOCI_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the chapter files (overrides `corpus.directory`).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// First chapter number (overrides `corpus.first_chapter`).
    #[arg(long)]
    first: Option<u32>,

    /// Last chapter number (overrides `corpus.last_chapter`).
    #[arg(long)]
    last: Option<u32>,

    /// Scan chapters in parallel.
    #[arg(long)]
    parallel: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LociConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => LociConfig::default(),
    };
    if let Some(dir) = &args.dir {
        config.corpus.directory = dir.display().to_string();
    }
    if let Some(first) = args.first {
        config.corpus.first_chapter = first;
    }
    if let Some(last) = args.last {
        config.corpus.last_chapter = last;
    }
    config.corpus.parallel |= args.parallel;

    telemetry::init(&config.general.log_level, args.log_json)?;

    let report = analyze(&config).context("analysis aborted")?;
    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "Some chapters were skipped");
    }

    let rendered = match args.format {
        Format::Text => report.to_text(),
        Format::Json => report.to_json().context("serializing report")?,
    };
    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}
