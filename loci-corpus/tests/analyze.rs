//! Integration Tests — Chapter Files on Disk
//!
//! Writes small chapter files into a temporary directory and runs the whole
//! pipeline through `loci_corpus::analyze`.

use std::fs;

use loci_core::config::{EntityConfig, LociConfig};
use loci_core::error::{ChapterError, ChapterReadError};
use loci_core::{ChapterId, ChapterSource, CorpusProcessor, EntityRegistry};
use loci_corpus::loader::{self, FileChapter};
use loci_corpus::analyze;

fn config_for(dir: &std::path::Path, first: u32, last: u32) -> LociConfig {
    let mut config = LociConfig::default();
    config.corpus.directory = dir.display().to_string();
    config.corpus.first_chapter = first;
    config.corpus.last_chapter = last;
    config
}

#[test]
fn missing_chapter_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("chapter10.txt"), "杜少卿移家南京，遊覽金陵。").expect("write");
    // chapter11.txt deliberately absent
    fs::write(dir.path().join("chapter12.txt"), "又到了揚州，看瘦西湖。").expect("write");

    let report = analyze(&config_for(dir.path(), 10, 12)).expect("analysis runs");

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].chapter, ChapterId(11));
    assert!(report.skipped[0].reason.contains("could not read"));

    let totals: Vec<_> = report.totals.iter().map(|t| (t.entity.as_str(), t.total)).collect();
    // 瘦西湖 also contains 西湖, an alias of 杭州.
    assert_eq!(totals, [("南京", 2), ("揚州", 2), ("杭州", 1)]);
    assert_eq!(report.markers.len(), 3);
    assert_eq!(report.stats.chapters_scanned, 2);
    assert_eq!(report.stats.chapters_failed, 1);
}

#[test]
fn bom_is_stripped_and_bad_utf8_is_a_decode_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bom_path = dir.path().join("bom.txt");
    fs::write(&bom_path, "\u{feff}南京").expect("write");
    let bad_path = dir.path().join("bad.txt");
    fs::write(&bad_path, [0xE5u8, 0x8D, 0xFF]).expect("write");

    let bom_chapter = FileChapter::new(1, &bom_path);
    let text = bom_chapter.load().expect("bom file loads");
    assert_eq!(text, "南京");

    let chapters = [FileChapter::new(1, &bom_path), FileChapter::new(2, &bad_path)];
    let registry =
        EntityRegistry::from_config(&[EntityConfig::new("南京", &[])]).expect("registry");
    let run = CorpusProcessor::default().run(&registry, &chapters);

    assert_eq!(run.aggregator.total_for("南京"), 1);
    // The snippet starts at the mention, not at the stripped BOM.
    assert_eq!(run.aggregator.events_for("南京")[0].start, 0);
    assert_eq!(run.failures.len(), 1);
    assert!(matches!(
        run.failures[0].error,
        ChapterError::Read(ChapterReadError::Decode(_))
    ));
}

#[test]
fn duplicate_entity_aborts_before_reading() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_for(dir.path(), 1, 1);
    config.entities = vec![EntityConfig::new("A", &[]), EntityConfig::new("A", &[])];
    assert!(analyze(&config).is_err());
}

#[test]
fn parallel_analysis_matches_sequential() {
    let dir = tempfile::tempdir().expect("tempdir");
    for n in 1..=8u32 {
        let body = "南京 蘇州 ".repeat(n as usize) + &"姑蘇 ".repeat(8 - n as usize);
        fs::write(loader::chapter_path(dir.path(), "chapter{n}.txt", n), body).expect("write");
    }
    let sequential = analyze(&config_for(dir.path(), 1, 8)).expect("sequential");
    let mut parallel_config = config_for(dir.path(), 1, 8);
    parallel_config.corpus.parallel = true;
    parallel_config.corpus.workers = 3;
    let parallel = analyze(&parallel_config).expect("parallel");

    assert_eq!(sequential.frequency, parallel.frequency);
    assert_eq!(sequential.totals, parallel.totals);
    assert_eq!(sequential.contexts, parallel.contexts);
}

#[test]
fn example_config_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../loci.example.toml");
    let config = LociConfig::from_file(&path).expect("example config is valid");
    assert_eq!(config.entities.len(), 2);
    assert_eq!(config.entities[1].coordinates, Some([31.2989, 120.5853]));
    assert_eq!(config.scan.context_radius, 30);
    EntityRegistry::from_config(&config.entities).expect("example entities are valid");
}
