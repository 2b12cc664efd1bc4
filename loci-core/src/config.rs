//! Configuration for the LOCI analysis pipeline.
//!
//! Maps directly to `loci.toml`. Every section and field has a default, so an
//! empty file yields the stock seven-city analysis.

use serde::{Deserialize, Serialize};

/// Top-level LOCI configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LociConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Mention scanning settings.
    #[serde(default)]
    pub scan: ScanConfig,
    /// Chapter discovery and processing settings.
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Map-marker export settings.
    #[serde(default)]
    pub map: MapConfig,
    /// Entities to look for, in matching order.
    #[serde(default = "default_entities")]
    pub entities: Vec<EntityConfig>,
}

impl Default for LociConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scan: ScanConfig::default(),
            corpus: CorpusConfig::default(),
            map: MapConfig::default(),
            entities: default_entities(),
        }
    }
}

impl LociConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `LociError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::LociError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Mention scanner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Characters of context kept on each side of a mention.
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,
    /// Chapters larger than this many bytes are rejected. 0 disables the check.
    #[serde(default)]
    pub max_chapter_bytes: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            context_radius: 30,
            max_chapter_bytes: 0,
        }
    }
}

/// Chapter discovery and processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding the chapter files.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// File name pattern; `{n}` is replaced by the chapter number.
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    /// First chapter number (inclusive).
    #[serde(default = "default_first_chapter")]
    pub first_chapter: u32,
    /// Last chapter number (inclusive).
    #[serde(default = "default_last_chapter")]
    pub last_chapter: u32,
    /// Scan chapters on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Worker threads for parallel scanning. 0 uses the rayon default.
    #[serde(default)]
    pub workers: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            file_pattern: "chapter{n}.txt".to_string(),
            first_chapter: 10,
            last_chapter: 20,
            parallel: false,
            workers: 0,
        }
    }
}

/// Map-marker export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Marker radius per mention.
    #[serde(default = "default_marker_scale")]
    pub marker_scale: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { marker_scale: 2.0 }
    }
}

/// One entity: canonical name, aliases, and optional map coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Canonical name; also matched as a surface form.
    pub canonical: String,
    /// Alternate surface forms, matched after the canonical name.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// `[latitude, longitude]`, used only by map export.
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
}

impl EntityConfig {
    /// Convenience constructor without coordinates.
    #[must_use]
    pub fn new(canonical: impl Into<String>, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
            coordinates: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_context_radius() -> usize { 30 }
fn default_directory() -> String { ".".to_string() }
fn default_file_pattern() -> String { "chapter{n}.txt".to_string() }
fn default_first_chapter() -> u32 { 10 }
fn default_last_chapter() -> u32 { 20 }
fn default_marker_scale() -> f64 { 2.0 }

/// The stock entity table: seven cities of the Ming–Qing Jiangnan novels.
fn default_entities() -> Vec<EntityConfig> {
    let city = |canonical: &str, aliases: &[&str], lat: f64, lon: f64| EntityConfig {
        coordinates: Some([lat, lon]),
        ..EntityConfig::new(canonical, aliases)
    };
    vec![
        city("南京", &["金陵", "建康"], 32.0584, 118.7965),
        city("蘇州", &["姑蘇"], 31.2989, 120.5853),
        city("杭州", &["西湖"], 30.2741, 120.1551),
        city("北京", &["京城", "燕京"], 39.9042, 116.4074),
        city("揚州", &["揚子", "瘦西湖"], 32.3947, 119.4142),
        city("濟南", &["泉城"], 36.6512, 117.1201),
        city("湖州", &["吳興"], 30.8940, 120.0868),
    ]
}
