//! Entity coordinates and map-marker sizing.
//!
//! The core never geocodes. This table is owned here and joined against the
//! core's ranked totals to produce circle markers whose radius grows with the
//! mention count.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use loci_core::EntityTotal;
use loci_core::config::EntityConfig;

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

/// One circle marker, ready for a map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Canonical entity name.
    pub entity: String,
    /// Marker position.
    pub position: Coordinates,
    /// Mentions across the corpus.
    pub count: usize,
    /// `count * marker_scale`.
    pub radius: f64,
}

/// Entity → coordinates lookup.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: HashMap<String, Coordinates>,
}

impl Gazetteer {
    /// Empty gazetteer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the coordinates given in the `[[entities]]` section.
    #[must_use]
    pub fn from_config(entities: &[EntityConfig]) -> Self {
        let mut gazetteer = Self::new();
        for entity in entities {
            if let Some([latitude, longitude]) = entity.coordinates {
                gazetteer.insert(&entity.canonical, latitude, longitude);
            }
        }
        gazetteer
    }

    /// Add or replace the coordinates of `entity`.
    pub fn insert(&mut self, entity: &str, latitude: f64, longitude: f64) {
        self.places.insert(
            entity.to_string(),
            Coordinates {
                latitude,
                longitude,
            },
        );
    }

    /// Coordinates of `entity`, if known.
    #[must_use]
    pub fn coordinates(&self, entity: &str) -> Option<Coordinates> {
        self.places.get(entity).copied()
    }

    /// Markers for every entity with a positive total and known coordinates,
    /// in the order of `totals`.
    #[must_use]
    pub fn markers(&self, totals: &[EntityTotal], marker_scale: f64) -> Vec<MapMarker> {
        totals
            .iter()
            .filter(|t| t.total > 0)
            .filter_map(|t| {
                let Some(position) = self.coordinates(&t.entity) else {
                    warn!(entity = %t.entity, "No coordinates; marker skipped");
                    return None;
                };
                Some(MapMarker {
                    entity: t.entity.clone(),
                    position,
                    count: t.total,
                    radius: t.total as f64 * marker_scale,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loci_core::config::LociConfig;

    fn total(entity: &str, total: usize) -> EntityTotal {
        EntityTotal {
            entity: entity.to_string(),
            total,
        }
    }

    #[test]
    fn default_entities_all_have_coordinates() {
        let config = LociConfig::default();
        let gazetteer = Gazetteer::from_config(&config.entities);
        for entity in &config.entities {
            assert!(gazetteer.coordinates(&entity.canonical).is_some(), "{}", entity.canonical);
        }
        let nanjing = gazetteer.coordinates("南京").expect("known");
        assert!((nanjing.latitude - 32.0584).abs() < 1e-9);
        assert!((nanjing.longitude - 118.7965).abs() < 1e-9);
    }

    #[test]
    fn radius_scales_with_count() {
        let mut gazetteer = Gazetteer::new();
        gazetteer.insert("南京", 32.0, 118.0);
        let markers = gazetteer.markers(&[total("南京", 7)], 2.0);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].count, 7);
        assert!((markers[0].radius - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_and_unknown_entities_get_no_marker() {
        let mut gazetteer = Gazetteer::new();
        gazetteer.insert("南京", 32.0, 118.0);
        gazetteer.insert("蘇州", 31.3, 120.6);
        let markers = gazetteer.markers(
            &[total("蘇州", 3), total("長安", 5), total("南京", 0)],
            2.0,
        );
        let entities: Vec<_> = markers.iter().map(|m| m.entity.as_str()).collect();
        assert_eq!(entities, ["蘇州"]);
    }
}
