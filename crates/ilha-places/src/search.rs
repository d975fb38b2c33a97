//! Typeahead index over the GeoJSON layers and proximity narration for
//! protected areas.

use std::collections::HashSet;

use ilha_core::{Lang, Place, SearchItem, SearchItemKind};
use serde_json::Value;

use crate::catalog::parse_geojson_places;
use crate::normalize::normalize_label;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in metres between two `[lng, lat]` points.
#[must_use]
pub fn haversine_m(a: [f64; 2], b: [f64; 2]) -> f64 {
    let (lat1, lat2) = (a[1].to_radians(), b[1].to_radians());
    let d_lat = lat2 - lat1;
    let d_lng = (b[0] - a[0]).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

#[derive(Debug, Clone)]
struct Entry {
    item: SearchItem,
    key: String,
}

/// Flattened, de-duplicated list of named map features.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<Entry>,
}

impl SearchIndex {
    /// Builds the index from the three layers, in beach, settlement,
    /// protected order. Places without coordinates or a name are skipped, and
    /// a second place with the same kind and normalized name is dropped.
    #[must_use]
    pub fn build(beaches: &[Place], settlements: &[Place], protected: &[Place], lang: Lang) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        let layers = [
            (SearchItemKind::Beach, beaches),
            (SearchItemKind::Settlement, settlements),
            (SearchItemKind::Protected, protected),
        ];
        for (kind, places) in layers {
            for place in places {
                let Some(coordinates) = place.coordinates else {
                    continue;
                };
                let name = place.name.get(lang).trim();
                let key = normalize_label(name);
                if key.is_empty() || !seen.insert(format!("{kind}:{key}")) {
                    continue;
                }
                entries.push(Entry {
                    item: SearchItem {
                        name: name.to_owned(),
                        kind,
                        coordinates,
                        category: place.category.clone(),
                        description: place
                            .description
                            .as_ref()
                            .map(|d| d.get(lang).to_owned())
                            .filter(|d| !d.is_empty()),
                    },
                    key,
                });
            }
        }

        tracing::debug!(items = entries.len(), "built search index");
        Self { entries }
    }

    /// Parses the raw GeoJSON layers and builds the index.
    #[must_use]
    pub fn from_geojson(beaches: &Value, settlements: &Value, protected: &Value, lang: Lang) -> Self {
        Self::build(
            &parse_geojson_places(beaches, SearchItemKind::Beach),
            &parse_geojson_places(settlements, SearchItemKind::Settlement),
            &parse_geojson_places(protected, SearchItemKind::Protected),
            lang,
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &SearchItem> {
        self.entries.iter().map(|e| &e.item)
    }

    /// Items whose normalized name contains the normalized query. Names
    /// starting with the query come first, then names with a word starting
    /// with it, then inner matches; index order breaks ties.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<&SearchItem> {
        let query = normalize_label(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<(u8, &SearchItem)> = self
            .entries
            .iter()
            .filter_map(|e| {
                let rank = if e.key.starts_with(&query) {
                    0
                } else if e.key.split(' ').any(|w| w.starts_with(&query)) {
                    1
                } else if e.key.contains(&query) {
                    2
                } else {
                    return None;
                };
                Some((rank, &e.item))
            })
            .collect();

        hits.sort_by_key(|(rank, _)| *rank);
        hits.into_iter().take(limit).map(|(_, item)| item).collect()
    }

    /// Protected areas within `radius_m` of `position`, nearest first.
    #[must_use]
    pub fn protected_within(&self, position: [f64; 2], radius_m: f64) -> Vec<(&SearchItem, f64)> {
        let mut near: Vec<(&SearchItem, f64)> = self
            .items()
            .filter(|item| item.kind == SearchItemKind::Protected)
            .map(|item| (item, haversine_m(position, item.coordinates)))
            .filter(|(_, d)| *d <= radius_m)
            .collect();
        near.sort_by(|a, b| a.1.total_cmp(&b.1));
        near
    }

    /// Nearest protected area within `radius_m`, with its distance in metres.
    #[must_use]
    pub fn nearest_protected(&self, position: [f64; 2], radius_m: f64) -> Option<(&SearchItem, f64)> {
        self.protected_within(position, radius_m).into_iter().next()
    }
}

/// Fires once per protected area as a visitor's position moves.
#[derive(Debug, Clone)]
pub struct ProximityNarrator {
    radius_m: f64,
    narrated: HashSet<String>,
}

impl ProximityNarrator {
    #[must_use]
    pub fn new(radius_m: f64) -> Self {
        Self {
            radius_m,
            narrated: HashSet::new(),
        }
    }

    /// Nearest protected area in range that has not been narrated yet. The
    /// returned area is remembered and will not be returned again until
    /// [`Self::reset`].
    pub fn check<'i>(&mut self, index: &'i SearchIndex, position: [f64; 2]) -> Option<&'i SearchItem> {
        let (item, distance) = index
            .protected_within(position, self.radius_m)
            .into_iter()
            .find(|(item, _)| !self.narrated.contains(&normalize_label(&item.name)))?;
        self.narrated.insert(normalize_label(&item.name));
        tracing::debug!(area = %item.name, distance_m = distance, "narrating protected area");
        Some(item)
    }

    #[must_use]
    pub fn has_narrated(&self, name: &str) -> bool {
        self.narrated.contains(&normalize_label(name))
    }

    pub fn reset(&mut self) {
        self.narrated.clear();
    }
}
