//! Coercion of the place datasets into [`Place`]s.
//!
//! Three independent sources describe overlapping places: the curated JSON
//! catalog, OSM GeoJSON layers (beaches, settlements, protected areas) and a
//! key/value image-override map. Every field is optional upstream.

use std::collections::HashMap;

use ilha_core::coerce;
use ilha_core::{LocalizedText, Place, SearchItemKind};
use serde::Serialize;
use serde_json::Value;

use crate::alias::AliasTable;
use crate::normalize::normalize_label;

/// Coerces the curated catalog. Accepts a bare array or an object wrapping
/// it under `places` or `data`. Entries with neither an id nor a name are
/// dropped.
#[must_use]
pub fn parse_places_catalog(raw: &Value) -> Vec<Place> {
    let entries: &[Value] = match raw {
        Value::Array(items) => items,
        Value::Object(_) => coerce::array(coerce::first_field(raw, &["places", "data"])),
        _ => &[],
    };

    entries
        .iter()
        .filter(|e| e.is_object())
        .filter_map(|entry| {
            let id = entry.get("id").and_then(coerce::text).unwrap_or_default();
            let name = entry.get("name").map(localized_text).unwrap_or_default();
            if id.is_empty() && name.is_empty() {
                return None;
            }

            Some(Place {
                id,
                name,
                description: entry
                    .get("description")
                    .map(localized_text)
                    .filter(|d| !d.is_empty()),
                image_url: coerce::first_field(entry, &["image_url", "imageUrl", "image"])
                    .and_then(coerce::text),
                coordinates: entry.get("coordinates").and_then(coordinates),
                tags: entry.get("tags").map(tags).unwrap_or_default(),
                category: entry.get("category").and_then(coerce::text),
                osm_id: coerce::first_field(entry, &["osm_id", "osmId"]).and_then(coerce::text),
                location: entry.get("location").and_then(coerce::text),
            })
        })
        .collect()
}

/// Coerces one GeoJSON `FeatureCollection` layer. The layer kind becomes the
/// place category; ids are `"<layer>:<osm id>"`, or `"<layer>:<normalized
/// name>"` when the feature carries no id. Unnamed features are dropped.
#[must_use]
pub fn parse_geojson_places(raw: &Value, layer: SearchItemKind) -> Vec<Place> {
    coerce::array(raw.get("features"))
        .iter()
        .filter_map(|feature| {
            let empty = Value::Null;
            let props = feature.get("properties").unwrap_or(&empty);

            let pt = coerce::first_field(props, &["name:pt", "name", "afia_name"])
                .and_then(coerce::text);
            let en = coerce::first_field(props, &["name:en"]).and_then(coerce::text);
            if pt.is_none() && en.is_none() {
                return None;
            }
            let name = LocalizedText::Localized { pt, en };

            let osm_id = coerce::first_field(props, &["@id", "osm_id"])
                .or_else(|| feature.get("id"))
                .and_then(coerce::text);
            let id = match &osm_id {
                Some(osm) => format!("{layer}:{osm}"),
                None => format!("{layer}:{}", normalize_label(name.get(ilha_core::Lang::Pt))),
            };

            Some(Place {
                id,
                name,
                description: props
                    .get("description")
                    .and_then(coerce::text)
                    .map(LocalizedText::Plain),
                image_url: coerce::first_field(props, &["image", "image_url"])
                    .and_then(coerce::text),
                coordinates: feature.get("geometry").and_then(geometry_point),
                tags: props.get("tags").map(tags).unwrap_or_default(),
                category: Some(layer.as_str().to_owned()),
                osm_id,
                location: coerce::first_field(props, &["addr:place", "is_in"])
                    .and_then(coerce::text),
            })
        })
        .collect()
}

/// A plain string, or an object with `pt`/`en` keys.
fn localized_text(value: &Value) -> LocalizedText {
    match value {
        Value::Object(_) => LocalizedText::Localized {
            pt: value.get("pt").and_then(coerce::text),
            en: value.get("en").and_then(coerce::text),
        },
        other => LocalizedText::Plain(coerce::text(other).unwrap_or_default()),
    }
}

/// `[lng, lat]` from a two-number array or a `{ lat, lng|lon }` object.
/// Out-of-range pairs are rejected.
fn coordinates(value: &Value) -> Option<[f64; 2]> {
    let (lng, lat) = match value {
        Value::Array(pair) if pair.len() >= 2 => {
            (coerce::number(&pair[0])?, coerce::number(&pair[1])?)
        }
        Value::Object(_) => (
            coerce::first_field(value, &["lng", "lon"]).and_then(coerce::number)?,
            value.get("lat").and_then(coerce::number)?,
        ),
        _ => return None,
    };
    ((-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat)).then_some([lng, lat])
}

/// Point coordinates, or the first Point inside a `GeometryCollection`.
fn geometry_point(geometry: &Value) -> Option<[f64; 2]> {
    match geometry.get("type").and_then(Value::as_str)? {
        "Point" => geometry.get("coordinates").and_then(coordinates),
        "GeometryCollection" => coerce::array(geometry.get("geometries"))
            .iter()
            .find(|g| g.get("type").and_then(Value::as_str) == Some("Point"))
            .and_then(|g| g.get("coordinates"))
            .and_then(coordinates),
        _ => None,
    }
}

/// Tag list from an array or a comma/semicolon separated string.
fn tags(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(coerce::text).collect(),
        Value::String(s) => s
            .split([',', ';'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageOverride {
    pub image_url: Option<String>,
    pub title: Option<String>,
}

/// Map-pin image overrides keyed by normalized place name.
#[derive(Debug, Clone, Default)]
pub struct ImageOverrides {
    entries: HashMap<String, ImageOverride>,
}

impl ImageOverrides {
    /// Coerces `{ key: url | { image_url?, title? } }`. Keys are normalized;
    /// entries carrying neither a URL nor a title are dropped.
    #[must_use]
    pub fn from_value(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            return Self::default();
        };

        let entries = map
            .iter()
            .filter_map(|(key, value)| {
                let key = normalize_label(key);
                if key.is_empty() {
                    return None;
                }
                let entry = match value {
                    Value::String(_) => ImageOverride {
                        image_url: coerce::text(value),
                        title: None,
                    },
                    Value::Object(_) => ImageOverride {
                        image_url: coerce::first_field(value, &["image_url", "imageUrl", "url"])
                            .and_then(coerce::text),
                        title: value.get("title").and_then(coerce::text),
                    },
                    _ => return None,
                };
                (entry.image_url.is_some() || entry.title.is_some()).then_some((key, entry))
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Override for `name`: the exact normalized key first, then its aliases
    /// in sorted order.
    #[must_use]
    pub fn lookup(&self, name: &str, aliases: &AliasTable) -> Option<&ImageOverride> {
        let key = normalize_label(name);
        if key.is_empty() {
            return None;
        }
        if let Some(found) = self.entries.get(&key) {
            return Some(found);
        }
        aliases
            .expand_normalized(&key)
            .iter()
            .find_map(|alias| self.entries.get(alias))
    }
}

/// Fills `image_url` on places that lack one from the override map. Places
/// that already carry an image are left alone. Returns how many were filled.
pub fn apply_image_overrides(
    places: &mut [Place],
    overrides: &ImageOverrides,
    aliases: &AliasTable,
) -> usize {
    let mut filled = 0;
    for place in places.iter_mut().filter(|p| !p.has_image()) {
        let url = place
            .name
            .variants()
            .into_iter()
            .filter_map(|name| overrides.lookup(name, aliases))
            .find_map(|o| o.image_url.clone());
        if let Some(url) = url {
            place.image_url = Some(url);
            filled += 1;
        }
    }
    tracing::debug!(filled, "applied map-pin image overrides");
    filled
}
