//! Cross-dataset place matching.
//!
//! The same beach or village shows up under different names in the OSM
//! GeoJSON layers, the curated catalog and the image-override map. This crate
//! normalizes those names, groups known variants in an [`AliasTable`], and
//! resolves the best catalog entry for a map feature.

pub mod alias;
pub mod catalog;
pub mod normalize;
pub mod resolver;
pub mod search;

pub use alias::AliasTable;
pub use catalog::{
    apply_image_overrides, parse_geojson_places, parse_places_catalog, ImageOverride,
    ImageOverrides,
};
pub use normalize::normalize_label;
pub use resolver::{find_best_place_match, MatchContext, PlaceQuery};
pub use search::{haversine_m, ProximityNarrator, SearchIndex};
