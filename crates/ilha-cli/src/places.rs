//! `match`, `search` and `nearby` commands.

use clap::Args;
use ilha_core::{Lang, Place, SearchItemKind};
use ilha_places::{
    apply_image_overrides, find_best_place_match, parse_geojson_places, parse_places_catalog,
    ImageOverrides, MatchContext, PlaceQuery, ProximityNarrator, SearchIndex,
};
use serde_json::json;

use crate::{print_json, Context};

#[derive(Debug, Clone, Args)]
pub(crate) struct PlacesArgs {
    /// Display language (defaults to ILHA_LANG)
    #[arg(long)]
    pub lang: Option<Lang>,
}

/// The three OSM layers in index order.
pub(crate) struct Layers {
    pub beaches: Vec<Place>,
    pub settlements: Vec<Place>,
    pub protected: Vec<Place>,
}

async fn load_layer(ctx: &Context, kind: SearchItemKind, path: &str) -> anyhow::Result<Vec<Place>> {
    let raw = ctx.optional(path).await?;
    Ok(parse_geojson_places(&raw, kind))
}

/// Loads the GeoJSON layers. A layer that cannot be fetched is empty.
pub(crate) async fn load_layers(ctx: &Context) -> anyhow::Result<Layers> {
    Ok(Layers {
        beaches: load_layer(ctx, SearchItemKind::Beach, "/geo/beaches.geojson").await?,
        settlements: load_layer(ctx, SearchItemKind::Settlement, "/geo/settlements.geojson").await?,
        protected: load_layer(ctx, SearchItemKind::Protected, "/geo/protected-areas.geojson").await?,
    })
}

/// Curated catalog with map-pin image overrides applied.
pub(crate) async fn load_catalog(ctx: &Context, match_ctx: &MatchContext) -> anyhow::Result<Vec<Place>> {
    let mut catalog = parse_places_catalog(&ctx.required("/api/places").await?);
    let overrides = ImageOverrides::from_value(&ctx.optional("/api/map-images").await?);
    apply_image_overrides(&mut catalog, &overrides, &match_ctx.aliases);
    Ok(catalog)
}

/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the run is cancelled.
pub(crate) async fn run_match(
    ctx: &Context,
    id: Option<&str>,
    osm_id: Option<&str>,
    name: Option<&str>,
) -> anyhow::Result<()> {
    if id.is_none() && osm_id.is_none() && name.is_none() {
        anyhow::bail!("pass at least one of --id, --osm-id or --name");
    }

    let match_ctx = MatchContext::default();
    let catalog = load_catalog(ctx, &match_ctx).await?;
    let layers = load_layers(ctx).await?;

    let query = PlaceQuery { id, osm_id, name };
    let found = find_best_place_match(
        &query,
        &[
            catalog.as_slice(),
            layers.beaches.as_slice(),
            layers.settlements.as_slice(),
            layers.protected.as_slice(),
        ],
        &match_ctx,
    );
    print_json(&json!({ "match": found }))
}

async fn build_index(ctx: &Context, args: &PlacesArgs) -> anyhow::Result<SearchIndex> {
    let layers = load_layers(ctx).await?;
    Ok(SearchIndex::build(
        &layers.beaches,
        &layers.settlements,
        &layers.protected,
        ctx.lang(args.lang),
    ))
}

/// # Errors
///
/// Returns an error if the run is cancelled.
pub(crate) async fn run_search(
    ctx: &Context,
    query: &str,
    limit: usize,
    args: &PlacesArgs,
) -> anyhow::Result<()> {
    let index = build_index(ctx, args).await?;
    print_json(&index.search(query, limit))
}

/// Replays `positions` through a narrator and prints each area it fires for.
///
/// # Errors
///
/// Returns an error if the run is cancelled.
pub(crate) async fn run_nearby(
    ctx: &Context,
    positions: &[[f64; 2]],
    radius_m: f64,
    args: &PlacesArgs,
) -> anyhow::Result<()> {
    let index = build_index(ctx, args).await?;
    let mut narrator = ProximityNarrator::new(radius_m);

    let fired: Vec<_> = positions
        .iter()
        .filter_map(|&position| {
            narrator
                .check(&index, position)
                .map(|area| json!({ "position": position, "area": area }))
        })
        .collect();
    print_json(&fired)
}
