//! Best-match lookup of a catalog entry for a map feature.

use std::collections::BTreeSet;

use ilha_core::Place;

use crate::alias::AliasTable;

/// Identifiers known for the feature being resolved. Blank strings count as
/// absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceQuery<'a> {
    pub id: Option<&'a str>,
    pub osm_id: Option<&'a str>,
    pub name: Option<&'a str>,
}

impl<'a> PlaceQuery<'a> {
    #[must_use]
    pub fn by_id(id: &'a str) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_name(name: &'a str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    fn id(&self) -> Option<&'a str> {
        self.id.map(str::trim).filter(|s| !s.is_empty())
    }

    fn osm_id(&self) -> Option<&'a str> {
        self.osm_id.map(str::trim).filter(|s| !s.is_empty())
    }

    fn name(&self) -> Option<&'a str> {
        self.name.filter(|s| !s.trim().is_empty())
    }
}

/// Lookup state shared by every resolution.
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub aliases: AliasTable,
}

impl MatchContext {
    #[must_use]
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }
}

impl Default for MatchContext {
    fn default() -> Self {
        Self::new(AliasTable::builtin())
    }
}

/// Resolves the catalog entry that best describes `query`.
///
/// Catalogs are searched as one pool in the order given. Stages run in
/// precedence order: exact id, exact OSM id, alias-expanded exact name, then
/// name containment in either direction. A stage that finds nothing falls
/// through to the next. Within a stage the first candidate carrying an image
/// wins, else the first candidate.
#[must_use]
pub fn find_best_place_match<'p>(
    query: &PlaceQuery<'_>,
    catalogs: &[&'p [Place]],
    ctx: &MatchContext,
) -> Option<&'p Place> {
    let pool = || catalogs.iter().flat_map(|&c| c.iter());

    if let Some(id) = query.id() {
        if let Some(found) = best(pool().filter(|p| p.id == id)) {
            return Some(found);
        }
    }

    if let Some(osm_id) = query.osm_id() {
        if let Some(found) = best(pool().filter(|p| p.osm_id.as_deref() == Some(osm_id))) {
            return Some(found);
        }
    }

    let name = query.name()?;
    let wanted = ctx.aliases.expand(name);
    if wanted.is_empty() {
        return None;
    }

    let candidates: Vec<(&'p Place, BTreeSet<String>)> = pool()
        .map(|p| (p, candidate_variants(p, &ctx.aliases)))
        .filter(|(_, variants)| !variants.is_empty())
        .collect();

    let exact = candidates
        .iter()
        .filter(|(_, variants)| !variants.is_disjoint(&wanted))
        .map(|(p, _)| *p);
    if let Some(found) = best(exact) {
        return Some(found);
    }

    let partial = candidates
        .iter()
        .filter(|(_, variants)| {
            wanted.iter().any(|q| {
                variants
                    .iter()
                    .any(|v| v.contains(q.as_str()) || q.contains(v.as_str()))
            })
        })
        .map(|(p, _)| *p);
    let found = best(partial);
    if found.is_none() {
        tracing::debug!(name, "no catalog match");
    }
    found
}

/// Normalized, alias-expanded labels for every name and the location.
fn candidate_variants(place: &Place, aliases: &AliasTable) -> BTreeSet<String> {
    place
        .name
        .variants()
        .into_iter()
        .chain(place.location.as_deref())
        .flat_map(|label| aliases.expand(label))
        .collect()
}

fn best<'p>(mut candidates: impl Iterator<Item = &'p Place>) -> Option<&'p Place> {
    let first = candidates.next()?;
    if first.has_image() {
        return Some(first);
    }
    Some(candidates.find(|p| p.has_image()).unwrap_or(first))
}
