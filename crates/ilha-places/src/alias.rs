//! Groups of place names known to refer to the same real-world place.

use std::collections::{BTreeSet, HashMap};

use crate::normalize::normalize_label;

/// Known cross-dataset name variants. Members are normalized when the table
/// is built, so raw spellings are fine here.
const BUILTIN_GROUPS: &[&[&str]] = &[
    &[
        "Alcatraz",
        "Pilão Cão",
        "Alcatraz e Pilão Cão",
        "Villages of Alcatraz and Pilão Cão",
    ],
    &[
        "Ribeira D. João",
        "Ribeira de D. João",
        "Ribeira Dom João",
        "Ribeira de Dom João",
    ],
    &[
        "Vila do Maio",
        "Cidade do Maio",
        "Porto Inglês",
        "Cidade do Porto Inglês",
    ],
    &[
        "Salinas do Porto Inglês",
        "Salinas de Porto Inglês",
        "Salinas",
        "Salt Pans",
    ],
    &[
        "Terras Salgadas",
        "Reserva Natural das Terras Salgadas",
        "Terras Salgadas Natural Reserve",
    ],
    &["Praia de Santana", "Santana", "Santana Beach"],
    &["Praia do Morro", "Morro", "Morro Beach"],
    &["Calheta", "Calheta do Maio"],
    &["Lagoa Cimidor", "Lagoa de Cimidor", "Cimidor"],
    &[
        "Barreiro e Figueira",
        "Paisagem Protegida de Barreiro e Figueira",
    ],
];

/// Multimap of synonyms keyed by normalized label.
///
/// A label may belong to several groups; [`AliasTable::expand`] returns the
/// union of all of them. Lookup is a single hash probe per label.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    groups: Vec<Vec<String>>,
    index: HashMap<String, Vec<usize>>,
}

impl AliasTable {
    /// Table with the built-in island name variants.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_groups(BUILTIN_GROUPS.iter().map(|g| g.iter().copied()))
    }

    /// Builds a table from raw groups. Members are normalized; empty labels
    /// and groups with fewer than two distinct members are skipped.
    pub fn from_groups<G, S>(groups: impl IntoIterator<Item = G>) -> Self
    where
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for group in groups {
            table.add_group(group);
        }
        table
    }

    /// Adds one group of equivalent names.
    pub fn add_group<S: AsRef<str>>(&mut self, members: impl IntoIterator<Item = S>) {
        let mut normalized: Vec<String> = Vec::new();
        for member in members {
            let label = normalize_label(member.as_ref());
            if !label.is_empty() && !normalized.contains(&label) {
                normalized.push(label);
            }
        }
        if normalized.len() < 2 {
            return;
        }

        let group_id = self.groups.len();
        for label in &normalized {
            self.index.entry(label.clone()).or_default().push(group_id);
        }
        self.groups.push(normalized);
    }

    /// `label` (normalized first) plus every member of every group containing it.
    #[must_use]
    pub fn expand(&self, label: &str) -> BTreeSet<String> {
        self.expand_normalized(&normalize_label(label))
    }

    /// Like [`Self::expand`] for a label that is already normalized.
    #[must_use]
    pub fn expand_normalized(&self, normalized: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if normalized.is_empty() {
            return out;
        }
        out.insert(normalized.to_owned());
        if let Some(group_ids) = self.index.get(normalized) {
            for &id in group_ids {
                out.extend(self.groups[id].iter().cloned());
            }
        }
        out
    }

    /// Whether `a` and `b` normalize to the same label or share a group.
    #[must_use]
    pub fn are_aliases(&self, a: &str, b: &str) -> bool {
        let b = normalize_label(b);
        !b.is_empty() && self.expand(a).contains(&b)
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_groups_expand_both_ways() {
        let table = AliasTable::builtin();
        assert!(table.are_aliases("Alcatraz", "Pilão Cão"));
        assert!(table.are_aliases("pilao cao", "alcatraz"));
        assert!(table.are_aliases("Villages of Alcatraz and Pilão Cão", "Alcatraz"));
    }

    #[test]
    fn ribeira_abbreviation_matches_long_form() {
        let table = AliasTable::builtin();
        let expanded = table.expand("Ribeira D. João");
        assert!(expanded.contains("ribeira d joao"));
        assert!(expanded.contains("ribeira de d joao"));
    }

    #[test]
    fn unknown_label_expands_to_itself() {
        let table = AliasTable::builtin();
        let expanded = table.expand("Pedro Vaz");
        assert_eq!(expanded.into_iter().collect::<Vec<_>>(), vec!["pedro vaz"]);
    }

    #[test]
    fn empty_label_expands_to_nothing() {
        assert!(AliasTable::builtin().expand(" - ").is_empty());
    }

    #[test]
    fn label_in_two_groups_gets_union() {
        let table = AliasTable::from_groups([["Morro", "Praia do Morro"], ["Morro", "Morrinho"]]);
        let expanded = table.expand("morro");
        assert!(expanded.contains("praia do morro"));
        assert!(expanded.contains("morrinho"));
        assert!(!table.are_aliases("praia do morro", "morrinho"));
    }

    #[test]
    fn degenerate_groups_are_skipped() {
        let table = AliasTable::from_groups([vec!["Calheta", "calheta"], vec!["", "x"]]);
        assert_eq!(table.group_count(), 0);
    }
}
