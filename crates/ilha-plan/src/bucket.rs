use ilha_core::Place;
use ilha_places::normalize_label;
use serde::Serialize;

/// Coarse kind of outing a place offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Beach,
    Settlement,
    Heritage,
    Nature,
    Other,
}

impl Bucket {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Beach => "beach",
            Bucket::Settlement => "settlement",
            Bucket::Heritage => "heritage",
            Bucket::Nature => "nature",
            Bucket::Other => "other",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords per bucket, in classification order. Matched against the
/// normalized category and tags.
const CLASSIFIERS: &[(Bucket, &[&str])] = &[
    (Bucket::Beach, &["beach", "praia", "baia", "bay", "coast"]),
    (
        Bucket::Settlement,
        &["settlement", "village", "town", "city", "vila", "cidade", "povoado", "aldeia"],
    ),
    (
        Bucket::Heritage,
        &[
            "heritage", "historic", "church", "igreja", "fort", "forte", "museum", "museu",
            "monument", "patrimonio", "ruin",
        ],
    ),
    (
        Bucket::Nature,
        &[
            "nature", "natural", "protected", "reserve", "reserva", "park", "parque", "dune",
            "duna", "lagoon", "lagoa", "salina", "salt", "wildlife", "turtle", "tartaruga", "monte",
        ],
    ),
];

/// Normalized words of the place's category and tags.
pub(crate) fn keywords(place: &Place) -> Vec<String> {
    place
        .category
        .iter()
        .chain(&place.tags)
        .map(|s| normalize_label(s))
        .flat_map(|label| {
            label
                .split(' ')
                .filter(|w| !w.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Whether any word starts with `keyword`, so `dune` also hits `dunes`.
pub(crate) fn has_keyword(words: &[String], keyword: &str) -> bool {
    words.iter().any(|w| w.starts_with(keyword))
}

/// First bucket whose keywords hit the place's category or tags.
#[must_use]
pub fn classify(place: &Place) -> Bucket {
    let words = keywords(place);
    CLASSIFIERS
        .iter()
        .find(|(_, keys)| keys.iter().any(|k| has_keyword(&words, k)))
        .map_or(Bucket::Other, |(bucket, _)| *bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(category: Option<&str>, tags: &[&str]) -> Place {
        Place {
            id: "p".into(),
            category: category.map(str::to_owned),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            ..Place::default()
        }
    }

    #[test]
    fn category_alone_classifies() {
        assert_eq!(classify(&place(Some("beach"), &[])), Bucket::Beach);
        assert_eq!(classify(&place(Some("settlement"), &[])), Bucket::Settlement);
        assert_eq!(classify(&place(Some("protected"), &[])), Bucket::Nature);
    }

    #[test]
    fn beach_checked_before_nature() {
        let dunes_beach = place(None, &["Dunas", "Praia"]);
        assert_eq!(classify(&dunes_beach), Bucket::Beach);
    }

    #[test]
    fn tags_match_accented_and_plural_forms() {
        assert_eq!(classify(&place(None, &["Património"])), Bucket::Heritage);
        assert_eq!(classify(&place(None, &["sand dunes"])), Bucket::Nature);
    }

    #[test]
    fn unknown_is_other() {
        assert_eq!(classify(&place(Some("restaurant"), &["food"])), Bucket::Other);
        assert_eq!(classify(&Place::default()), Bucket::Other);
    }
}
