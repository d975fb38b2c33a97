use serde::{Deserialize, Serialize};

/// Display language for localized catalog text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Pt,
    En,
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lang::Pt => write!(f, "pt"),
            Lang::En => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-pt" | "pt-cv" => Ok(Lang::Pt),
            "en" | "en-gb" | "en-us" => Ok(Lang::En),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

/// Text that is either a single string or a `{ pt, en }` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        en: Option<String>,
    },
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

impl LocalizedText {
    /// Resolves the text for `lang`, falling back to the other language.
    #[must_use]
    pub fn get(&self, lang: Lang) -> &str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Localized { pt, en } => {
                let (first, second) = match lang {
                    Lang::Pt => (pt, en),
                    Lang::En => (en, pt),
                };
                first
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .or_else(|| second.as_deref().filter(|s| !s.is_empty()))
                    .unwrap_or("")
            }
        }
    }

    /// Every non-empty variant of this text, in `pt`, `en` order.
    #[must_use]
    pub fn variants(&self) -> Vec<&str> {
        match self {
            LocalizedText::Plain(s) if s.is_empty() => Vec::new(),
            LocalizedText::Plain(s) => vec![s.as_str()],
            LocalizedText::Localized { pt, en } => [pt, en]
                .into_iter()
                .filter_map(|v| v.as_deref().filter(|s| !s.is_empty()))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants().is_empty()
    }
}

/// A point of interest from the curated catalog or an OSM GeoJSON layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: LocalizedText,
    pub description: Option<LocalizedText>,
    pub image_url: Option<String>,
    /// `[lng, lat]`, GeoJSON order.
    pub coordinates: Option<[f64; 2]>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    /// OSM identifier, kept as a string so `"node/123"` and `123` both fit.
    pub osm_id: Option<String>,
    /// Free-text locality, e.g. the settlement a beach belongs to.
    pub location: Option<String>,
}

impl Place {
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchItemKind {
    Beach,
    Settlement,
    Protected,
}

impl SearchItemKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchItemKind::Beach => "beach",
            SearchItemKind::Settlement => "settlement",
            SearchItemKind::Protected => "protected",
        }
    }
}

impl std::fmt::Display for SearchItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the flattened typeahead index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SearchItemKind,
    /// `[lng, lat]`.
    pub coordinates: [f64; 2],
    pub category: Option<String>,
    pub description: Option<String>,
}
