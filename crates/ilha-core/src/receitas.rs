//! Government revenue ("receitas") records broken down by recebedoria,
//! the regional tax office that collected them.

use serde::{Deserialize, Serialize};

/// Revenue collected by one recebedoria in a given year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecebedoriaValue {
    pub recebedoria: String,
    pub value: f64,
}

/// One year of revenue. `total` is reported by the upstream API and may not
/// equal the sum of `by_recebedoria`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceitasYear {
    pub year: i32,
    pub total: f64,
    pub by_recebedoria: Vec<RecebedoriaValue>,
}

impl ReceitasYear {
    /// Value reported for `recebedoria` (exact, case-sensitive), if any.
    #[must_use]
    pub fn value_for(&self, recebedoria: &str) -> Option<f64> {
        self.by_recebedoria
            .iter()
            .find(|r| r.recebedoria == recebedoria)
            .map(|r| r.value)
    }
}

/// Coerced revenue envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceitasPayload {
    pub years: Vec<ReceitasYear>,
    pub source: Option<String>,
    pub updated_at: Option<String>,
    /// Upstream signalled it served stale or fallback data.
    pub fallback: bool,
}

/// Headline figures for the selected year and island.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceitasSummary {
    pub total: f64,
    pub island: f64,
    /// Island share of the total as a fraction (`0.15` is 15 %).
    pub share: f64,
    /// Percent change of the total against the previous year.
    pub total_yoy: Option<f64>,
    pub island_yoy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceitasTableRow {
    pub ilha: String,
    /// 1-based position in descending value order.
    pub rank: usize,
    pub value: f64,
    /// Percent of the year's total (`15.0` is 15 %).
    pub share: f64,
    pub yoy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceitasSeriesPoint {
    pub year: i32,
    pub total: f64,
    pub island: f64,
}
