//! Revenue ("receitas") selectors.
//!
//! All percentages are plain `f64`s; rounding is left to the caller. None of
//! these functions panic: malformed input degrades to zeros or empty output.

use ilha_core::coerce;
use ilha_core::{
    RecebedoriaValue, ReceitasPayload, ReceitasSeriesPoint, ReceitasSummary, ReceitasTableRow,
    ReceitasYear,
};
use serde_json::Value;

/// Coerces the revenue endpoint response. Accepts the
/// `{ data, source, updatedAt, fallback }` envelope or a bare record array.
#[must_use]
pub fn parse_receitas_payload(raw: &Value) -> ReceitasPayload {
    match raw {
        Value::Array(records) => ReceitasPayload {
            years: normalize_receitas_years(records),
            ..ReceitasPayload::default()
        },
        Value::Object(_) => ReceitasPayload {
            years: normalize_receitas_years(coerce::array(raw.get("data"))),
            source: raw.get("source").and_then(coerce::text),
            updated_at: coerce::first_field(raw, &["updatedAt", "updated_at"])
                .and_then(coerce::text),
            fallback: raw
                .get("fallback")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        _ => ReceitasPayload::default(),
    }
}

/// Maps raw year records into [`ReceitasYear`]s.
///
/// Missing breakdowns become empty, non-numeric totals and values become
/// `0`. Records without a usable year and breakdown entries without a
/// recebedoria name are dropped.
#[must_use]
pub fn normalize_receitas_years(records: &[Value]) -> Vec<ReceitasYear> {
    records
        .iter()
        .filter_map(|record| {
            let year = record
                .get("year")
                .and_then(coerce::integer)
                .and_then(|y| i32::try_from(y).ok())?;

            let by_recebedoria = coerce::array(coerce::first_field(
                record,
                &["by_recebedoria", "byRecebedoria"],
            ))
            .iter()
            .filter_map(|entry| {
                let recebedoria = entry.get("recebedoria").and_then(coerce::text)?;
                Some(RecebedoriaValue {
                    recebedoria,
                    value: coerce::number_or_zero(entry.get("value")),
                })
            })
            .collect();

            Some(ReceitasYear {
                year,
                total: coerce::number_or_zero(record.get("total")),
                by_recebedoria,
            })
        })
        .collect()
}

/// Extracts the first run of ASCII digits in `label` as a year.
fn extract_year(label: &str) -> Option<i32> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let digits: String = label[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Finds the record whose year equals the number in `year_label`
/// (`"2025"`, `"Ano 2025"`).
#[must_use]
pub fn find_receitas_year<'a>(years: &'a [ReceitasYear], year_label: &str) -> Option<&'a ReceitasYear> {
    let year = extract_year(year_label)?;
    years.iter().find(|y| y.year == year)
}

/// The record for the year immediately before `selected`, if present.
#[must_use]
pub fn previous_receitas_year<'a>(
    years: &'a [ReceitasYear],
    selected: &ReceitasYear,
) -> Option<&'a ReceitasYear> {
    let prior = selected.year.checked_sub(1)?;
    years.iter().find(|y| y.year == prior)
}

/// Percent change from `base` to `current`; `None` when `base` is zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn percent_change(current: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    Some((current - base) / base * 100.0)
}

/// `part / whole`, or `0` when `whole` is zero.
#[allow(clippy::float_cmp)]
fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}

/// Headline figures for `island_label` in `selected`, compared against
/// `previous`.
#[must_use]
pub fn build_receitas_summary(
    selected: &ReceitasYear,
    previous: Option<&ReceitasYear>,
    island_label: &str,
) -> ReceitasSummary {
    let island = selected.value_for(island_label).unwrap_or(0.0);

    let (total_yoy, island_yoy) = match previous {
        Some(prev) => (
            percent_change(selected.total, prev.total),
            percent_change(island, prev.value_for(island_label).unwrap_or(0.0)),
        ),
        None => (None, None),
    };

    ReceitasSummary {
        total: selected.total,
        island,
        share: ratio(island, selected.total),
        total_yoy,
        island_yoy,
    }
}

/// Ranked per-island table for `selected`.
///
/// When `filter_island` differs from `all_label` only that island's row is
/// produced. Rows are sorted by value, descending; equal values keep input
/// order.
#[must_use]
pub fn build_receitas_table_rows(
    selected: &ReceitasYear,
    previous: Option<&ReceitasYear>,
    filter_island: &str,
    all_label: &str,
) -> Vec<ReceitasTableRow> {
    let entries: Vec<(String, f64)> = if filter_island == all_label {
        selected
            .by_recebedoria
            .iter()
            .map(|r| (r.recebedoria.clone(), r.value))
            .collect()
    } else {
        vec![(
            filter_island.to_owned(),
            selected.value_for(filter_island).unwrap_or(0.0),
        )]
    };

    let mut rows: Vec<ReceitasTableRow> = entries
        .into_iter()
        .map(|(ilha, value)| {
            let yoy = previous
                .and_then(|p| p.value_for(&ilha))
                .and_then(|base| percent_change(value, base));
            ReceitasTableRow {
                share: ratio(value, selected.total) * 100.0,
                ilha,
                rank: 0,
                value,
                yoy,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

/// Total and island value per year, ascending by year.
#[must_use]
pub fn build_receitas_series(
    years: &[ReceitasYear],
    island_label: &str,
) -> Vec<ReceitasSeriesPoint> {
    let mut series: Vec<ReceitasSeriesPoint> = years
        .iter()
        .map(|y| ReceitasSeriesPoint {
            year: y.year,
            total: y.total,
            island: y.value_for(island_label).unwrap_or(0.0),
        })
        .collect();
    series.sort_by_key(|p| p.year);
    series
}

#[cfg(test)]
#[path = "receitas_test.rs"]
mod tests;
