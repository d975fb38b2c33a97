//! `receitas` command: revenue view models for one year.

use ilha_core::{ReceitasSeriesPoint, ReceitasSummary, ReceitasTableRow};
use ilha_dashboard::{
    build_receitas_series, build_receitas_summary, build_receitas_table_rows, find_receitas_year,
    parse_receitas_payload, previous_receitas_year,
};
use serde::Serialize;

use crate::{print_json, Context};

#[derive(Debug, Serialize)]
struct ReceitasView {
    year: Option<i32>,
    island: String,
    source: Option<String>,
    updated_at: Option<String>,
    fallback: bool,
    summary: Option<ReceitasSummary>,
    table: Vec<ReceitasTableRow>,
    series: Vec<ReceitasSeriesPoint>,
}

/// Prints the summary, ranked table and series for `year_label`. The table
/// lists every island unless `filter` names one. A year missing from the
/// payload prints an empty view rather than failing.
///
/// # Errors
///
/// Returns an error if the revenue endpoint is unreachable with nothing
/// cached, or the run is cancelled.
pub(crate) async fn run_receitas(
    ctx: &Context,
    year_label: &str,
    island: Option<&str>,
    filter: &str,
    all_label: &str,
) -> anyhow::Result<()> {
    let raw = ctx.required("/api/receitas").await?;
    let payload = parse_receitas_payload(&raw);
    let island = island.unwrap_or(&ctx.config.island_label);

    let selected = find_receitas_year(&payload.years, year_label);
    if selected.is_none() {
        tracing::warn!(year = year_label, "year not present in revenue data");
    }
    let previous = selected.and_then(|s| previous_receitas_year(&payload.years, s));

    let view = ReceitasView {
        year: selected.map(|s| s.year),
        island: island.to_owned(),
        summary: selected.map(|s| build_receitas_summary(s, previous, island)),
        table: selected
            .map(|s| build_receitas_table_rows(s, previous, filter, all_label))
            .unwrap_or_default(),
        series: build_receitas_series(&payload.years, island),
        source: payload.source,
        updated_at: payload.updated_at,
        fallback: payload.fallback,
    };
    print_json(&view)
}
