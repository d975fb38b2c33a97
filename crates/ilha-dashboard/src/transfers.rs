//! Municipal transfer loader.
//!
//! Reads the transfers endpoint cache-first. A cached payload with no rows
//! for the requested year (or no cached payload) goes straight to a single
//! live read; when that also comes back empty or fails, the static snapshot
//! for the year is used.

use ilha_core::coerce;
use ilha_core::{TransferFallbacks, TransferRecord};
use ilha_fetch::{CancellationToken, FetchError, OfflineFirstFetcher, Origin, ResponseCache};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Cache,
    Network,
    StaticFallback,
    /// Nothing anywhere; the view shows its "no data" state.
    Empty,
}

impl From<Origin> for DataOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Cache => DataOrigin::Cache,
            Origin::Network => DataOrigin::Network,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransfersView {
    pub year: i32,
    pub records: Vec<TransferRecord>,
    pub total: f64,
    pub origin: DataOrigin,
}

impl TransfersView {
    fn new(year: i32, records: Vec<TransferRecord>, origin: DataOrigin) -> Self {
        let total = records.iter().map(|r| r.amount).sum();
        Self {
            year,
            records,
            total,
            origin,
        }
    }
}

/// Coerces a transfers payload (`{ data: [...] }` or a bare array). Field
/// names are accepted in English or Portuguese; rows without a year or
/// municipality are dropped and non-numeric amounts become `0`.
#[must_use]
pub fn parse_transfer_records(raw: &Value) -> Vec<TransferRecord> {
    let rows: &[Value] = match raw {
        Value::Array(rows) => rows.as_slice(),
        Value::Object(_) => coerce::array(raw.get("data")),
        _ => &[],
    };

    rows.iter()
        .filter_map(|row| {
            let year = coerce::first_field(row, &["year", "ano"])
                .and_then(coerce::integer)
                .and_then(|y| i32::try_from(y).ok())?;
            let municipality =
                coerce::first_field(row, &["municipality", "municipio"]).and_then(coerce::text)?;
            let fund = coerce::first_field(row, &["fund", "fundo"])
                .and_then(coerce::text)
                .unwrap_or_default();
            let amount = coerce::number_or_zero(coerce::first_field(row, &["amount", "valor"]));
            Some(TransferRecord {
                year,
                municipality,
                fund,
                amount,
            })
        })
        .collect()
}

fn rows_for_year(raw: &Value, year: i32) -> Vec<TransferRecord> {
    parse_transfer_records(raw)
        .into_iter()
        .filter(|r| r.year == year)
        .collect()
}

/// Loads transfers for `year` through the cache → network → static chain.
///
/// # Errors
///
/// Returns [`FetchError::Cancelled`] if `cancel` fires. Every other failure
/// degrades to the static snapshot or an empty view.
pub async fn load_transfers<C: ResponseCache>(
    fetcher: &OfflineFirstFetcher<C>,
    url: &str,
    year: i32,
    fallbacks: &TransferFallbacks,
    cancel: &CancellationToken,
) -> Result<TransfersView, FetchError> {
    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled { url: url.to_owned() });
    }

    if let Some(cached) = fetcher.peek_cached::<Value>(url).await {
        let rows = rows_for_year(&cached, year);
        if !rows.is_empty() {
            fetcher.revalidate_in_background(url, cancel);
            return Ok(TransfersView::new(year, rows, DataOrigin::Cache));
        }
        tracing::debug!(url, year, "cached transfers empty for year, forcing live read");
    }

    match fetcher.fetch_json_fresh_cancellable::<Value>(url, cancel).await {
        Ok(fetched) => {
            let rows = rows_for_year(&fetched.value, year);
            if !rows.is_empty() {
                return Ok(TransfersView::new(year, rows, fetched.origin.into()));
            }
        }
        Err(err @ FetchError::Cancelled { .. }) => return Err(err),
        Err(err) => tracing::warn!(url, error = %err, "transfers unavailable from cache and network"),
    }

    let snapshot = fallbacks.for_year(year);
    if snapshot.is_empty() {
        tracing::warn!(year, "no transfer data or static snapshot for year");
        return Ok(TransfersView::new(year, Vec::new(), DataOrigin::Empty));
    }
    tracing::info!(year, rows = snapshot.len(), "using static transfer snapshot");
    Ok(TransfersView::new(year, snapshot, DataOrigin::StaticFallback))
}
