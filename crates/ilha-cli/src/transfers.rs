//! `transfers` command.

use ilha_core::{load_transfer_fallbacks, TransferFallbacks};
use ilha_dashboard::load_transfers;

use crate::{print_json, Context};

/// A missing fallback file is not fatal; the loader just has no static
/// snapshot to fall back on. A malformed one is.
fn fallbacks(ctx: &Context) -> anyhow::Result<TransferFallbacks> {
    let path = &ctx.config.transfer_fallback_path;
    if !path.exists() {
        tracing::warn!(path = %path.display(), "transfer fallback file not found, continuing without snapshots");
        return Ok(TransferFallbacks::default());
    }
    Ok(load_transfer_fallbacks(path)?)
}

/// # Errors
///
/// Returns an error if the fallback file is malformed or the run is
/// cancelled.
pub(crate) async fn run_transfers(ctx: &Context, year: i32) -> anyhow::Result<()> {
    let fallbacks = fallbacks(ctx)?;
    let url = ctx.config.endpoint("/api/transferencias");
    let view = load_transfers(&ctx.fetcher, &url, year, &fallbacks, &ctx.cancel).await?;
    tracing::info!(year, origin = ?view.origin, rows = view.records.len(), "loaded transfers");
    print_json(&view)
}
