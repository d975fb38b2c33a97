//! `plan` command.

use chrono::{Datelike, Weekday};
use ilha_core::MarineConditions;
use ilha_places::MatchContext;
use ilha_plan::{build_today_plan, PlanSignals, PlanWeights};
use serde_json::json;

use crate::places::{load_catalog, PlacesArgs};
use crate::{print_json, Context};

/// Prints today's plan. Missing marine readings plan for a calm day.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the run is cancelled.
pub(crate) async fn run_plan(
    ctx: &Context,
    weekday: Option<Weekday>,
    args: &PlacesArgs,
) -> anyhow::Result<()> {
    let weekday = weekday.unwrap_or_else(|| chrono::Local::now().weekday());
    let lang = ctx.lang(args.lang);

    let catalog = load_catalog(ctx, &MatchContext::default()).await?;
    let conditions = MarineConditions::from_value(&ctx.optional("/api/marine").await?);

    let plan = build_today_plan(&catalog, &conditions, lang, weekday, &PlanWeights::default());
    print_json(&json!({
        "weekday": weekday.to_string(),
        "conditions": conditions,
        "signals": PlanSignals::from(&conditions),
        "slots": plan,
    }))
}
