mod places;
mod plan;
mod receitas;
mod transfers;

use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ilha_core::{AppConfig, Lang};
use ilha_fetch::{CancellationToken, DiskCache, FetchError, OfflineFirstFetcher};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::places::PlacesArgs;

#[derive(Debug, Parser)]
#[command(name = "ilha")]
#[command(about = "Maio visitor guide and civic-data command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Revenue summary, ranked island table and yearly series
    Receitas {
        /// Year to show (e.g. 2025 or "Ano 2025")
        #[arg(long)]
        year: String,
        /// Island to highlight (defaults to ILHA_ISLAND_LABEL)
        #[arg(long)]
        island: Option<String>,
        /// Restrict the table to one island
        #[arg(long)]
        filter: Option<String>,
        /// Label meaning "every island" in the table filter
        #[arg(long, default_value = "Todas")]
        all_label: String,
    },
    /// Municipal transfers for one year, with static fallback
    Transfers {
        #[arg(long)]
        year: i32,
    },
    /// Resolve the catalog entry for a map feature
    Match {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        osm_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Typeahead search over beaches, settlements and protected areas
    Search {
        query: String,
        #[arg(long, default_value = "10")]
        limit: usize,
        #[command(flatten)]
        places: PlacesArgs,
    },
    /// Protected areas narrated along a sequence of positions
    Nearby {
        /// Position as `lng,lat`; repeat to replay a walk
        #[arg(long = "at", value_parser = parse_position, required = true, allow_hyphen_values = true)]
        positions: Vec<[f64; 2]>,
        /// Trigger radius in metres
        #[arg(long, default_value = "1500")]
        radius: f64,
        #[command(flatten)]
        places: PlacesArgs,
    },
    /// Three-slot plan for today from the catalog and sea conditions
    Plan {
        /// Day of week (defaults to today)
        #[arg(long)]
        weekday: Option<chrono::Weekday>,
        #[command(flatten)]
        places: PlacesArgs,
    },
}

/// Parses `lng,lat`.
fn parse_position(raw: &str) -> Result<[f64; 2], String> {
    let (lng, lat) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected lng,lat, got '{raw}'"))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("bad longitude: {e}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {e}"))?;
    if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
        return Err(format!("position out of range: {raw}"));
    }
    Ok([lng, lat])
}

/// Shared state for every command.
pub(crate) struct Context {
    pub config: AppConfig,
    pub fetcher: OfflineFirstFetcher<DiskCache>,
    pub cancel: CancellationToken,
}

impl Context {
    pub fn lang(&self, override_lang: Option<Lang>) -> Lang {
        override_lang.unwrap_or(self.config.lang)
    }

    /// Fetches a dataset the command cannot do without.
    pub async fn required(&self, path: &str) -> anyhow::Result<Value> {
        let url = self.config.endpoint(path);
        let fetched = self
            .fetcher
            .fetch_json_cancellable::<Value>(&url, &self.cancel)
            .await
            .with_context(|| format!("failed to load {url}"))?;
        tracing::debug!(url = %url, origin = ?fetched.origin, "loaded dataset");
        Ok(fetched.value)
    }

    /// Fetches a dataset the command can degrade without. Failures other
    /// than cancellation yield `Value::Null`.
    pub async fn optional(&self, path: &str) -> anyhow::Result<Value> {
        let url = self.config.endpoint(path);
        match self
            .fetcher
            .fetch_json_cancellable::<Value>(&url, &self.cancel)
            .await
        {
            Ok(fetched) => Ok(fetched.value),
            Err(err @ FetchError::Cancelled { .. }) => Err(err.into()),
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "dataset unavailable, continuing without it");
                Ok(Value::Null)
            }
        }
    }
}

pub(crate) fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = ilha_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let fetcher = OfflineFirstFetcher::new(
        DiskCache::new(config.cache_dir.clone()),
        config.request_timeout_secs,
        &config.user_agent,
    )?
    .with_revalidation(config.revalidate_cache);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted, cancelling in-flight requests");
                cancel.cancel();
            }
        }
    });

    tracing::debug!(env = %config.env, base = %config.api_base_url, "starting");
    let ctx = Context {
        config,
        fetcher,
        cancel,
    };

    let outcome = match cli.command {
        Commands::Receitas {
            year,
            island,
            filter,
            all_label,
        } => {
            let filter = filter.as_deref().unwrap_or(&all_label);
            receitas::run_receitas(&ctx, &year, island.as_deref(), filter, &all_label).await
        }
        Commands::Transfers { year } => transfers::run_transfers(&ctx, year).await,
        Commands::Match { id, osm_id, name } => {
            places::run_match(&ctx, id.as_deref(), osm_id.as_deref(), name.as_deref()).await
        }
        Commands::Search {
            query,
            limit,
            places: args,
        } => places::run_search(&ctx, &query, limit, &args).await,
        Commands::Nearby {
            positions,
            radius,
            places: args,
        } => places::run_nearby(&ctx, &positions, radius, &args).await,
        Commands::Plan {
            weekday,
            places: args,
        } => plan::run_plan(&ctx, weekday, &args).await,
    };

    // Background cache refreshes die with the runtime, so let them land.
    let grace = Duration::from_secs(ctx.config.request_timeout_secs);
    ctx.fetcher.drain(grace).await;
    outcome
}

#[cfg(test)]
mod tests;
