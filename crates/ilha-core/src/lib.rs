//! Canonical domain types and configuration shared by every `ilha` crate.
//!
//! Upstream feeds are coerced into these shapes at the fetch boundary; the
//! selectors, resolvers and recommender only ever see the types below.

pub mod app_config;
pub mod coerce;
pub mod conditions;
pub mod config;
pub mod places;
pub mod receitas;
pub mod transfers;

pub use app_config::{AppConfig, Environment};
pub use conditions::MarineConditions;
pub use config::{load_app_config, load_app_config_from_env};
pub use places::{Lang, LocalizedText, Place, SearchItem, SearchItemKind};
pub use receitas::{
    RecebedoriaValue, ReceitasPayload, ReceitasSeriesPoint, ReceitasSummary, ReceitasTableRow,
    ReceitasYear,
};
pub use transfers::{load_transfer_fallbacks, TransferFallbacks, TransferRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read fallback file {path}: {source}")]
    FallbackFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fallback file: {0}")]
    FallbackFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
