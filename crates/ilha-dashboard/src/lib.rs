//! Civic-data dashboard selectors.
//!
//! Pure functions that turn coerced revenue payloads into the summary,
//! ranked table and series the dashboard renders, plus the municipal
//! transfer loader with its cache, network and static-snapshot chain.

pub mod receitas;
pub mod transfers;

pub use receitas::{
    build_receitas_series, build_receitas_summary, build_receitas_table_rows, find_receitas_year,
    normalize_receitas_years, parse_receitas_payload, percent_change, previous_receitas_year,
};
pub use transfers::{load_transfers, parse_transfer_records, DataOrigin, TransfersView};
