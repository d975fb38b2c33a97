use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One municipal transfer line: money a fund sent to a municipality in a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub year: i32,
    pub municipality: String,
    pub fund: String,
    pub amount: f64,
}

/// Last-resort municipal transfer snapshots, used when neither the cache nor
/// the network yields data for a year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferFallbacks {
    #[serde(default)]
    pub records: Vec<TransferRecord>,
}

impl TransferFallbacks {
    /// Snapshot rows for `year`, in file order.
    #[must_use]
    pub fn for_year(&self, year: i32) -> Vec<TransferRecord> {
        self.records
            .iter()
            .filter(|r| r.year == year)
            .cloned()
            .collect()
    }

    /// Parse and validate snapshots from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not valid YAML or fails validation.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let fallbacks: TransferFallbacks =
            serde_yaml::from_str(content).map_err(ConfigError::FallbackFileParse)?;
        validate_fallbacks(&fallbacks)?;
        Ok(fallbacks)
    }
}

/// Load and validate the transfer fallback snapshots from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_transfer_fallbacks(path: &Path) -> Result<TransferFallbacks, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FallbackFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    TransferFallbacks::from_yaml(&content)
}

fn validate_fallbacks(fallbacks: &TransferFallbacks) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for record in &fallbacks.records {
        if record.municipality.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "transfer snapshot for {} has an empty municipality",
                record.year
            )));
        }

        if !record.amount.is_finite() || record.amount < 0.0 {
            return Err(ConfigError::Validation(format!(
                "transfer snapshot '{}' ({}) has invalid amount {}",
                record.municipality, record.year, record.amount
            )));
        }

        let key = (
            record.year,
            record.municipality.to_lowercase(),
            record.fund.to_lowercase(),
        );
        if !seen.insert(key) {
            return Err(ConfigError::Validation(format!(
                "duplicate transfer snapshot: '{}' / '{}' in {}",
                record.municipality, record.fund, record.year
            )));
        }
    }

    Ok(())
}
