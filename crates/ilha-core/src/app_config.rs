use std::path::PathBuf;

use crate::places::Lang;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the JSON API the data layer consumes, without a trailing slash.
    pub api_base_url: String,
    /// Directory backing the on-disk response cache.
    pub cache_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Refresh cached responses in the background after serving them.
    pub revalidate_cache: bool,
    /// YAML file holding last-resort municipal transfer snapshots.
    pub transfer_fallback_path: PathBuf,
    /// Recebedoria label the dashboard highlights.
    pub island_label: String,
    pub lang: Lang,
}

impl AppConfig {
    /// Joins `path` onto the configured API base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
