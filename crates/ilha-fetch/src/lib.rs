//! Offline-first HTTP JSON fetching for the `ilha` data layer.
//!
//! Wraps `reqwest` with a URL-keyed response cache so views keep working on
//! flaky island connectivity. See [`OfflineFirstFetcher`] for the read policy.

pub mod cache;
pub mod error;
pub mod fetcher;

pub use cache::{cache_key, DiskCache, MemoryCache, ResponseCache};
pub use error::FetchError;
pub use fetcher::{Fetched, OfflineFirstFetcher, Origin};
pub use tokio_util::sync::CancellationToken;
