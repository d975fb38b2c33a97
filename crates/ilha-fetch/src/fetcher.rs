//! Offline-first JSON fetcher.
//!
//! The cache is a fast path, not an authority: [`OfflineFirstFetcher::fetch_json`]
//! serves a parseable cached body immediately and refreshes it in the
//! background, while [`OfflineFirstFetcher::fetch_json_fresh`] goes to the
//! network first and only falls back to the cache when the live read fails.
//! There are no retries beyond that single cache/network chain.
//!
//! Background refreshes are tracked, so a short-lived process calls
//! [`OfflineFirstFetcher::drain`] before its runtime shuts down.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::cache::ResponseCache;
use crate::error::FetchError;

/// Where a returned payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cache,
    Network,
}

/// A parsed payload together with its origin.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub value: T,
    pub origin: Origin,
}

/// HTTP JSON client backed by a [`ResponseCache`].
pub struct OfflineFirstFetcher<C> {
    client: Client,
    cache: Arc<C>,
    revalidate: bool,
    tasks: TaskTracker,
}

impl<C> Clone for OfflineFirstFetcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: Arc::clone(&self.cache),
            revalidate: self.revalidate,
            tasks: self.tasks.clone(),
        }
    }
}

impl<C: ResponseCache> OfflineFirstFetcher<C> {
    /// Creates a fetcher with the given request timeout and `User-Agent`.
    /// Background revalidation is off until [`Self::with_revalidation`] enables it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(cache: C, timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            cache: Arc::new(cache),
            revalidate: false,
            tasks: TaskTracker::new(),
        })
    }

    /// Refresh cached entries in a background task after serving them.
    #[must_use]
    pub fn with_revalidation(mut self, revalidate: bool) -> Self {
        self.revalidate = revalidate;
        self
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Cache-first read of `url`.
    ///
    /// # Errors
    ///
    /// Returns the network error when there is no parseable cached body and
    /// the live read fails.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Fetched<T>, FetchError> {
        self.fetch_json_cancellable(url, &CancellationToken::new())
            .await
    }

    /// Cache-first read of `url` that stops when `cancel` fires.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Cancelled`] if `cancel` fires before a payload is available.
    /// - [`FetchError::Http`], [`FetchError::UnexpectedStatus`] or
    ///   [`FetchError::Deserialize`] when there is no parseable cached body
    ///   and the live read fails.
    pub async fn fetch_json_cancellable<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Fetched<T>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled { url: url.to_owned() });
        }

        if let Some(value) = self.peek_cached::<T>(url).await {
            tracing::debug!(url, "serving cached payload");
            self.revalidate_in_background(url, cancel);
            return Ok(Fetched {
                value,
                origin: Origin::Cache,
            });
        }

        tracing::debug!(url, "cache miss, reading from network");
        let value = self.network_json::<T>(url, cancel).await?;
        Ok(Fetched {
            value,
            origin: Origin::Network,
        })
    }

    /// Network-first read of `url`, falling back to the cache on failure.
    ///
    /// # Errors
    ///
    /// Returns the network error when the live read fails and there is no
    /// parseable cached body.
    pub async fn fetch_json_fresh<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Fetched<T>, FetchError> {
        self.fetch_json_fresh_cancellable(url, &CancellationToken::new())
            .await
    }

    /// Network-first read of `url` that stops when `cancel` fires.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Cancelled`] if `cancel` fires first. The cache is not
    ///   consulted after cancellation.
    /// - The network error when the live read fails and there is no
    ///   parseable cached body.
    pub async fn fetch_json_fresh_cancellable<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Fetched<T>, FetchError> {
        match self.network_json::<T>(url, cancel).await {
            Ok(value) => Ok(Fetched {
                value,
                origin: Origin::Network,
            }),
            Err(err @ FetchError::Cancelled { .. }) => Err(err),
            Err(err) => {
                if let Some(value) = self.peek_cached::<T>(url).await {
                    tracing::warn!(url, error = %err, "live read failed, serving cached payload");
                    return Ok(Fetched {
                        value,
                        origin: Origin::Cache,
                    });
                }
                Err(err)
            }
        }
    }

    /// Cache-only read of `url`. Unreadable or unparseable entries are
    /// misses. Never touches the network and never spawns a refresh.
    pub async fn peek_cached<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        let body = match self.cache.get(url).await {
            Ok(Some(body)) => body,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(url, error = %e, "cache read failed");
                return None;
            }
        };

        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(url, error = %e, "cached payload is not parseable");
                None
            }
        }
    }

    /// Spawns a live GET that rewrites the cache entry for `url`, when
    /// revalidation is enabled. The task stops when `cancel` fires.
    pub fn revalidate_in_background(&self, url: &str, cancel: &CancellationToken) {
        if !self.revalidate {
            return;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let fetcher = self.clone();
        let url = url.to_owned();
        let cancel = cancel.child_token();
        self.tasks.spawn_on(
            async move {
                match fetcher
                    .network_json::<serde_json::Value>(&url, &cancel)
                    .await
                {
                    Ok(_) => tracing::debug!(url = %url, "cache revalidated"),
                    Err(FetchError::Cancelled { .. }) => {}
                    Err(e) => tracing::debug!(url = %url, error = %e, "cache revalidation failed"),
                }
            },
            &handle,
        );
    }

    /// Waits up to `timeout` for background revalidations to finish.
    /// Returns `false` if some were still running at the deadline.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tasks.close();
        let finished = tokio::time::timeout(timeout, self.tasks.wait())
            .await
            .is_ok();
        self.tasks.reopen();
        if !finished {
            tracing::warn!(
                pending = self.tasks.len(),
                "cache revalidation still running at shutdown"
            );
        }
        finished
    }

    /// Live GET of `url`, parsed as `T`. The raw body is cached only after it
    /// parses.
    async fn network_json<T: DeserializeOwned>(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<T, FetchError> {
        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                return Err(FetchError::Cancelled { url: url.to_owned() });
            }
            body = request_body(&self.client, url) => body?,
        };

        let value = serde_json::from_slice::<T>(&body).map_err(|e| FetchError::Deserialize {
            context: url.to_owned(),
            source: e,
        })?;

        self.store(url, &body).await;
        Ok(value)
    }

    async fn store(&self, url: &str, body: &[u8]) {
        if let Err(e) = self.cache.put(url, body).await {
            tracing::warn!(url, error = %e, "cache write failed");
        }
    }
}

/// Sends a GET request and returns the body of a 2xx response.
async fn request_body(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;

    fn test_fetcher() -> OfflineFirstFetcher<MemoryCache> {
        OfflineFirstFetcher::new(MemoryCache::new(), 5, "ilha-test/0.1")
            .expect("fetcher construction should not fail")
    }

    #[tokio::test]
    async fn already_cancelled_token_short_circuits() {
        let fetcher = test_fetcher();
        fetcher.cache().insert("http://unused.invalid/x", "[1]");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = fetcher
            .fetch_json_cancellable::<Vec<u32>>("http://unused.invalid/x", &cancel)
            .await;
        assert!(matches!(result, Err(FetchError::Cancelled { .. })));
    }

    #[tokio::test]
    async fn cached_payload_wins_without_network() {
        let fetcher = test_fetcher();
        fetcher.cache().insert("http://unused.invalid/y", "[4,5]");
        let fetched = fetcher
            .fetch_json::<Vec<u32>>("http://unused.invalid/y")
            .await
            .unwrap();
        assert_eq!(fetched.origin, Origin::Cache);
        assert_eq!(fetched.value, vec![4, 5]);
    }

    #[tokio::test]
    async fn drain_without_pending_work_finishes_immediately() {
        let fetcher = test_fetcher().with_revalidation(true);
        assert!(fetcher.drain(Duration::from_millis(10)).await);
        // The tracker reopens, so later refreshes are still tracked.
        assert!(!fetcher.tasks.is_closed());
    }

    #[tokio::test]
    async fn peek_cached_treats_garbage_as_miss() {
        let fetcher = test_fetcher();
        fetcher.cache().insert("http://unused.invalid/z", "not json");
        assert!(fetcher.peek_cached::<Vec<u32>>("http://unused.invalid/z").await.is_none());
        fetcher.cache().insert("http://unused.invalid/z", "[3]");
        assert_eq!(
            fetcher.peek_cached::<Vec<u32>>("http://unused.invalid/z").await,
            Some(vec![3])
        );
    }

    #[test]
    fn clone_shares_cache() {
        let fetcher = test_fetcher();
        let clone = fetcher.clone();
        clone.cache().insert("k", "{}");
        assert!(fetcher.cache().snapshot("k").is_some());
    }
}
