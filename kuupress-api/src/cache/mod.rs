mod memory_store;
mod noop_store;

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use memory_store::MemoryPageStore;
use noop_store::NoopPageStore;

use crate::error::ApiError;
use crate::model::LeaderboardPage;

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled(NoopPageStore),
    Memory(MemoryPageStore),
}

/// Short-lived cache of leaderboard pages keyed by page number, so rapid
/// pagination clicks do not hit the remote API repeatedly.
#[derive(Clone, Debug)]
pub struct PageCache {
    backend: CacheBackend,
}

impl PageCache {
    pub fn disabled() -> Self {
        Self {
            backend: CacheBackend::Disabled(NoopPageStore),
        }
    }

    /// A zero TTL yields a disabled cache.
    pub fn with_ttl(ttl: Duration) -> Self {
        if ttl.is_zero() {
            return Self::disabled();
        }

        Self {
            backend: CacheBackend::Memory(MemoryPageStore::new(ttl)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Memory(_))
    }

    pub async fn get(&self, page: u32) -> Option<LeaderboardPage> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.get(page).await,
            CacheBackend::Memory(store) => store.get(page).await,
        }
    }

    pub async fn set(&self, page: u32, value: LeaderboardPage) {
        match &self.backend {
            CacheBackend::Disabled(store) => store.set(page, value).await,
            CacheBackend::Memory(store) => store.set(page, value).await,
        }
    }

    /// Failed loads are returned as-is and never cached.
    pub async fn get_or_load<F, Fut>(&self, page: u32, loader: F) -> Result<LeaderboardPage, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<LeaderboardPage, ApiError>>,
    {
        if let Some(cached) = self.get(page).await {
            debug!(page, "leaderboard page served from cache");
            return Ok(cached);
        }

        let loaded = loader().await?;
        self.set(page, loaded.clone()).await;
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::PageCache;
    use crate::error::ApiError;
    use crate::model::{LeaderboardPage, PageMeta};

    fn page(current: u32) -> LeaderboardPage {
        LeaderboardPage {
            entries: Vec::new(),
            meta: PageMeta {
                current_page: Some(current),
                ..Default::default()
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn memory_cache_expires_after_ttl() {
        let cache = PageCache::with_ttl(Duration::from_secs(15));
        cache.set(2, page(2)).await;

        assert_eq!(cache.get(2).await, Some(page(2)));
        assert_eq!(cache.get(3).await, None);

        tokio::time::advance(Duration::from_secs(16)).await;
        assert_eq!(cache.get(2).await, None);
    }

    #[tokio::test]
    async fn zero_ttl_disables_cache() {
        let cache = PageCache::with_ttl(Duration::ZERO);
        assert!(!cache.is_enabled());

        cache.set(1, page(1)).await;
        assert_eq!(cache.get(1).await, None);
    }

    #[tokio::test]
    async fn get_or_load_only_loads_once() {
        let cache = PageCache::with_ttl(Duration::from_secs(30));
        let loads = AtomicUsize::new(0);

        for _ in 0..3 {
            let loaded = cache
                .get_or_load(1, || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(page(1))
                })
                .await
                .unwrap();
            assert_eq!(loaded, page(1));
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_loads_are_not_cached() {
        let cache = PageCache::with_ttl(Duration::from_secs(30));

        let failed = cache
            .get_or_load(1, || async {
                Err(ApiError::Remote {
                    status: 502,
                    status_text: "Bad Gateway".to_owned(),
                })
            })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.get(1).await, None);
    }
}
