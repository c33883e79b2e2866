use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::model::LeaderboardPage;

#[derive(Clone, Debug)]
struct CachedPage {
    expires_at: Instant,
    value: LeaderboardPage,
}

#[derive(Clone, Debug)]
pub struct MemoryPageStore {
    ttl: Duration,
    pages: Arc<RwLock<HashMap<u32, CachedPage>>>,
}

impl MemoryPageStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pages: Default::default(),
        }
    }

    pub async fn get(&self, page: u32) -> Option<LeaderboardPage> {
        let pages = self.pages.read().await;
        pages
            .get(&page)
            .filter(|cached| cached.expires_at > Instant::now())
            .map(|cached| cached.value.clone())
    }

    pub async fn set(&self, page: u32, value: LeaderboardPage) {
        let now = Instant::now();
        let mut pages = self.pages.write().await;
        pages.retain(|_, cached| cached.expires_at > now);
        pages.insert(
            page,
            CachedPage {
                expires_at: now + self.ttl,
                value,
            },
        );
    }
}
