use crate::model::LeaderboardPage;

#[derive(Clone, Debug, Default)]
pub struct NoopPageStore;

impl NoopPageStore {
    pub async fn get(&self, _page: u32) -> Option<LeaderboardPage> {
        None
    }

    pub async fn set(&self, _page: u32, _value: LeaderboardPage) {}
}
