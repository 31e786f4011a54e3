use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use lottery_domain::ports::{Clock, RemoteFetcher, SnapshotRepository};
use lottery_domain::{GameId, GameProfile};
use tokio::sync::Mutex;

use crate::{AppError, GameHistory, Metrics};

#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Pause between two consecutive remote requests of one sync.
    pub request_delay: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_millis(100),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: SyncSettings,
    pub fetcher: Arc<dyn RemoteFetcher>,
    pub clock: Arc<dyn Clock>,
    pub histories: Arc<BTreeMap<GameId, Arc<Mutex<GameHistory>>>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Opens one history per profile. Each history's mutex is held for a
    /// whole sync or import, so at most one writer touches a store.
    pub async fn open(
        settings: SyncSettings,
        profiles: Vec<GameProfile>,
        repo: Arc<dyn SnapshotRepository>,
        fetcher: Arc<dyn RemoteFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut histories = BTreeMap::new();
        for profile in profiles {
            let id = profile.id;
            let history = GameHistory::open(profile, repo.clone()).await;
            histories.insert(id, Arc::new(Mutex::new(history)));
        }
        Self {
            settings,
            fetcher,
            clock,
            histories: Arc::new(histories),
            metrics: Arc::new(Metrics::default()),
        }
    }

    pub fn history(&self, game: GameId) -> Result<Arc<Mutex<GameHistory>>, AppError> {
        self.histories
            .get(&game)
            .cloned()
            .ok_or(AppError::GameNotEnabled(game))
    }

    pub fn games(&self) -> Vec<GameId> {
        self.histories.keys().copied().collect()
    }
}
