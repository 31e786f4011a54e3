use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use lottery_application::AppState;
use lottery_infrastructure::{AppConfig, HttpRemoteFetcher, JsonSnapshotRepository, SystemClock};

pub struct AppContext {
    pub config: AppConfig,
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let profiles = config.profiles()?;
        let repo = Arc::new(JsonSnapshotRepository::new(&config.data_dir));
        let fetcher = Arc::new(HttpRemoteFetcher::new(
            config.request_timeout(),
            &config.user_agent,
        )?);

        let state = AppState::open(
            config.to_sync_settings(),
            profiles,
            repo,
            fetcher,
            Arc::new(SystemClock),
        )
        .await;
        info!(
            data_dir = %config.data_dir,
            games = state.games().len(),
            "histories loaded"
        );

        Ok(Self { config, state })
    }
}
