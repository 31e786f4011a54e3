use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;

use lottery_application::SyncSettings;
use lottery_domain::{parse_year_month, GameId, GameProfile, DEFAULT_DRAWS_PER_DAY};

use crate::config::validation::{validate_endpoint_url, validate_game_key};
use crate::utils::{normalize_key_list, parse_env_list, resolve_path};

pub const CONFIG_ENV: &str = "LOTTERY_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: String,
    pub request_timeout_seconds: u64,
    pub request_delay_millis: u64,
    pub user_agent: String,
    pub bingo_draws_per_day: u32,
    pub bingo_retention_days: u32,
    pub progress_buffer: usize,
    pub log_dir: Option<String>,
    pub enabled_games: Vec<String>,
    pub endpoint_overrides: BTreeMap<String, String>,
    /// Game key to `YYYY-MM`, the first month a backfill requests.
    pub start_month_overrides: BTreeMap<String, String>,
    /// The file the values were read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            request_timeout_seconds: 10,
            request_delay_millis: 100,
            user_agent: "Mozilla/5.0".to_string(),
            bingo_draws_per_day: DEFAULT_DRAWS_PER_DAY,
            bingo_retention_days: 5,
            progress_buffer: 64,
            log_dir: None,
            enabled_games: GameId::ALL
                .iter()
                .map(|game| game.as_str().to_string())
                .collect(),
            endpoint_overrides: BTreeMap::new(),
            start_month_overrides: BTreeMap::new(),
            source: None,
        }
    }
}

impl AppConfig {
    pub fn used_defaults(&self) -> bool {
        self.source.is_none()
    }

    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path).await
    }

    /// Reads `path` when it exists. A missing file is not an error: defaults
    /// are used and `source` stays `None`, so the caller can warn once its
    /// subscriber is installed.
    pub async fn load_from(path: &str) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            let mut config = toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", path, err))?;
            config.source = Some(path.to_string());
            config
        } else {
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        if self.user_agent.trim().is_empty() {
            self.user_agent = AppConfig::default().user_agent;
        }
        self.enabled_games = normalize_key_list(std::mem::take(&mut self.enabled_games));
        self.endpoint_overrides = normalize_overrides(std::mem::take(&mut self.endpoint_overrides));
        self.start_month_overrides =
            normalize_overrides(std::mem::take(&mut self.start_month_overrides));
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.progress_buffer == 0 {
            return Err(anyhow!("progress_buffer must be greater than 0"));
        }
        if self.bingo_draws_per_day == 0 || self.bingo_retention_days == 0 {
            return Err(anyhow!(
                "bingo_draws_per_day and bingo_retention_days must be greater than 0"
            ));
        }
        if self.enabled_games.is_empty() {
            return Err(anyhow!("enabled_games must name at least one game"));
        }
        for key in &self.enabled_games {
            validate_game_key(key)?;
        }
        for (key, url) in &self.endpoint_overrides {
            validate_game_key(key)?;
            validate_endpoint_url(url)?;
        }
        for (key, month) in &self.start_month_overrides {
            validate_game_key(key)?;
            parse_year_month(month)?;
        }
        Ok(())
    }

    pub fn to_sync_settings(&self) -> SyncSettings {
        SyncSettings {
            request_delay: Duration::from_millis(self.request_delay_millis),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Built-in profiles of the enabled games with endpoint overrides and the
    /// configured bingo window applied.
    pub fn profiles(&self) -> Result<Vec<GameProfile>> {
        let mut games = Vec::with_capacity(self.enabled_games.len());
        for key in &self.enabled_games {
            games.push(validate_game_key(key)?);
        }
        games.sort();
        games.dedup();

        let mut profiles = Vec::with_capacity(games.len());
        for game in games {
            let mut profile = GameProfile::builtin(game)
                .with_rolling_window(self.bingo_retention_days, self.bingo_draws_per_day)?;
            if let Some(url) = self.endpoint_overrides.get(game.as_str()) {
                profile = profile.with_endpoint(url.clone())?;
            }
            if let Some(month) = self.start_month_overrides.get(game.as_str()) {
                profile = profile.with_start_month(parse_year_month(month)?);
            }
            profiles.push(profile);
        }
        Ok(profiles)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("LOTTERY_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("LOTTERY_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("LOTTERY_REQUEST_DELAY_MILLIS") {
            self.request_delay_millis = value.parse().unwrap_or(self.request_delay_millis);
        }
        if let Ok(value) = env::var("LOTTERY_USER_AGENT") {
            self.user_agent = value;
        }
        if let Ok(value) = env::var("LOTTERY_BINGO_DRAWS_PER_DAY") {
            self.bingo_draws_per_day = value.parse().unwrap_or(self.bingo_draws_per_day);
        }
        if let Ok(value) = env::var("LOTTERY_BINGO_RETENTION_DAYS") {
            self.bingo_retention_days = value.parse().unwrap_or(self.bingo_retention_days);
        }
        if let Ok(value) = env::var("LOTTERY_PROGRESS_BUFFER") {
            self.progress_buffer = value.parse().unwrap_or(self.progress_buffer);
        }
        if let Ok(value) = env::var("LOTTERY_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Ok(value) = env::var("LOTTERY_ENABLED_GAMES") {
            self.enabled_games = parse_env_list(&value);
        }
    }
}

fn normalize_overrides(values: BTreeMap<String, String>) -> BTreeMap<String, String> {
    values
        .into_iter()
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
}
