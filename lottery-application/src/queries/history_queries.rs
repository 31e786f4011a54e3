use lottery_domain::{DrawRecord, FrequencyIndex, GameId, GameProfile, NumberCount};
use serde::Serialize;

use crate::{AppError, AppState};

#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game: GameId,
    pub name: String,
    pub draws: usize,
    pub latest_period: Option<String>,
}

pub async fn frequency_index(state: &AppState, game: GameId) -> Result<FrequencyIndex, AppError> {
    let history = state.history(game)?;
    let history = history.lock().await;
    Ok(history.frequency().clone())
}

/// Newest-first copy of at most `limit` draws.
pub async fn records(
    state: &AppState,
    game: GameId,
    limit: usize,
) -> Result<Vec<DrawRecord>, AppError> {
    let history = state.history(game)?;
    let history = history.lock().await;
    Ok(history.records().iter().take(limit).cloned().collect())
}

pub async fn latest_period(state: &AppState, game: GameId) -> Result<Option<String>, AppError> {
    let history = state.history(game)?;
    let history = history.lock().await;
    Ok(history.latest_period().map(str::to_string))
}

pub async fn hot_numbers(
    state: &AppState,
    game: GameId,
    top_n: usize,
) -> Result<Vec<NumberCount>, AppError> {
    if top_n == 0 {
        return Err(AppError::BadRequest("top_n must be at least 1".to_string()));
    }
    let history = state.history(game)?;
    let history = history.lock().await;
    Ok(history.frequency().top_primary(top_n).to_vec())
}

pub async fn profile(state: &AppState, game: GameId) -> Result<GameProfile, AppError> {
    let history = state.history(game)?;
    let history = history.lock().await;
    Ok(history.profile().clone())
}

pub async fn list_games(state: &AppState) -> Vec<GameSummary> {
    let mut list = Vec::new();
    for (game, history) in state.histories.iter() {
        let history = history.lock().await;
        list.push(GameSummary {
            game: *game,
            name: history.profile().name.clone(),
            draws: history.len(),
            latest_period: history.latest_period().map(str::to_string),
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::testing::{day, draw, test_state, FakeFetcher, MemoryRepository};

    async fn seeded_state() -> AppState {
        let repo = Arc::new(MemoryRepository::with_records(vec![
            draw("113000002", "2024-01-05", &[1, 2, 3, 4, 5]),
            draw("113000001", "2024-01-02", &[1, 2, 6, 7, 8]),
        ]));
        test_state(
            GameProfile::builtin(GameId::Daily539),
            repo,
            Arc::new(FakeFetcher::new()),
            day(2024, 1, 6),
        )
        .await
    }

    #[tokio::test]
    async fn loaded_snapshot_is_indexed_on_open() {
        let state = seeded_state().await;
        let index = frequency_index(&state, GameId::Daily539).await.expect("index");
        assert_eq!(index.primary_total(), 10);
        assert_eq!(index.primary[0], NumberCount { number: 1, count: 2 });
        assert_eq!(
            latest_period(&state, GameId::Daily539).await.expect("latest"),
            Some("113000002".to_string())
        );
    }

    #[tokio::test]
    async fn records_are_limited_newest_first() {
        let state = seeded_state().await;
        let list = records(&state, GameId::Daily539, 1).await.expect("records");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].period, "113000002");
    }

    #[tokio::test]
    async fn hot_numbers_rejects_zero() {
        let state = seeded_state().await;
        assert!(matches!(
            hot_numbers(&state, GameId::Daily539, 0).await,
            Err(AppError::BadRequest(_))
        ));
        let top = hot_numbers(&state, GameId::Daily539, 2).await.expect("top");
        assert_eq!(top.iter().map(|entry| entry.number).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn list_games_summarises_each_history() {
        let state = seeded_state().await;
        let games = list_games(&state).await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].draws, 2);
    }
}
