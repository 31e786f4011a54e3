use lottery_domain::{DomainError, GameId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("game not enabled: {0}")]
    GameNotEnabled(GameId),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
