use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("unknown game: {0}")]
    UnknownGame(String),
    #[error("invalid profile for {game}: {reason}")]
    InvalidProfile { game: String, reason: String },
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}
