// Lottery History Application Layer

pub mod commands;
pub mod error;
pub mod history;
pub mod metrics;
pub mod progress;
pub mod queries;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AppError;
pub use history::GameHistory;
pub use metrics::Metrics;
pub use progress::{ProgressSink, SyncProgress};
pub use state::{AppState, SyncSettings};
