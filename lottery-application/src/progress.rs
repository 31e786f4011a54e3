use std::fmt;

use lottery_domain::GameId;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

/// Progress of a running synchronization, one event per time unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncProgress {
    Started {
        game: GameId,
        units: usize,
    },
    Fetching {
        game: GameId,
        label: String,
        index: usize,
        total: usize,
    },
    Merged {
        game: GameId,
        label: String,
        added: usize,
    },
    Finished {
        game: GameId,
        total_records: usize,
    },
}

impl fmt::Display for SyncProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncProgress::Started { game, units } => {
                write!(f, "[{}] syncing {} time units", game, units)
            }
            SyncProgress::Fetching {
                game,
                label,
                index,
                total,
            } => write!(f, "[{}] downloading {} ({}/{})", game, label, index + 1, total),
            SyncProgress::Merged { game, label, added } => {
                write!(f, "[{}] {}: {} new draws", game, label, added)
            }
            SyncProgress::Finished {
                game,
                total_records,
            } => write!(f, "[{}] done, {} draws stored", game, total_records),
        }
    }
}

/// Sending half of the progress channel. Never blocks the synchronizer: a
/// full or closed channel drops the event.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<mpsc::Sender<SyncProgress>>,
}

impl ProgressSink {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SyncProgress>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx: Some(tx) }, rx)
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn send(&self, event: SyncProgress) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => debug!("progress channel full, dropped: {}", event),
            Err(TrySendError::Closed(_)) => {}
        }
    }
}
