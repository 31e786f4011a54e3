use std::sync::Arc;

use lottery_domain::{
    DrawRecord, FrequencyIndex, GameProfile, RecordStore, SnapshotRepository,
};
use tracing::{error, info, info_span, warn, Instrument, Span};

/// One game's draws, their frequency index and the snapshot they persist to.
///
/// The index is recomputed by [`GameHistory::finalize`]; between a merge and
/// the next finalize it describes the previous contents.
pub struct GameHistory {
    profile: GameProfile,
    store: RecordStore,
    frequency: FrequencyIndex,
    repo: Arc<dyn SnapshotRepository>,
    span: Span,
}

impl GameHistory {
    /// Loads the persisted snapshot. A missing or unreadable snapshot yields
    /// an empty history; the failure is logged, never returned.
    pub async fn open(profile: GameProfile, repo: Arc<dyn SnapshotRepository>) -> Self {
        let span = info_span!("history", game = %profile.id);
        let store = match repo.load(&profile).instrument(span.clone()).await {
            Ok(records) => {
                let mut store = RecordStore::from_records(records);
                store.sort_descending();
                store
            }
            Err(err) => {
                span.in_scope(|| warn!("snapshot load failed, starting empty: {:#}", err));
                RecordStore::new()
            }
        };
        let frequency = FrequencyIndex::compute(&profile, store.records());
        span.in_scope(|| info!("loaded {} draws", store.len()));
        Self {
            profile,
            store,
            frequency,
            repo,
            span,
        }
    }

    pub fn merge(&mut self, candidates: Vec<DrawRecord>) -> usize {
        self.store.merge(candidates)
    }

    /// Sorts newest first and caps the store at `limit` records.
    pub fn retain_newest(&mut self, limit: usize) -> usize {
        self.store.sort_descending();
        self.store.truncate(limit)
    }

    /// Sorts, writes the full snapshot and recomputes the frequency index.
    /// Returns whether the snapshot was written.
    pub async fn finalize(&mut self) -> bool {
        self.store.sort_descending();
        let saved = match self.save().await {
            Ok(()) => true,
            Err(err) => {
                error!("snapshot save failed: {:#}", err);
                false
            }
        };
        self.frequency = FrequencyIndex::compute(&self.profile, self.store.records());
        saved
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        self.repo.save(&self.profile, self.store.records()).await
    }

    pub fn profile(&self) -> &GameProfile {
        &self.profile
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &[DrawRecord] {
        self.store.records()
    }

    pub fn frequency(&self) -> &FrequencyIndex {
        &self.frequency
    }

    pub fn latest_period(&self) -> Option<&str> {
        self.store.latest().map(|record| record.period.as_str())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
