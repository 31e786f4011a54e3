use async_trait::async_trait;

use crate::entities::{DrawRecord, GameProfile};

/// Durable snapshot of one game's full record list.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Returns an empty list when no snapshot exists yet.
    async fn load(&self, profile: &GameProfile) -> anyhow::Result<Vec<DrawRecord>>;
    /// Replaces the whole snapshot. On error the previous snapshot is left intact.
    async fn save(&self, profile: &GameProfile, records: &[DrawRecord]) -> anyhow::Result<()>;
}
