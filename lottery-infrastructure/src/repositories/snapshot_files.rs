use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use lottery_domain::{DrawRecord, GameProfile, SnapshotRepository};

/// One `history_<game>.json` file per game under a data directory.
pub struct JsonSnapshotRepository {
    dir: PathBuf,
}

impl JsonSnapshotRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self, profile: &GameProfile) -> PathBuf {
        self.dir.join(profile.snapshot_file_name())
    }
}

#[async_trait]
impl SnapshotRepository for JsonSnapshotRepository {
    async fn load(&self, profile: &GameProfile) -> anyhow::Result<Vec<DrawRecord>> {
        let path = self.snapshot_path(profile);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).await?;
        let records: Vec<DrawRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    async fn save(&self, profile: &GameProfile, records: &[DrawRecord]) -> anyhow::Result<()> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).await?;
        }
        let path = self.snapshot_path(profile);
        let content = serde_json::to_vec(records)?;
        let temp = self
            .dir
            .join(format!(".{}.{}.tmp", profile.snapshot_file_name(), Uuid::new_v4().simple()));
        fs::write(&temp, content).await?;
        if let Err(err) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err.into());
        }
        debug!(path = %path.display(), records = records.len(), "snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_domain::GameId;

    fn record(period: &str, numbers: &[u32], special: Option<u32>) -> DrawRecord {
        DrawRecord::new(period, "2024-01-02T00:00:00", numbers.to_vec(), special)
    }

    #[tokio::test]
    async fn missing_snapshot_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonSnapshotRepository::new(dir.path());
        let profile = GameProfile::builtin(GameId::Daily539);
        assert!(repo.load(&profile).await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_special() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonSnapshotRepository::new(dir.path().join("nested"));
        let profile = GameProfile::builtin(GameId::BingoBingo);
        let records = vec![
            record("113000002", &[1, 2, 3], Some(7)),
            record("113000001", &[4, 5, 6], None),
        ];
        repo.save(&profile, &records).await.expect("save");

        let path = repo.snapshot_path(&profile);
        assert!(path.ends_with("history_bingo_bingo.json"));
        assert_eq!(repo.load(&profile).await.expect("load"), records);

        let leftovers = std::fs::read_dir(repo.dir())
            .expect("read dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonSnapshotRepository::new(dir.path());
        let profile = GameProfile::builtin(GameId::Lotto649);
        std::fs::write(repo.snapshot_path(&profile), "{not json").expect("write");
        assert!(repo.load(&profile).await.is_err());
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = JsonSnapshotRepository::new(dir.path());
        let profile = GameProfile::builtin(GameId::Lotto649);
        let first = vec![record("113000001", &[1, 2, 3, 4, 5, 6, 7], Some(7))];
        repo.save(&profile, &first).await.expect("save");

        // A directory in place of the target makes the rename fail.
        let blocked = JsonSnapshotRepository::new(dir.path().join("blocked"));
        std::fs::create_dir_all(blocked.snapshot_path(&profile).join("inner")).expect("mkdir");
        assert!(blocked.save(&profile, &first).await.is_err());

        assert_eq!(repo.load(&profile).await.expect("load"), first);
    }
}
