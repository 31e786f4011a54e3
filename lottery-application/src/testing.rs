// Fakes shared by the application tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use lottery_domain::ports::{Clock, RemoteFetcher, SnapshotRepository};
use lottery_domain::{DrawRecord, GameProfile, PeriodSelector};

use crate::{AppState, SyncSettings};

pub fn draw(period: &str, date: &str, numbers: &[u32]) -> DrawRecord {
    DrawRecord::new(period, date, numbers.to_vec(), None)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

#[derive(Default)]
pub struct MemoryRepository {
    initial: Vec<DrawRecord>,
    saved: Mutex<Vec<DrawRecord>>,
    fail_load: bool,
    fail_save: bool,
}

impl MemoryRepository {
    pub fn with_records(initial: Vec<DrawRecord>) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<DrawRecord> {
        self.saved.lock().expect("saved lock").clone()
    }
}

#[async_trait]
impl SnapshotRepository for MemoryRepository {
    async fn load(&self, _profile: &GameProfile) -> anyhow::Result<Vec<DrawRecord>> {
        if self.fail_load {
            return Err(anyhow!("corrupt snapshot"));
        }
        Ok(self.initial.clone())
    }

    async fn save(&self, _profile: &GameProfile, records: &[DrawRecord]) -> anyhow::Result<()> {
        if self.fail_save {
            return Err(anyhow!("disk full"));
        }
        *self.saved.lock().expect("saved lock") = records.to_vec();
        Ok(())
    }
}

/// Answers each selector label from a canned map and records every call.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Vec<DrawRecord>>,
    calls: Mutex<Vec<PeriodSelector>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, label: &str, records: Vec<DrawRecord>) -> Self {
        self.responses.insert(label.to_string(), records);
        self
    }

    pub fn calls(&self) -> Vec<PeriodSelector> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn call_labels(&self) -> Vec<String> {
        self.calls().iter().map(PeriodSelector::label).collect()
    }
}

#[async_trait]
impl RemoteFetcher for FakeFetcher {
    async fn fetch(&self, _profile: &GameProfile, selector: PeriodSelector) -> Vec<DrawRecord> {
        self.calls.lock().expect("calls lock").push(selector);
        self.responses
            .get(&selector.label())
            .cloned()
            .unwrap_or_default()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub async fn test_state(
    profile: GameProfile,
    repo: Arc<MemoryRepository>,
    fetcher: Arc<FakeFetcher>,
    today: NaiveDate,
) -> AppState {
    AppState::open(
        SyncSettings {
            request_delay: Duration::ZERO,
        },
        vec![profile],
        repo,
        fetcher,
        Arc::new(FixedClock(today)),
    )
    .await
}
