use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{DrawRecord, GameProfile};
use crate::value_objects::PeriodSelector;

#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// One request scoped to a month or a day. Failures of any kind are
    /// logged by the implementation and yield an empty list.
    async fn fetch(&self, profile: &GameProfile, selector: PeriodSelector) -> Vec<DrawRecord>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
