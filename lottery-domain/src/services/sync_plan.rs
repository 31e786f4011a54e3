use chrono::{Days, NaiveDate};

use crate::entities::{GameProfile, RecordStore};
use crate::utils::{first_of_month, next_month};
use crate::value_objects::{Cadence, PeriodSelector};

/// The ordered list of requests one synchronization will issue, plus the
/// record cap applied before the final save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub selectors: Vec<PeriodSelector>,
    pub retention_limit: Option<usize>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }
}

pub fn plan_sync(profile: &GameProfile, store: &RecordStore, today: NaiveDate) -> SyncPlan {
    match profile.cadence {
        Cadence::PeriodicBackfill { start_month } => {
            let start = backfill_start(start_month, store.latest_draw_date());
            SyncPlan {
                selectors: month_walk(start, today),
                retention_limit: None,
            }
        }
        Cadence::RollingWindow { retention_days, .. } => SyncPlan {
            selectors: day_walk(today, retention_days),
            retention_limit: profile.cadence.retention_limit(),
        },
    }
}

/// The day after the newest stored draw, or the profile's first month.
pub fn backfill_start(start_month: NaiveDate, latest: Option<NaiveDate>) -> NaiveDate {
    latest
        .and_then(|day| day.checked_add_days(Days::new(1)))
        .unwrap_or(start_month)
}

/// Every month from `start`'s month through `today`'s month, inclusive.
/// Empty when `start` lies after `today`.
pub fn month_walk(start: NaiveDate, today: NaiveDate) -> Vec<PeriodSelector> {
    if start > today {
        return Vec::new();
    }
    let last = first_of_month(today);
    let mut cursor = first_of_month(start);
    let mut selectors = Vec::new();
    while cursor <= last {
        selectors.push(PeriodSelector::Month(cursor));
        cursor = next_month(cursor);
    }
    selectors
}

/// `today`, yesterday, ... for `days` days, newest first.
pub fn day_walk(today: NaiveDate, days: u32) -> Vec<PeriodSelector> {
    (0..days)
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(PeriodSelector::Date)
        .collect()
}
