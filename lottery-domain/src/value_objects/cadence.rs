// Fetch cadence value object

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Approximate upper bound on Bingo Bingo draws issued per day.
pub const DEFAULT_DRAWS_PER_DAY: u32 = 210;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    /// Month-by-month walk from `start_month` (always the first day of a month).
    PeriodicBackfill { start_month: NaiveDate },
    /// Day-by-day walk over the last `retention_days`, trimmed afterwards.
    RollingWindow {
        retention_days: u32,
        draws_per_day: u32,
    },
}

impl Cadence {
    pub fn is_rolling(&self) -> bool {
        matches!(self, Cadence::RollingWindow { .. })
    }

    /// Maximum number of records a rolling-window store may keep.
    pub fn retention_limit(&self) -> Option<usize> {
        match self {
            Cadence::PeriodicBackfill { .. } => None,
            Cadence::RollingWindow {
                retention_days,
                draws_per_day,
            } => Some(*retention_days as usize * *draws_per_day as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_limit_multiplies_days_by_daily_volume() {
        let cadence = Cadence::RollingWindow {
            retention_days: 5,
            draws_per_day: DEFAULT_DRAWS_PER_DAY,
        };
        assert_eq!(cadence.retention_limit(), Some(1050));
        let backfill = Cadence::PeriodicBackfill {
            start_month: NaiveDate::from_ymd_opt(2008, 1, 1).expect("date"),
        };
        assert_eq!(backfill.retention_limit(), None);
    }
}
