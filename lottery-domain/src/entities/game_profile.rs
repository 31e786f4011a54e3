// Game profile entity
// Static description of one supported lottery variant

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DomainError;
use crate::utils::first_of_month;
use crate::value_objects::{Cadence, GameId, SpecialRule, DEFAULT_DRAWS_PER_DAY};

const API_BASE: &str = "https://api.taiwanlottery.com/TLCAPIWeB/Lottery";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberRange {
    pub lo: u32,
    pub hi: u32,
}

impl NumberRange {
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.lo..=self.hi).contains(&value)
    }

    pub fn size(&self) -> u32 {
        self.hi.saturating_sub(self.lo) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameProfile {
    pub id: GameId,
    pub name: String,
    pub endpoint: String,
    pub response_key: String,
    pub primary_range: NumberRange,
    pub special_range: Option<NumberRange>,
    pub special_label: Option<String>,
    pub select_count: u32,
    pub special_rule: SpecialRule,
    pub cadence: Cadence,
}

impl GameProfile {
    /// The built-in profile for `id`.
    pub fn builtin(id: GameId) -> Self {
        match id {
            GameId::SuperLotto => Self::periodic(
                id,
                "威力彩 (Super Lotto)",
                "SuperLotto638Result",
                "superLotto638Res",
                (2008, 1),
                NumberRange::new(1, 38),
                Some((NumberRange::new(1, 8), "第二區")),
                6,
            ),
            GameId::Lotto649 => Self::periodic(
                id,
                "大樂透 (Lotto 6/49)",
                "Lotto649Result",
                "lotto649Res",
                (2004, 1),
                NumberRange::new(1, 49),
                Some((NumberRange::new(1, 49), "特別號")),
                6,
            ),
            GameId::Daily539 => Self::periodic(
                id,
                "今彩539 (Daily 539)",
                "Daily539Result",
                "daily539Res",
                (2007, 1),
                NumberRange::new(1, 39),
                None,
                5,
            ),
            GameId::BingoBingo => Self {
                id,
                name: "賓果賓果 (Bingo Bingo)".to_string(),
                endpoint: format!("{}/BingoResult", API_BASE),
                response_key: "bingoQueryResult".to_string(),
                primary_range: NumberRange::new(1, 80),
                special_range: Some(NumberRange::new(1, 80)),
                special_label: Some("超級獎號".to_string()),
                select_count: 5,
                special_rule: SpecialRule::SeparateField,
                cadence: Cadence::RollingWindow {
                    retention_days: 5,
                    draws_per_day: DEFAULT_DRAWS_PER_DAY,
                },
            },
        }
    }

    pub fn registry() -> Vec<GameProfile> {
        GameId::ALL.into_iter().map(Self::builtin).collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn periodic(
        id: GameId,
        name: &str,
        path: &str,
        response_key: &str,
        (year, month): (i32, u32),
        primary_range: NumberRange,
        special: Option<(NumberRange, &str)>,
        select_count: u32,
    ) -> Self {
        let start_month = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
        Self {
            id,
            name: name.to_string(),
            endpoint: format!("{}/{}", API_BASE, path),
            response_key: response_key.to_string(),
            primary_range,
            special_range: special.map(|(range, _)| range),
            special_label: special.map(|(_, label)| label.to_string()),
            select_count,
            special_rule: if special.is_some() {
                SpecialRule::EmbeddedLast
            } else {
                SpecialRule::None
            },
            cadence: Cadence::PeriodicBackfill { start_month },
        }
    }

    pub fn has_special(&self) -> bool {
        self.special_rule.has_special()
    }

    pub fn snapshot_file_name(&self) -> String {
        format!("history_{}.json", self.id)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, DomainError> {
        self.endpoint = endpoint.into().trim().to_string();
        self.validate()?;
        Ok(self)
    }

    /// Moves the first backfilled month; rolling profiles are returned unchanged.
    pub fn with_start_month(mut self, month: NaiveDate) -> Self {
        if let Cadence::PeriodicBackfill { .. } = self.cadence {
            self.cadence = Cadence::PeriodicBackfill {
                start_month: first_of_month(month),
            };
        }
        self
    }

    /// Adjusts a rolling window; backfill profiles are returned unchanged.
    pub fn with_rolling_window(
        mut self,
        retention_days: u32,
        draws_per_day: u32,
    ) -> Result<Self, DomainError> {
        if self.cadence.is_rolling() {
            self.cadence = Cadence::RollingWindow {
                retention_days,
                draws_per_day,
            };
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProfile {
            game: self.id.to_string(),
            reason: reason.to_string(),
        };
        if self.endpoint.is_empty() {
            return Err(invalid("endpoint is empty"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(invalid("endpoint must be an http(s) url"));
        }
        if self.response_key.trim().is_empty() {
            return Err(invalid("response key is empty"));
        }
        check_range(&self.primary_range).map_err(|reason| invalid(&format!("primary {}", reason)))?;
        if let Some(range) = &self.special_range {
            check_range(range).map_err(|reason| invalid(&format!("special {}", reason)))?;
        }
        if self.select_count == 0 || self.select_count > self.primary_range.size() {
            return Err(invalid("select count outside primary range"));
        }
        if self.special_range.is_some() != self.has_special() {
            return Err(invalid("special range and special rule disagree"));
        }
        if let Cadence::RollingWindow {
            retention_days,
            draws_per_day,
        } = self.cadence
        {
            if retention_days == 0 || draws_per_day == 0 {
                return Err(invalid("rolling window needs non-zero days and daily volume"));
            }
        }
        Ok(())
    }
}

fn check_range(range: &NumberRange) -> Result<(), &'static str> {
    if range.lo == 0 {
        return Err("range must start at 1 or above");
    }
    if range.lo > range.hi {
        return Err("range is inverted");
    }
    Ok(())
}
