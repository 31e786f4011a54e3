// Game identifier value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameId {
    SuperLotto,
    Lotto649,
    Daily539,
    BingoBingo,
}

impl GameId {
    pub const ALL: [GameId; 4] = [
        GameId::SuperLotto,
        GameId::Lotto649,
        GameId::Daily539,
        GameId::BingoBingo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::SuperLotto => "super_lotto",
            GameId::Lotto649 => "lotto_649",
            GameId::Daily539 => "daily_539",
            GameId::BingoBingo => "bingo_bingo",
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        GameId::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| DomainError::UnknownGame(s.trim().to_string()))
    }
}
