// Draw record entity
// One historical draw, keyed by its period

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRecord {
    #[serde(deserialize_with = "deserialize_period")]
    pub period: String,
    #[serde(default, alias = "lotteryDate")]
    pub draw_date: String,
    #[serde(default, alias = "drawNumberSize")]
    pub numbers: Vec<u32>,
    #[serde(default, alias = "superPrizeNo", skip_serializing_if = "Option::is_none")]
    pub special_number: Option<u32>,
}

impl DrawRecord {
    pub fn new(
        period: impl Into<String>,
        draw_date: impl Into<String>,
        numbers: Vec<u32>,
        special_number: Option<u32>,
    ) -> Self {
        Self {
            period: period.into().trim().to_string(),
            draw_date: draw_date.into(),
            numbers,
            special_number,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPeriod {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl RawPeriod {
    fn into_key(self) -> String {
        match self {
            RawPeriod::Text(value) => value.trim().to_string(),
            RawPeriod::Unsigned(value) => value.to_string(),
            RawPeriod::Signed(value) => value.to_string(),
        }
    }
}

/// Periods are compared as text; numeric periods from older snapshots or
/// upstream payloads are converted to their decimal form.
pub fn deserialize_period<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawPeriod::deserialize(deserializer).map(RawPeriod::into_key)
}
