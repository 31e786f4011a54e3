use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use lottery_domain::{deserialize_period, DrawRecord, GameProfile, PeriodSelector, RemoteFetcher};

/// Fetches draw results from the official results API, one month or one day per request.
pub struct HttpRemoteFetcher {
    client: Client,
}

impl HttpRemoteFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    async fn request(&self, profile: &GameProfile, selector: PeriodSelector) -> Result<Value> {
        let (key, value) = selector.query_pair();
        let response = self
            .client
            .get(&profile.endpoint)
            .query(&[(key, value)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("{} responded {}", profile.endpoint, status));
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch(&self, profile: &GameProfile, selector: PeriodSelector) -> Vec<DrawRecord> {
        match self.request(profile, selector).await {
            Ok(body) => extract_draws(profile, &body),
            Err(err) => {
                warn!(game = %profile.id, selector = %selector, "fetch failed: {}", err);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteDraw {
    #[serde(deserialize_with = "deserialize_period")]
    period: String,
    #[serde(default, alias = "drawDate")]
    lottery_date: String,
    #[serde(default)]
    draw_number_size: Vec<u32>,
    #[serde(default)]
    super_prize_no: Option<Value>,
}

/// Pulls the draw list out of a response body. `content` may be the list
/// itself or an object holding it under the game's response key; any other
/// shape yields no records.
pub fn extract_draws(profile: &GameProfile, body: &Value) -> Vec<DrawRecord> {
    let items = match body.get("content") {
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => match map.get(&profile.response_key) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match RemoteDraw::deserialize(item) {
            Ok(draw) => Some(draw),
            Err(err) => {
                debug!(game = %profile.id, "skipping malformed draw: {}", err);
                None
            }
        })
        .filter(|draw| !draw.period.trim().is_empty())
        .map(|draw| {
            let separate = draw.super_prize_no.as_ref().and_then(as_number);
            let special = profile.special_rule.resolve(&draw.draw_number_size, separate);
            DrawRecord::new(draw.period, draw.lottery_date, draw.draw_number_size, special)
        })
        .collect()
}

fn as_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
