use anyhow::{anyhow, Result};
use reqwest::Url;

use lottery_domain::GameId;

pub fn validate_endpoint_url(value: &str) -> Result<()> {
    let url = Url::parse(value.trim()).map_err(|err| anyhow!("invalid endpoint '{}': {}", value, err))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("endpoint '{}' must use http or https", value));
    }
    Ok(())
}

pub fn validate_game_key(value: &str) -> Result<GameId> {
    value
        .parse::<GameId>()
        .map_err(|err| anyhow!("{}", err))
}
