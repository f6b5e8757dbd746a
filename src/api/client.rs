use crate::config::Config;
use crate::error::AppError;
use crate::source::MatchRecordSource;
use chrono::{Duration as ChronoDuration, Utc};
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::DefaultClock};
use indicatif::ProgressBar;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints;
use super::models::*;

const MAX_RETRIES: u32 = 3;
const MATCH_BATCH_SIZE: usize = 100;
const LOOKBACK_DAYS: i64 = 365;

pub struct RiotApiClient {
    api_key: String,
    region: String,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    show_progress: bool,
}

impl RiotApiClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let api_key = config.require_api_key()?.to_string();
        // 20 requests per second application limit
        let quota = Quota::per_second(NonZeroU32::MIN.saturating_add(19));
        Ok(RiotApiClient {
            api_key,
            region: config.region.clone(),
            rate_limiter: RateLimiter::direct(quota),
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn wait_for_quota(&self) {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_quota();

            let response = ureq::get(url)
                .set("User-Agent", "rift_recap/0.1.0")
                .set("X-Riot-Token", &self.api_key)
                .call();

            match response {
                Ok(resp) => {
                    return resp.into_string().map_err(|e| {
                        AppError::HttpError(e.to_string())
                    });
                }
                Err(ureq::Error::Status(429, resp)) => {
                    // Rate limited - wait and retry
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_secs = resp
                        .header("Retry-After")
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(2 * (retry_count as u64 + 1));
                    log::warn!("Rate limited, waiting {}s before retry...", wait_secs);
                    thread::sleep(Duration::from_secs(wait_secs));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(404, _)) => {
                    return Err(AppError::PlayerNotFound(url.to_string()));
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::ApiError(format!("status {} for {}", code, url)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let body = self.execute_request(url)?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(e.to_string())
        })
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        self.get_json(&endpoints::account_url(game_name, tag_line))
            .map_err(|e| match e {
                AppError::JsonError(_) | AppError::PlayerNotFound(_) => {
                    AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))
                }
                other => other,
            })
    }

    pub fn get_summoner(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        self.get_json(&endpoints::summoner_url(&self.region, puuid))
    }

    /// Ranked solo queue tier (`GOLD`, `MASTER`, ...), if the player is placed.
    pub fn get_solo_tier(&self, puuid: &str) -> Result<Option<String>, AppError> {
        let entries: Vec<LeagueEntryDto> =
            self.get_json(&endpoints::league_entries_url(&self.region, puuid))?;
        Ok(entries
            .into_iter()
            .find(|e| e.queue_type == RANKED_SOLO_QUEUE)
            .map(|e| e.tier))
    }

    pub fn get_match_ids(
        &self,
        puuid: &str,
        start: usize,
        count: usize,
        start_time: i64,
    ) -> Result<Vec<String>, AppError> {
        self.get_json(&endpoints::match_ids_url(&self.region, puuid, start, count, start_time))
    }

    pub fn get_match(&self, match_id: &str) -> Result<Value, AppError> {
        self.get_json(&endpoints::match_url(&self.region, match_id))
    }

    /// Every match id of the past year, newest first.
    pub fn get_season_match_ids(&self, puuid: &str) -> Result<Vec<String>, AppError> {
        let start_time = (Utc::now() - ChronoDuration::days(LOOKBACK_DAYS)).timestamp();
        let mut ids = Vec::new();
        let mut start = 0;

        loop {
            let batch = self.get_match_ids(puuid, start, MATCH_BATCH_SIZE, start_time)?;
            let batch_len = batch.len();
            log::debug!("Fetched {} match ids at offset {}", batch_len, start);
            ids.extend(batch);

            if batch_len < MATCH_BATCH_SIZE {
                break;
            }
            start += MATCH_BATCH_SIZE;
        }

        Ok(ids)
    }
}

impl MatchRecordSource for RiotApiClient {
    fn fetch_matches(&self, puuid: &str) -> Result<Vec<Value>, AppError> {
        let match_ids = self.get_season_match_ids(puuid)?;
        if match_ids.is_empty() {
            return Err(AppError::NoMatches);
        }

        let pb = if self.show_progress {
            ProgressBar::new(match_ids.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_message("Fetching match details");

        let mut matches = Vec::with_capacity(match_ids.len());
        for match_id in &match_ids {
            match self.get_match(match_id) {
                Ok(raw) => matches.push(raw),
                Err(AppError::RateLimited) => return Err(AppError::RateLimited),
                Err(e) => log::warn!("Skipping match {}: {}", match_id, e),
            }
            pb.inc(1);
        }
        pb.finish_with_message("✓ Match data fetched");

        Ok(matches)
    }
}

/// Splits `GameName#TAG`.
pub fn parse_riot_id(riot_id: &str) -> Result<(String, String), AppError> {
    let (name, tag) = riot_id.split_once('#').ok_or(AppError::InvalidRiotId)?;
    let (name, tag) = (name.trim(), tag.trim());
    if name.is_empty() || tag.is_empty() {
        return Err(AppError::InvalidRiotId);
    }
    Ok((name.to_string(), tag.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_riot_id() {
        assert_eq!(
            parse_riot_id("Doublelift#NA1").unwrap(),
            ("Doublelift".to_string(), "NA1".to_string())
        );
        assert_eq!(
            parse_riot_id("Some Name#EUW#2").unwrap(),
            ("Some Name".to_string(), "EUW#2".to_string())
        );
    }

    #[test]
    fn rejects_bad_riot_id() {
        assert!(matches!(parse_riot_id("Doublelift"), Err(AppError::InvalidRiotId)));
        assert!(matches!(parse_riot_id("#NA1"), Err(AppError::InvalidRiotId)));
        assert!(matches!(parse_riot_id("Name# "), Err(AppError::InvalidRiotId)));
    }
}
