use crate::error::AppError;
use std::env;

pub const DEFAULT_INSIGHT_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub region: String,
    pub insight: InsightConfig,
}

/// Settings for the narrative generation backend.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: u32,
}

impl InsightConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some() && self.model.is_some()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = non_empty_var("RIOT_API_KEY");
        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "na1".to_string());

        let max_tokens = match non_empty_var("INSIGHT_MAX_TOKENS") {
            Some(raw) => parse_max_tokens(&raw)?,
            None => DEFAULT_MAX_TOKENS,
        };

        let insight = InsightConfig {
            url: non_empty_var("INSIGHT_API_URL")
                .unwrap_or_else(|| DEFAULT_INSIGHT_URL.to_string()),
            api_key: non_empty_var("INSIGHT_API_KEY"),
            model: non_empty_var("INSIGHT_MODEL"),
            max_tokens,
        };

        Ok(Config {
            api_key,
            region,
            insight,
        })
    }

    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::ConfigError("RIOT_API_KEY not found in .env file".to_string())
        })
    }
}

fn parse_max_tokens(raw: &str) -> Result<u32, AppError> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::ConfigError(format!(
            "INSIGHT_MAX_TOKENS must be a positive integer, got '{}'",
            raw
        ))),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
