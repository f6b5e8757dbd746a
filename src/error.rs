use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Invalid Riot ID format. Use format: Name#TAG")]
    InvalidRiotId,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No matches found for this player")]
    NoMatches,

    /// The match does not contain the player being analyzed.
    #[error("Match {match_id} has no participant for the requested player")]
    MissingParticipant { match_id: String },

    /// A required field is missing or has the wrong type.
    #[error("Malformed match record #{index}: {reason}")]
    MalformedMatch { index: usize, reason: String },

    #[error("Insight backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl AppError {
    /// Errors a single match can raise during aggregation. These never abort a run.
    pub fn is_per_match(&self) -> bool {
        matches!(
            self,
            AppError::MissingParticipant { .. } | AppError::MalformedMatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_match_level_errors_are_per_match() {
        let missing = AppError::MissingParticipant {
            match_id: "NA1_1".to_string(),
        };
        let malformed = AppError::MalformedMatch {
            index: 0,
            reason: "missing field `info`".to_string(),
        };
        assert!(missing.is_per_match());
        assert!(malformed.is_per_match());
        assert!(!AppError::RateLimited.is_per_match());
        assert!(!AppError::BackendUnavailable("down".to_string()).is_per_match());
    }
}
