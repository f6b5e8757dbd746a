use serde::{Deserialize, Serialize};

// Account V1 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: String,
    #[serde(default)]
    pub tag_line: String,
}

// Summoner V4 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub puuid: String,
    pub summoner_level: i64,
    #[serde(default)]
    pub profile_icon_id: i64,
}

// League V4 response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub league_points: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
}

pub const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

// Match V5 response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchDto {
    #[serde(default)]
    pub metadata: Option<MatchMetadata>,
    pub info: MatchInfo,
}

impl MatchDto {
    pub fn match_id(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.match_id.as_str())
            .unwrap_or("<unknown>")
    }

    pub fn participant(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub match_id: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Seconds.
    pub game_duration: u64,
    /// Epoch milliseconds.
    pub game_creation: i64,
    pub participants: Vec<ParticipantDto>,
}

/// One player's end-of-match totals. Counts are unsigned, so a negative
/// value in the payload is rejected as malformed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_name: String,
    pub team_id: i32,
    pub win: bool,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub gold_earned: u64,
    pub total_damage_dealt_to_champions: u64,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,

    #[serde(default)]
    pub vision_score: u32,
    #[serde(default)]
    pub wards_placed: u32,
    #[serde(default)]
    pub wards_killed: u32,
    #[serde(default)]
    pub detector_wards_placed: u32,

    #[serde(default)]
    pub dragon_kills: u32,
    #[serde(default)]
    pub baron_kills: u32,
    #[serde(default)]
    pub turret_kills: u32,
    #[serde(default)]
    pub inhibitor_kills: u32,
    #[serde(default)]
    pub turret_takedowns: u32,
    #[serde(default)]
    pub inhibitor_takedowns: u32,

    #[serde(default)]
    pub penta_kills: u32,
    #[serde(default)]
    pub quadra_kills: u32,
    #[serde(default)]
    pub first_blood_kill: bool,

    #[serde(default)]
    pub team_position: String, // TOP, JUNGLE, MIDDLE, BOTTOM, UTILITY or ""

    #[serde(default)]
    pub challenges: Option<ChallengesDto>,
}

impl ParticipantDto {
    /// Widened so that two maxed counters cannot overflow.
    pub fn creep_score(&self) -> u64 {
        self.total_minions_killed as u64 + self.neutral_minions_killed as u64
    }

    pub fn solo_kills(&self) -> u32 {
        self.challenges.as_ref().map(|c| c.solo_kills).unwrap_or(0)
    }

    pub fn dragon_takedowns(&self) -> u32 {
        self.challenges
            .as_ref()
            .map(|c| c.dragon_takedowns)
            .unwrap_or(self.dragon_kills)
    }

    pub fn baron_takedowns(&self) -> u32 {
        self.challenges
            .as_ref()
            .map(|c| c.baron_takedowns)
            .unwrap_or(self.baron_kills)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengesDto {
    #[serde(default)]
    pub solo_kills: u32,
    #[serde(default)]
    pub dragon_takedowns: u32,
    #[serde(default)]
    pub baron_takedowns: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_default() {
        let raw = json!({
            "info": {
                "gameDuration": 1800,
                "gameCreation": 1_700_000_000_000i64,
                "participants": [{
                    "puuid": "p1", "championName": "Ahri", "teamId": 100, "win": true,
                    "kills": 3, "deaths": 1, "assists": 7, "goldEarned": 11000,
                    "totalDamageDealtToChampions": 21000,
                    "totalMinionsKilled": 190, "neutralMinionsKilled": 12
                }]
            }
        });
        let m: MatchDto = serde_json::from_value(raw).unwrap();
        let p = m.participant("p1").unwrap();
        assert_eq!(p.creep_score(), 202);
        assert_eq!(p.vision_score, 0);
        assert_eq!(p.solo_kills(), 0);
        assert_eq!(p.team_position, "");
        assert_eq!(m.match_id(), "<unknown>");
    }

    #[test]
    fn negative_count_is_rejected() {
        let raw = json!({
            "info": {
                "gameDuration": 1800,
                "gameCreation": 0,
                "participants": [{
                    "puuid": "p1", "championName": "Ahri", "teamId": 100, "win": true,
                    "kills": -1, "deaths": 1, "assists": 7, "goldEarned": 11000,
                    "totalDamageDealtToChampions": 21000,
                    "totalMinionsKilled": 190, "neutralMinionsKilled": 12
                }]
            }
        });
        assert!(serde_json::from_value::<MatchDto>(raw).is_err());
    }

    #[test]
    fn takedowns_fall_back_to_kills_without_challenges() {
        let raw = json!({
            "puuid": "p1", "championName": "LeeSin", "teamId": 200, "win": false,
            "kills": 0, "deaths": 0, "assists": 0, "goldEarned": 0,
            "totalDamageDealtToChampions": 0,
            "totalMinionsKilled": 0, "neutralMinionsKilled": 0,
            "dragonKills": 2, "baronKills": 1
        });
        let p: ParticipantDto = serde_json::from_value(raw).unwrap();
        assert_eq!(p.dragon_takedowns(), 2);
        assert_eq!(p.baron_takedowns(), 1);
    }
}
