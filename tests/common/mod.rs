#![allow(dead_code)]

use serde_json::{json, Value};

pub const PLAYER: &str = "player-puuid";

pub fn participant(puuid: &str, champion: &str, win: bool, kda: (u32, u32, u32)) -> Value {
    json!({
        "puuid": puuid,
        "championName": champion,
        "teamId": 100,
        "win": win,
        "kills": kda.0,
        "deaths": kda.1,
        "assists": kda.2,
        "goldEarned": 11000,
        "totalDamageDealtToChampions": 18000,
        "totalMinionsKilled": 170,
        "neutralMinionsKilled": 10,
        "visionScore": 20,
        "wardsPlaced": 9,
        "wardsKilled": 2,
        "detectorWardsPlaced": 1,
        "teamPosition": "MIDDLE"
    })
}

pub fn match_record(
    id: &str,
    duration_secs: u64,
    created_ms: i64,
    participants: Vec<Value>,
) -> Value {
    json!({
        "metadata": { "matchId": id },
        "info": {
            "gameDuration": duration_secs,
            "gameCreation": created_ms,
            "participants": participants
        }
    })
}

/// Three 30-minute mid games: Ahri win, Ahri loss, Zed win.
pub fn three_match_season() -> Vec<Value> {
    vec![
        match_record(
            "NA1_1",
            1800,
            1_704_067_200_000,
            vec![participant(PLAYER, "Ahri", true, (5, 2, 3))],
        ),
        match_record(
            "NA1_2",
            1800,
            1_706_745_600_000,
            vec![participant(PLAYER, "Ahri", false, (1, 4, 0))],
        ),
        match_record(
            "NA1_3",
            1800,
            1_706_832_000_000,
            vec![participant(PLAYER, "Zed", true, (10, 1, 8))],
        ),
    ]
}
