// API endpoint definitions and URL builders

pub const ACCOUNT_ENDPOINT: &str = "https://americas.api.riotgames.com/riot/account/v1/accounts/by-riot-id";

/// Maps a platform id (na1, euw1, ...) to its Match-V5 regional cluster.
pub fn regional_routing(platform: &str) -> &'static str {
    match platform {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => "americas", // default
    }
}

pub fn account_url(game_name: &str, tag_line: &str) -> String {
    format!("{}/{}/{}", ACCOUNT_ENDPOINT, game_name, tag_line)
}

pub fn summoner_url(platform: &str, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/summoner/v4/summoners/by-puuid/{}",
        platform, puuid
    )
}

pub fn league_entries_url(platform: &str, puuid: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/league/v4/entries/by-puuid/{}",
        platform, puuid
    )
}

pub fn match_ids_url(
    platform: &str,
    puuid: &str,
    start: usize,
    count: usize,
    start_time: i64,
) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/by-puuid/{}/ids?start={}&count={}&startTime={}",
        regional_routing(platform),
        puuid,
        start,
        count,
        start_time
    )
}

pub fn match_url(platform: &str, match_id: &str) -> String {
    format!(
        "https://{}.api.riotgames.com/lol/match/v5/matches/{}",
        regional_routing(platform),
        match_id
    )
}
