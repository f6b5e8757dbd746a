use super::champion_stats::{BestChampion, ChampionPool};
use super::role::{ChampionRoleHints, Role, RoleTally};
use crate::api::models::{MatchDto, ParticipantDto};
use crate::error::AppError;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Minimum games on a champion before it can be the best champion.
pub const BEST_CHAMPION_MIN_GAMES: usize = 5;

/// Games shorter than this produce no CS-at-10 estimate.
pub const CS_AT_10_MIN_DURATION_SECS: u64 = 600;

/// Assumed kills per team per game behind the kill participation estimate.
pub const ESTIMATED_TEAM_KILLS_PER_GAME: f64 = 25.0;

/// `num / den`, or 0 when the denominator is zero.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Running mean over the matches that produced a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SampleMean {
    pub sum: f64,
    pub samples: usize,
}

impl SampleMean {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.samples += 1;
    }

    pub fn mean(&self) -> f64 {
        ratio(self.sum, self.samples as f64)
    }

    pub fn has_samples(&self) -> bool {
        self.samples > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ObjectiveTotals {
    pub dragon_kills: u64,
    pub baron_kills: u64,
    pub turret_kills: u64,
    pub inhibitor_kills: u64,
    pub dragon_takedowns: u64,
    pub baron_takedowns: u64,
    pub turret_takedowns: u64,
    pub inhibitor_takedowns: u64,
}

/// Rates derived once after the fold. Every field is 0 when its
/// denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeasonRates {
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    /// Percentage.
    pub win_rate: f64,
    /// `(avg_kills + avg_assists) / avg_deaths`, or the numerator alone when
    /// the player never died.
    pub kda_ratio: f64,
    pub gold_per_min: f64,
    pub damage_per_min: f64,
    pub cs_per_min: f64,
    pub avg_cs: f64,
    pub avg_vision_score: f64,
    pub vision_per_min: f64,
    pub avg_wards_placed: f64,
    pub avg_wards_killed: f64,
    pub avg_control_wards: f64,
    pub avg_dragons: f64,
    pub avg_barons: f64,
    pub avg_turrets: f64,
    pub avg_inhibitors: f64,
    /// Percentage of team champion damage, over matches with a non-zero team total.
    pub avg_damage_share: f64,
    /// Percentage of team gold, over matches with a non-zero team total.
    pub avg_gold_share: f64,
    /// Estimate only: end-of-game CS rate scaled to ten minutes.
    pub avg_cs_at_10: f64,
    /// Estimate only: assumes 25 team kills per game.
    pub avg_kill_participation: f64,
    /// Seconds.
    pub avg_game_duration: f64,
}

/// One player's season, built by a single pass over the match collection.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSeasonStats {
    pub total_matches: usize,
    pub wins: usize,
    pub losses: usize,
    /// Matches without the requested player.
    pub skipped_matches: usize,
    /// Matches rejected as malformed.
    pub discarded_matches: usize,

    pub total_kills: u64,
    pub total_deaths: u64,
    pub total_assists: u64,
    pub total_gold: u64,
    pub total_damage: u64,
    pub total_cs: u64,
    /// Seconds, over counted matches only.
    pub total_game_duration: u64,

    pub total_vision_score: u64,
    pub total_wards_placed: u64,
    pub total_wards_killed: u64,
    pub total_control_wards: u64,
    pub objectives: ObjectiveTotals,

    pub solo_kills: u64,
    pub pentakills: u64,
    pub quadrakills: u64,
    pub first_bloods: u64,

    pub damage_share: SampleMean,
    pub gold_share: SampleMean,
    pub cs_at_10: SampleMean,

    pub champions_played: ChampionPool,
    pub roles_played: RoleTally,
    /// `YYYY-MM` (UTC) → matches.
    pub match_history_by_month: BTreeMap<String, usize>,

    /// Seconds; `None` until a match is counted.
    pub shortest_game: Option<u64>,
    pub longest_game: Option<u64>,

    pub primary_role: Role,
    pub best_champion: Option<BestChampion>,
    #[serde(flatten)]
    pub rates: SeasonRates,
}

impl PlayerSeasonStats {
    fn empty() -> Self {
        PlayerSeasonStats {
            total_matches: 0,
            wins: 0,
            losses: 0,
            skipped_matches: 0,
            discarded_matches: 0,
            total_kills: 0,
            total_deaths: 0,
            total_assists: 0,
            total_gold: 0,
            total_damage: 0,
            total_cs: 0,
            total_game_duration: 0,
            total_vision_score: 0,
            total_wards_placed: 0,
            total_wards_killed: 0,
            total_control_wards: 0,
            objectives: ObjectiveTotals::default(),
            solo_kills: 0,
            pentakills: 0,
            quadrakills: 0,
            first_bloods: 0,
            damage_share: SampleMean::default(),
            gold_share: SampleMean::default(),
            cs_at_10: SampleMean::default(),
            champions_played: ChampionPool::new(),
            roles_played: RoleTally::new(),
            match_history_by_month: BTreeMap::new(),
            shortest_game: None,
            longest_game: None,
            primary_role: Role::DEFAULT,
            best_champion: None,
            rates: SeasonRates::default(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_matches > 0
    }

    pub fn game_minutes(&self) -> f64 {
        self.total_game_duration as f64 / 60.0
    }

    fn count_match(&mut self, m: &MatchDto, player: &ParticipantDto, role: Option<Role>) {
        let duration = m.info.game_duration;
        let cs = player.creep_score();

        self.total_matches += 1;
        if player.win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        self.total_kills += player.kills as u64;
        self.total_deaths += player.deaths as u64;
        self.total_assists += player.assists as u64;
        self.total_gold = self.total_gold.saturating_add(player.gold_earned);
        self.total_damage = self
            .total_damage
            .saturating_add(player.total_damage_dealt_to_champions);
        self.total_cs = self.total_cs.saturating_add(cs);
        self.total_game_duration = self.total_game_duration.saturating_add(duration);

        self.total_vision_score += player.vision_score as u64;
        self.total_wards_placed += player.wards_placed as u64;
        self.total_wards_killed += player.wards_killed as u64;
        self.total_control_wards += player.detector_wards_placed as u64;

        let obj = &mut self.objectives;
        obj.dragon_kills += player.dragon_kills as u64;
        obj.baron_kills += player.baron_kills as u64;
        obj.turret_kills += player.turret_kills as u64;
        obj.inhibitor_kills += player.inhibitor_kills as u64;
        obj.dragon_takedowns += player.dragon_takedowns() as u64;
        obj.baron_takedowns += player.baron_takedowns() as u64;
        obj.turret_takedowns += player.turret_takedowns as u64;
        obj.inhibitor_takedowns += player.inhibitor_takedowns as u64;

        self.solo_kills += player.solo_kills() as u64;
        self.pentakills += player.penta_kills as u64;
        self.quadrakills += player.quadra_kills as u64;
        if player.first_blood_kill {
            self.first_bloods += 1;
        }

        let (team_damage, team_gold) = m
            .info
            .participants
            .iter()
            .filter(|p| p.team_id == player.team_id)
            .fold((0u64, 0u64), |(dmg, gold), p| {
                (
                    dmg.saturating_add(p.total_damage_dealt_to_champions),
                    gold.saturating_add(p.gold_earned),
                )
            });
        if team_damage > 0 {
            self.damage_share
                .push(player.total_damage_dealt_to_champions as f64 / team_damage as f64 * 100.0);
        }
        if team_gold > 0 {
            self.gold_share
                .push(player.gold_earned as f64 / team_gold as f64 * 100.0);
        }

        if duration >= CS_AT_10_MIN_DURATION_SECS {
            let minutes = duration as f64 / 60.0;
            self.cs_at_10.push(cs as f64 / minutes * 10.0);
        }

        self.champions_played.record_game(
            &player.champion_name,
            player.win,
            player.kills,
            player.deaths,
            player.assists,
            cs,
            m.info.game_creation,
        );

        if let Some(role) = role {
            self.roles_played.add(role);
        }

        self.shortest_game = Some(self.shortest_game.map_or(duration, |s| s.min(duration)));
        self.longest_game = Some(self.longest_game.map_or(duration, |l| l.max(duration)));

        *self
            .match_history_by_month
            .entry(month_key(m.info.game_creation))
            .or_insert(0) += 1;
    }

    fn finalize(&mut self) {
        let games = self.total_matches as f64;
        let minutes = self.game_minutes();

        let avg_kills = ratio(self.total_kills as f64, games);
        let avg_deaths = ratio(self.total_deaths as f64, games);
        let avg_assists = ratio(self.total_assists as f64, games);
        let kda_ratio = if avg_deaths == 0.0 {
            avg_kills + avg_assists
        } else {
            (avg_kills + avg_assists) / avg_deaths
        };

        let takedowns_per_game = ratio((self.total_kills + self.total_assists) as f64, games);

        self.rates = SeasonRates {
            avg_kills,
            avg_deaths,
            avg_assists,
            win_rate: ratio(self.wins as f64, games) * 100.0,
            kda_ratio,
            gold_per_min: ratio(self.total_gold as f64, minutes),
            damage_per_min: ratio(self.total_damage as f64, minutes),
            cs_per_min: ratio(self.total_cs as f64, minutes),
            avg_cs: ratio(self.total_cs as f64, games),
            avg_vision_score: ratio(self.total_vision_score as f64, games),
            vision_per_min: ratio(self.total_vision_score as f64, minutes),
            avg_wards_placed: ratio(self.total_wards_placed as f64, games),
            avg_wards_killed: ratio(self.total_wards_killed as f64, games),
            avg_control_wards: ratio(self.total_control_wards as f64, games),
            avg_dragons: ratio(self.objectives.dragon_takedowns as f64, games),
            avg_barons: ratio(self.objectives.baron_takedowns as f64, games),
            avg_turrets: ratio(self.objectives.turret_takedowns as f64, games),
            avg_inhibitors: ratio(self.objectives.inhibitor_takedowns as f64, games),
            avg_damage_share: self.damage_share.mean(),
            avg_gold_share: self.gold_share.mean(),
            avg_cs_at_10: self.cs_at_10.mean(),
            avg_kill_participation: takedowns_per_game / ESTIMATED_TEAM_KILLS_PER_GAME * 100.0,
            avg_game_duration: ratio(self.total_game_duration as f64, games),
        };

        self.primary_role = self.roles_played.primary().unwrap_or(Role::DEFAULT);
        self.best_champion = self.champions_played.best_champion(BEST_CHAMPION_MIN_GAMES);
    }
}

/// `YYYY-MM` in UTC for an epoch-millisecond timestamp.
pub fn month_key(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|dt| dt.format("%Y-%m").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Folds a season of matches into a [`PlayerSeasonStats`].
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    role_hints: ChampionRoleHints,
}

impl StatsAggregator {
    pub fn new(role_hints: ChampionRoleHints) -> Self {
        StatsAggregator { role_hints }
    }

    /// Aggregates raw Match-V5 payloads. Records that fail to decode are
    /// counted in `discarded_matches`; matches without `puuid` in
    /// `skipped_matches`. Neither stops the run.
    pub fn aggregate(&self, matches: &[Value], puuid: &str) -> PlayerSeasonStats {
        let mut stats = PlayerSeasonStats::empty();

        for (index, raw) in matches.iter().enumerate() {
            let outcome =
                decode_match(index, raw).and_then(|m| self.fold_match(&mut stats, &m, puuid));
            if let Err(e) = outcome {
                self.record_skip(&mut stats, e);
            }
        }

        stats.finalize();
        log::info!(
            "Aggregated {} matches ({} skipped, {} discarded)",
            stats.total_matches,
            stats.skipped_matches,
            stats.discarded_matches
        );
        stats
    }

    /// Aggregates already-decoded matches.
    pub fn aggregate_records(&self, matches: &[MatchDto], puuid: &str) -> PlayerSeasonStats {
        let mut stats = PlayerSeasonStats::empty();

        for m in matches {
            if let Err(e) = self.fold_match(&mut stats, m, puuid) {
                self.record_skip(&mut stats, e);
            }
        }

        stats.finalize();
        stats
    }

    fn fold_match(
        &self,
        stats: &mut PlayerSeasonStats,
        m: &MatchDto,
        puuid: &str,
    ) -> Result<(), AppError> {
        let player = m.participant(puuid).ok_or_else(|| AppError::MissingParticipant {
            match_id: m.match_id().to_string(),
        })?;

        let role = self.role_hints.resolve(&player.team_position, &player.champion_name);
        if role.is_none() {
            log::debug!(
                "No role vote for {} in {} (tag '{}')",
                player.champion_name,
                m.match_id(),
                player.team_position
            );
        }

        stats.count_match(m, player, role);
        Ok(())
    }

    fn record_skip(&self, stats: &mut PlayerSeasonStats, error: AppError) {
        if let AppError::MissingParticipant { .. } = error {
            log::debug!("{}", error);
            stats.skipped_matches += 1;
            return;
        }

        if error.is_per_match() {
            log::warn!("{}", error);
        } else {
            log::error!("Unexpected aggregation error: {}", error);
        }
        stats.discarded_matches += 1;
    }
}

fn decode_match(index: usize, raw: &Value) -> Result<MatchDto, AppError> {
    MatchDto::deserialize(raw).map_err(|e| AppError::MalformedMatch {
        index,
        reason: e.to_string(),
    })
}
