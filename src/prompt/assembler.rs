// Builds the season recap prompt handed to the insight backend.
//
// The backend only sees this text, so number formatting is fixed: one
// decimal for rates and percentages, whole numbers for gold and damage per
// minute. The same inputs always produce the same document.

use super::guidance::GuidanceTable;
use crate::analysis::aggregator::{PlayerSeasonStats, ESTIMATED_TEAM_KILLS_PER_GAME};
use crate::analysis::assessor::{AssessmentReport, Metric};

/// Champions listed individually in the pool section.
pub const CHAMPION_POOL_LIMIT: usize = 10;

pub const SECTION_HEADINGS: [&str; 10] = [
    "## PROFILE",
    "## DATA QUALITY",
    "## FARMING",
    "## COMBAT",
    "## VISION",
    "## MACRO & OBJECTIVES",
    "## CONSISTENCY & ACTIVITY",
    "## CHAMPION POOL",
    "## ROLE AND TIER GUIDANCE",
    "## WHAT TO WRITE",
];

pub struct PromptAssembler {
    guidance: GuidanceTable,
}

impl PromptAssembler {
    pub fn new(guidance: GuidanceTable) -> Self {
        PromptAssembler { guidance }
    }

    pub fn assemble(
        &self,
        stats: &PlayerSeasonStats,
        report: &AssessmentReport,
        display_name: &str,
    ) -> String {
        let mut prompt = String::with_capacity(4096);

        prompt.push_str(&format!(
            "You are an expert League of Legends analyst creating a personalized end-of-season recap for {}.\n\
             Every number below is pre-computed from their ranked matches; use them as given and do not recalculate.\n\n",
            display_name
        ));

        push_profile(&mut prompt, stats, report, display_name);
        push_data_quality(&mut prompt, stats);
        push_farming(&mut prompt, stats, report);
        push_combat(&mut prompt, stats, report);
        push_vision(&mut prompt, stats, report);
        push_macro(&mut prompt, stats, report);
        push_consistency(&mut prompt, stats);
        push_champion_pool(&mut prompt, stats);
        self.push_guidance(&mut prompt, report);
        push_instructions(&mut prompt);

        prompt
    }

    fn push_guidance(&self, prompt: &mut String, report: &AssessmentReport) {
        let band = report.tier.band();
        prompt.push_str(&format!(
            "## ROLE AND TIER GUIDANCE ({}, {} band)\n",
            report.role,
            band.as_str()
        ));
        match self.guidance.block(report.role, band) {
            Some(block) => prompt.push_str(block),
            None => {
                prompt.push_str("No role-specific guidance available; keep the advice general.")
            }
        }
        prompt.push_str("\n\n");
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        PromptAssembler::new(GuidanceTable::standard())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn push_profile(
    prompt: &mut String,
    stats: &PlayerSeasonStats,
    report: &AssessmentReport,
    display_name: &str,
) {
    prompt.push_str("## PROFILE\n");
    prompt.push_str(&format!("- Player: {}\n", display_name));
    prompt.push_str(&format!(
        "- Primary role: {} ({} of {} games with a known role)\n",
        stats.primary_role,
        stats.roles_played.count(stats.primary_role),
        stats.roles_played.total()
    ));

    if stats.roles_played.total() > 0 {
        let roles = stats
            .roles_played
            .iter()
            .map(|(role, count)| format!("{} {}", role, count))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("- Roles played: {}\n", roles));
    }

    prompt.push_str(&format!(
        "- Benchmark tier: {} ({} band)\n",
        report.tier,
        report.tier.band().as_str()
    ));
    prompt.push_str(&format!(
        "- Matches analyzed: {} ({} wins, {} losses, {:.1}% win rate)\n",
        stats.total_matches, stats.wins, stats.losses, stats.rates.win_rate
    ));

    match &stats.best_champion {
        Some(best) => prompt.push_str(&format!(
            "- Best champion: {} ({:.1}% win rate over {} games)\n",
            best.name, best.win_rate, best.games
        )),
        None => prompt.push_str("- Best champion: none with 5 or more games and a win\n"),
    }
    prompt.push('\n');
}

fn push_data_quality(prompt: &mut String, stats: &PlayerSeasonStats) {
    prompt.push_str("## DATA QUALITY\n");
    let mut notices = Vec::new();

    if !stats.has_data() {
        notices.push(
            "No matches with this player were found; every metric below is a default of 0."
                .to_string(),
        );
    } else {
        if stats.total_cs == 0 {
            notices.push(
                "Farming data is entirely absent (0 CS recorded in every match); treat farming metrics as unavailable."
                    .to_string(),
            );
        }
        if stats.total_vision_score == 0 {
            notices.push(
                "Vision data is entirely absent (vision score 0 in every match); treat vision metrics as unavailable."
                    .to_string(),
            );
        }
        if !stats.cs_at_10.has_samples() {
            notices.push("No match lasted 10 minutes, so CS at 10 could not be estimated.".to_string());
        }
    }

    if stats.discarded_matches > 0 || stats.skipped_matches > 0 {
        notices.push(format!(
            "{} match records were unreadable and {} did not include this player; both were left out.",
            stats.discarded_matches, stats.skipped_matches
        ));
    }

    if notices.is_empty() {
        notices.push(format!(
            "All tracked metrics are present across {} matches.",
            stats.total_matches
        ));
    }

    for notice in notices {
        prompt.push_str(&format!("- {}\n", notice));
    }
    prompt.push('\n');
}

fn push_farming(prompt: &mut String, stats: &PlayerSeasonStats, report: &AssessmentReport) {
    let rates = &stats.rates;
    prompt.push_str("## FARMING\n");
    prompt.push_str(&format!(
        "- CS per minute: {:.1}{}\n",
        rates.cs_per_min,
        benchmark_note(report, Metric::CsPerMin)
    ));
    prompt.push_str(&format!("- Average CS per game: {:.1}\n", rates.avg_cs));
    if stats.cs_at_10.has_samples() {
        prompt.push_str(&format!(
            "- Estimated CS at 10 minutes: {:.1} (approximation from end-of-game CS rate over {} games of 10+ minutes)\n",
            rates.avg_cs_at_10, stats.cs_at_10.samples
        ));
    } else {
        prompt.push_str("- Estimated CS at 10 minutes: n/a\n");
    }
    prompt.push_str(&format!("- Gold per minute: {:.0}\n", rates.gold_per_min));
    prompt.push('\n');
}

fn push_combat(prompt: &mut String, stats: &PlayerSeasonStats, report: &AssessmentReport) {
    let rates = &stats.rates;
    prompt.push_str("## COMBAT\n");
    prompt.push_str(&format!(
        "- Average KDA: {:.1} / {:.1} / {:.1}\n",
        rates.avg_kills, rates.avg_deaths, rates.avg_assists
    ));
    prompt.push_str(&format!(
        "- KDA ratio: {:.1}{}\n",
        rates.kda_ratio,
        benchmark_note(report, Metric::Kda)
    ));
    prompt.push_str(&format!("- Damage per minute: {:.0}\n", rates.damage_per_min));

    if stats.damage_share.has_samples() {
        prompt.push_str(&format!(
            "- Damage share: {:.1}% of team{}\n",
            rates.avg_damage_share,
            benchmark_note(report, Metric::DamageShare)
        ));
    } else {
        prompt.push_str("- Damage share: n/a\n");
    }
    if stats.gold_share.has_samples() {
        prompt.push_str(&format!(
            "- Gold share: {:.1}% of team{}\n",
            rates.avg_gold_share,
            benchmark_note(report, Metric::GoldShare)
        ));
    } else {
        prompt.push_str("- Gold share: n/a\n");
    }

    prompt.push_str(&format!(
        "- Kill participation (estimate, assumes {:.0} team kills per game): {:.1}%\n",
        ESTIMATED_TEAM_KILLS_PER_GAME, rates.avg_kill_participation
    ));
    prompt.push_str(&format!(
        "- Solo kills: {} | Pentakills: {} | Quadrakills: {} | First bloods: {}\n",
        stats.solo_kills, stats.pentakills, stats.quadrakills, stats.first_bloods
    ));
    prompt.push('\n');
}

fn push_vision(prompt: &mut String, stats: &PlayerSeasonStats, report: &AssessmentReport) {
    let rates = &stats.rates;
    prompt.push_str("## VISION\n");
    prompt.push_str(&format!(
        "- Vision per minute: {:.1}{}\n",
        rates.vision_per_min,
        benchmark_note(report, Metric::VisionPerMin)
    ));
    prompt.push_str(&format!("- Average vision score: {:.1}\n", rates.avg_vision_score));
    prompt.push_str(&format!(
        "- Wards placed per game: {:.1} | Wards killed per game: {:.1} | Control wards per game: {:.1}\n",
        rates.avg_wards_placed, rates.avg_wards_killed, rates.avg_control_wards
    ));
    prompt.push('\n');
}

fn push_macro(prompt: &mut String, stats: &PlayerSeasonStats, report: &AssessmentReport) {
    let rates = &stats.rates;
    prompt.push_str("## MACRO & OBJECTIVES\n");
    prompt.push_str(&format!(
        "- Dragons per game: {:.1}{}\n",
        rates.avg_dragons,
        benchmark_note(report, Metric::DragonsPerGame)
    ));
    prompt.push_str(&format!("- Barons per game: {:.1}\n", rates.avg_barons));
    prompt.push_str(&format!(
        "- Turrets per game: {:.1}{}\n",
        rates.avg_turrets,
        benchmark_note(report, Metric::TurretsPerGame)
    ));
    prompt.push_str(&format!("- Inhibitors per game: {:.1}\n", rates.avg_inhibitors));
    prompt.push('\n');
}

fn push_consistency(prompt: &mut String, stats: &PlayerSeasonStats) {
    prompt.push_str("## CONSISTENCY & ACTIVITY\n");
    let months = &stats.match_history_by_month;
    prompt.push_str(&format!("- Months active: {}\n", months.len()));

    // earliest month wins a tie
    let mut busiest: Option<(&String, usize)> = None;
    for (month, &count) in months {
        if busiest.map(|(_, c)| count > c).unwrap_or(true) {
            busiest = Some((month, count));
        }
    }
    if let Some((month, count)) = busiest {
        prompt.push_str(&format!("- Most active month: {} ({} matches)\n", month, count));
        let monthly = months
            .iter()
            .map(|(month, count)| format!("{}: {}", month, count))
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!("- Monthly matches: {}\n", monthly));
    }

    prompt.push_str(&format!(
        "- Average game length: {:.1} minutes\n",
        stats.rates.avg_game_duration / 60.0
    ));
    prompt.push_str(&format!(
        "- Shortest game: {} | Longest game: {}\n",
        minutes_or_na(stats.shortest_game),
        minutes_or_na(stats.longest_game)
    ));
    prompt.push('\n');
}

fn push_champion_pool(prompt: &mut String, stats: &PlayerSeasonStats) {
    let pool = &stats.champions_played;
    prompt.push_str(&format!("## CHAMPION POOL ({} champions)\n", pool.len()));

    let ranked = pool.ranked();
    if ranked.is_empty() {
        prompt.push_str("- No champions played\n");
    }
    for champ in ranked.iter().take(CHAMPION_POOL_LIMIT) {
        prompt.push_str(&format!(
            "- {}: {} games, {:.1}% win rate, KDA {:.1}, {:.1} CS per game, grade {}\n",
            champ.name,
            champ.games,
            champ.win_rate(),
            champ.kda(),
            champ.avg_cs(),
            champ.grade()
        ));
    }
    if ranked.len() > CHAMPION_POOL_LIMIT {
        prompt.push_str(&format!(
            "- ...and {} more champions\n",
            ranked.len() - CHAMPION_POOL_LIMIT
        ));
    }
    prompt.push('\n');
}

fn push_instructions(prompt: &mut String) {
    prompt.push_str(
        "## WHAT TO WRITE\n\
         1. Headline achievement: open with their most impressive stat.\n\
         2. Playing style: what the champion pool and role split say about them.\n\
         3. Strengths: metrics rated excellent or good against the benchmark.\n\
         4. Areas for improvement: metrics rated below_average or needs_improvement, with concrete habits to change.\n\
         5. Surprising insights: patterns they might not have noticed.\n\
         6. Looking forward: two or three goals for next season.\n\
         Be specific with their actual numbers, encouraging but honest, and treat values marked as estimates as approximate.\n",
    );
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn benchmark_note(report: &AssessmentReport, metric: Metric) -> String {
    match report.get(metric) {
        Some(r) => format!(
            " (benchmark {:.1}, {:+.1}%, {})",
            r.benchmark, r.percent_delta, r.label
        ),
        None => String::new(),
    }
}

fn minutes_or_na(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) => format!("{:.1} minutes", s as f64 / 60.0),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::StatsAggregator;
    use crate::analysis::assessor::PerformanceAssessor;
    use crate::analysis::benchmarks::{BenchmarkTier, TierBand};
    use crate::analysis::role::Role;
    use serde_json::{json, Value};

    fn game(champion: &str, position: &str, win: bool, creation: i64) -> Value {
        json!({
            "info": {
                "gameDuration": 1800,
                "gameCreation": creation,
                "participants": [{
                    "puuid": "p", "championName": champion, "teamId": 100, "win": win,
                    "kills": 6, "deaths": 3, "assists": 9,
                    "goldEarned": 12000, "totalDamageDealtToChampions": 24000,
                    "totalMinionsKilled": 195, "neutralMinionsKilled": 0,
                    "visionScore": 18, "wardsPlaced": 8, "wardsKilled": 2, "detectorWardsPlaced": 1,
                    "turretTakedowns": 2, "teamPosition": position
                }, {
                    "puuid": "ally", "championName": "Garen", "teamId": 100, "win": win,
                    "kills": 0, "deaths": 0, "assists": 0,
                    "goldEarned": 36000, "totalDamageDealtToChampions": 72000,
                    "totalMinionsKilled": 0, "neutralMinionsKilled": 0
                }]
            }
        })
    }

    fn render(matches: &[Value], tier: BenchmarkTier) -> String {
        let stats = StatsAggregator::default().aggregate(matches, "p");
        let report = PerformanceAssessor::default().assess(&stats, tier);
        PromptAssembler::default().assemble(&stats, &report, "Tester#NA1")
    }

    #[test]
    fn sections_appear_in_order() {
        let prompt = render(&[game("Ahri", "MIDDLE", true, 0)], BenchmarkTier::Gold);
        let mut last = 0;
        for heading in SECTION_HEADINGS {
            let at = prompt[last..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing or out of order: {heading}"));
            last += at + heading.len();
        }
    }

    #[test]
    fn numbers_use_fixed_precision() {
        let prompt = render(&[game("Ahri", "MIDDLE", true, 0)], BenchmarkTier::Gold);
        // 195 cs over 30 minutes against the 7.5 gold mid target
        assert!(prompt.contains("- CS per minute: 6.5 (benchmark 7.5, -13.3%, below_average)\n"));
        assert!(prompt.contains("- Gold per minute: 400\n"));
        assert!(prompt.contains("- Damage per minute: 800\n"));
        assert!(prompt.contains("- Average KDA: 6.0 / 3.0 / 9.0\n"));
        assert!(prompt.contains("- Damage share: 25.0% of team (benchmark 28.0, -10.7%, below_average)\n"));
        assert!(prompt.contains("- Kill participation (estimate, assumes 25 team kills per game): 60.0%\n"));
        assert!(prompt.contains("- Matches analyzed: 1 (1 wins, 0 losses, 100.0% win rate)\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let matches = vec![
            game("Ahri", "MIDDLE", true, 1_700_000_000_000),
            game("Zed", "MIDDLE", false, 1_702_000_000_000),
            game("Thresh", "", true, 1_704_100_000_000),
        ];
        assert_eq!(render(&matches, BenchmarkTier::Emerald), render(&matches, BenchmarkTier::Emerald));
    }

    #[test]
    fn empty_season_renders_defaults() {
        let prompt = render(&[], BenchmarkTier::Gold);
        assert!(prompt.contains("No matches with this player were found"));
        assert!(prompt.contains("- Primary role: MIDDLE (0 of 0 games with a known role)\n"));
        assert!(prompt.contains("- Shortest game: n/a | Longest game: n/a\n"));
        assert!(prompt.contains("- No champions played\n"));
        assert!(prompt.contains("- Estimated CS at 10 minutes: n/a\n"));
    }

    #[test]
    fn role_count_excludes_dropped_votes() {
        // Ahri with a blank tag has no heuristic entry, so it casts no role vote
        let prompt = render(
            &[game("Ahri", "MIDDLE", true, 0), game("Ahri", "", true, 1)],
            BenchmarkTier::Gold,
        );
        assert!(prompt.contains("- Primary role: MIDDLE (1 of 1 games with a known role)\n"));
        assert!(prompt.contains("- Matches analyzed: 2 (2 wins, 0 losses, 100.0% win rate)\n"));
    }

    #[test]
    fn season_without_the_player_reports_no_matches() {
        let matches = [game("Ahri", "MIDDLE", true, 0), game("Zed", "MIDDLE", false, 1)];
        let stats = StatsAggregator::default().aggregate(&matches, "nobody");
        let report = PerformanceAssessor::default().assess(&stats, BenchmarkTier::Gold);
        let prompt = PromptAssembler::default().assemble(&stats, &report, "Tester#NA1");

        assert!(report.results.is_empty());
        assert!(prompt.contains("No matches with this player were found"));
        assert!(prompt.contains("0 match records were unreadable and 2 did not include this player"));
        assert!(prompt.contains("- Shortest game: n/a | Longest game: n/a\n"));
    }

    #[test]
    fn flags_absent_farming_and_vision() {
        let mut m = game("Thresh", "UTILITY", true, 0);
        m["info"]["participants"][0]["totalMinionsKilled"] = json!(0);
        m["info"]["participants"][0]["visionScore"] = json!(0);
        let prompt = render(&[m], BenchmarkTier::Gold);
        assert!(prompt.contains("Farming data is entirely absent"));
        assert!(prompt.contains("Vision data is entirely absent"));
        assert!(prompt.contains("- CS per minute: 0.0\n"));
    }

    #[test]
    fn guidance_follows_role_and_band() {
        let stats = StatsAggregator::default().aggregate(&[game("Thresh", "UTILITY", true, 0)], "p");
        let report = PerformanceAssessor::default().assess(&stats, BenchmarkTier::Apex);
        let assembler = PromptAssembler::new(
            GuidanceTable::empty().with_block(Role::Support, TierBand::High, "SUPPORT-HIGH-BLOCK"),
        );
        let prompt = assembler.assemble(&stats, &report, "x");
        assert!(prompt.contains("## ROLE AND TIER GUIDANCE (SUPPORT, high band)\nSUPPORT-HIGH-BLOCK\n"));

        let report = PerformanceAssessor::default().assess(&stats, BenchmarkTier::Bronze);
        let prompt = assembler.assemble(&stats, &report, "x");
        assert!(prompt.contains("No role-specific guidance available"));
    }

    #[test]
    fn champion_pool_lists_top_ten_and_remainder() {
        let champions = [
            "Ahri", "Zed", "Lux", "Annie", "Yasuo", "Yone", "Syndra", "Orianna", "Viktor", "Akali", "Sylas",
            "Vex",
        ];
        let mut matches: Vec<Value> = champions
            .iter()
            .enumerate()
            .map(|(i, c)| game(c, "MIDDLE", true, i as i64))
            .collect();
        matches.push(game("Vex", "MIDDLE", false, 100));

        let prompt = render(&matches, BenchmarkTier::Gold);
        assert!(prompt.contains("## CHAMPION POOL (12 champions)\n- Vex: 2 games"));
        assert!(prompt.contains("- ...and 2 more champions\n"));
        // most recent single-game champion comes right after the two-game one
        assert!(prompt.contains("- Vex: 2 games, 50.0% win rate, KDA 5.0, 195.0 CS per game, grade C (Learning)\n- Sylas: 1 games"));
        assert!(!prompt.contains("- Ahri:"));
    }
}
