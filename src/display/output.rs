use crate::analysis::aggregator::PlayerSeasonStats;
use crate::analysis::assessor::{AssessmentReport, PerformanceLabel};
use crate::error::AppError;
use crate::prompt::assembler::CHAMPION_POOL_LIMIT;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    metric: String,
    value: String,
    benchmark: String,
    delta: String,
    rating: String,
}

#[derive(Tabled)]
struct ChampionRow {
    #[tabled(rename = "#")]
    rank: String,
    champion: String,
    games: String,
    win_rate: String,
    kda: String,
    grade: String,
}

fn colored_label(label: PerformanceLabel) -> String {
    match label {
        PerformanceLabel::Excellent => label.as_str().green().bold().to_string(),
        PerformanceLabel::Good => label.as_str().green().to_string(),
        PerformanceLabel::BelowAverage => label.as_str().yellow().to_string(),
        PerformanceLabel::NeedsImprovement => label.as_str().red().to_string(),
    }
}

pub fn display_season_summary(
    stats: &PlayerSeasonStats,
    report: &AssessmentReport,
    player_name: &str,
) {
    println!(
        "\n{}",
        format!("📊 SEASON SUMMARY for {} ", player_name).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if !stats.has_data() {
        println!("{}", "No matches found for this player (not enough data)".yellow());
        return;
    }

    println!(
        "{} {} W / {} L ({:.1}% WR) as {} vs {} benchmarks\n",
        "📈 Overall:".bold(),
        stats.wins.to_string().green(),
        stats.losses.to_string().red(),
        stats.rates.win_rate,
        stats.primary_role,
        report.tier
    );

    let rows: Vec<MetricRow> = report
        .results
        .iter()
        .map(|r| MetricRow {
            metric: r.metric.display_name().to_string(),
            value: format!("{:.1}", r.result.actual),
            benchmark: format!("{:.1}", r.result.benchmark),
            delta: format!("{:+.1}%", r.result.percent_delta),
            rating: colored_label(r.result.label),
        })
        .collect();

    if !rows.is_empty() {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    if stats.discarded_matches > 0 || stats.skipped_matches > 0 {
        println!(
            "{} {} malformed and {} unrelated match records were left out",
            "⚠️".yellow(),
            stats.discarded_matches,
            stats.skipped_matches
        );
    }

    println!();
}

pub fn display_champion_pool(stats: &PlayerSeasonStats) {
    let ranked = stats.champions_played.ranked();
    if ranked.is_empty() {
        return;
    }

    println!("{}", "🎮 CHAMPION POOL".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<ChampionRow> = ranked
        .iter()
        .take(CHAMPION_POOL_LIMIT)
        .enumerate()
        .map(|(idx, champ)| ChampionRow {
            rank: format!("#{}", idx + 1),
            champion: champ.name.clone(),
            games: champ.games.to_string(),
            win_rate: format!("{:.1}%", champ.win_rate()),
            kda: format!("{:.1}", champ.kda()),
            grade: champ.grade().to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    if let Some(best) = &stats.best_champion {
        println!("\n{}", "Best Champion".bold().yellow());
        println!(
            "  {} with {:.1}% win rate over {} games",
            best.name, best.win_rate, best.games
        );
    }

    println!();
}

pub fn display_insights(insights: &Result<String, AppError>, player_name: &str) {
    match insights {
        Ok(text) => {
            println!("{}", format!("✨ SEASON RECAP: {}", player_name).bold().cyan());
            println!("{}\n", "=".repeat(80).cyan());
            println!("{}", text);
            println!("\n{}\n", "=".repeat(80).cyan());
        }
        Err(e) => {
            println!(
                "{} {}",
                "⚠️ Recap not generated:".yellow().bold(),
                e
            );
            println!(
                "{}\n",
                "Statistics above are complete; rerun once the backend is reachable.".yellow()
            );
        }
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
