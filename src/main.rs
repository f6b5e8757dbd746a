use anyhow::{Context, Result};
use clap::Parser;
use rift_recap::analysis::benchmarks::BenchmarkTier;
use rift_recap::api::client::{parse_riot_id, RiotApiClient};
use rift_recap::config::Config;
use rift_recap::display::output::{
    display_champion_pool, display_error, display_info, display_insights, display_season_summary,
    display_success,
};
use rift_recap::error::AppError;
use rift_recap::insight::backend_from_config;
use rift_recap::review::SeasonReviewer;
use rift_recap::source::{MatchDirectory, MatchRecordSource};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "Rift Recap")]
#[command(about = "Benchmark a season of ranked games and generate a personalized recap", long_about = None)]
struct Args {
    /// Riot ID (GameName#TAG)
    riot_id: String,

    /// Region (default: na1)
    #[arg(short, long)]
    region: Option<String>,

    /// Ranked tier to benchmark against (skips the rank lookup)
    #[arg(short, long)]
    tier: Option<String>,

    /// Read Match-V5 JSON dumps from this directory instead of the Riot API
    #[arg(long, requires = "puuid")]
    matches_dir: Option<PathBuf>,

    /// Player PUUID inside the dumped matches (required with --matches-dir)
    #[arg(long)]
    puuid: Option<String>,

    /// Token limit for the generated recap
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_tokens: Option<u32>,

    /// Stop after building the prompt (no recap generation)
    #[arg(long)]
    prompt_only: bool,

    /// Print the assembled prompt
    #[arg(long)]
    print_prompt: bool,

    /// Print statistics and assessment as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Collected input for one analysis run.
struct SeasonInput {
    puuid: String,
    tier: Option<String>,
    matches: Vec<Value>,
}

fn load_from_directory(dir: &Path, args: &Args) -> Result<SeasonInput> {
    let puuid = args
        .puuid
        .clone()
        .ok_or_else(|| {
            AppError::ConfigError("--puuid is required with --matches-dir".to_string())
        })?;

    display_info(&format!("Reading matches from {}", dir.display()));
    let matches = MatchDirectory::new(dir)
        .fetch_matches(&puuid)
        .with_context(|| format!("loading matches from {}", dir.display()))?;

    Ok(SeasonInput {
        puuid,
        tier: args.tier.clone(),
        matches,
    })
}

fn load_from_api(
    config: &Config,
    args: &Args,
    game_name: &str,
    tag_line: &str,
) -> Result<SeasonInput> {
    let client = RiotApiClient::new(config)?.with_progress(true);

    // Step 1: Get account info (PUUID)
    display_info("Step 1: Getting account info...");
    let account = client.get_account(game_name, tag_line)?;
    let short_puuid: String = account.puuid.chars().take(8).collect();
    display_success(&format!("Found PUUID: {}", short_puuid));

    // Step 2: Get summoner info
    display_info("Step 2: Getting summoner info...");
    let summoner = client.get_summoner(&account.puuid)?;
    display_success(&format!("Summoner Level: {}", summoner.summoner_level));

    // Step 3: Get rank info (only for benchmark selection)
    let tier = match &args.tier {
        Some(tier) => Some(tier.clone()),
        None => {
            display_info("Step 3: Getting rank info...");
            match client.get_solo_tier(&account.puuid) {
                Ok(Some(tier)) => {
                    display_success(&format!("Ranked tier: {}", tier));
                    Some(tier)
                }
                Ok(None) => {
                    display_info("Unranked in solo queue, using default benchmarks");
                    None
                }
                Err(e) => {
                    log::warn!("Rank lookup failed: {}", e);
                    None
                }
            }
        }
    };

    // Step 4: Fetch the past year of matches
    display_info("Step 4: Fetching the past year of matches...");
    let matches = client.fetch_matches(&account.puuid)?;
    display_success(&format!("Fetched {} matches", matches.len()));

    Ok(SeasonInput {
        puuid: account.puuid,
        tier,
        matches,
    })
}

fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(region) = &args.region {
        config.region = region.clone();
    }
    if let Some(max_tokens) = args.max_tokens {
        config.insight.max_tokens = max_tokens;
    }

    let (game_name, tag_line) = parse_riot_id(&args.riot_id)?;
    let player_key = format!("{}#{}", game_name, tag_line);

    let input = match &args.matches_dir {
        Some(dir) => load_from_directory(dir, &args)?,
        None => {
            display_info(&format!(
                "Fetching data for {} in region {}",
                player_key, config.region
            ));
            load_from_api(&config, &args, &game_name, &tag_line)?
        }
    };

    let tier = BenchmarkTier::resolve(input.tier.as_deref());
    let reviewer = SeasonReviewer::default();

    if args.prompt_only {
        let (stats, assessment, prompt) =
            reviewer.prepare(&input.matches, &input.puuid, &player_key, tier);
        if args.json {
            print_json(&stats, &assessment)?;
        } else {
            display_season_summary(&stats, &assessment, &player_key);
        }
        println!("{}", prompt);
        return Ok(());
    }

    display_info("Generating season recap...");
    let backend = backend_from_config(&config.insight);
    let review = reviewer.review(
        &input.matches,
        &input.puuid,
        &player_key,
        tier,
        backend.as_ref(),
        config.insight.max_tokens,
    );

    if args.json {
        print_json(&review.stats, &review.assessment)?;
    } else {
        display_season_summary(&review.stats, &review.assessment, &player_key);
        display_champion_pool(&review.stats);
    }

    if args.print_prompt {
        println!("{}\n", review.prompt);
    }

    display_insights(&review.insights, &player_key);

    Ok(())
}

fn print_json(
    stats: &rift_recap::analysis::aggregator::PlayerSeasonStats,
    assessment: &rift_recap::analysis::assessor::AssessmentReport,
) -> Result<()> {
    let out = json!({ "stats": stats, "assessment": assessment });
    let text = serde_json::to_string_pretty(&out).context("serializing statistics")?;
    println!("{}", text);
    Ok(())
}
