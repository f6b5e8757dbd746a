mod common;

use common::{match_record, participant, three_match_season, PLAYER};
use rift_recap::analysis::assessor::Metric;
use rift_recap::analysis::benchmarks::BenchmarkTier;
use rift_recap::analysis::role::Role;
use rift_recap::error::AppError;
use rift_recap::insight::{DisabledBackend, InsightBackend};
use rift_recap::prompt::assembler::SECTION_HEADINGS;
use rift_recap::review::SeasonReviewer;
use std::cell::RefCell;

struct EchoBackend {
    seen: RefCell<Option<(String, u32)>>,
}

impl InsightBackend for EchoBackend {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError> {
        *self.seen.borrow_mut() = Some((prompt.to_string(), max_tokens));
        Ok("What a season.".to_string())
    }
}

struct FailingBackend;

impl InsightBackend for FailingBackend {
    fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AppError> {
        Err(AppError::BackendUnavailable("connection refused".to_string()))
    }
}

#[test]
fn three_match_season_statistics() {
    let reviewer = SeasonReviewer::default();
    let (stats, _, _) =
        reviewer.prepare(&three_match_season(), PLAYER, "Tester#NA1", BenchmarkTier::Gold);

    assert_eq!(stats.total_matches, 3);
    assert_eq!(stats.wins, 2);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.total_kills, 16);
    assert!((stats.rates.avg_kills - 16.0 / 3.0).abs() < 1e-9);
    assert!((stats.rates.win_rate - 66.666_666).abs() < 1e-3);
    assert_eq!(stats.champions_played.get("Ahri").map(|c| c.games), Some(2));
    assert_eq!(stats.champions_played.get("Zed").map(|c| c.games), Some(1));
    assert_eq!(stats.match_history_by_month.get("2024-01"), Some(&1));
    assert_eq!(stats.match_history_by_month.get("2024-02"), Some(&2));
    assert_eq!(stats.primary_role, Role::Middle);
}

#[test]
fn match_without_player_is_skipped() {
    let mut matches = three_match_season();
    matches.push(match_record(
        "NA1_4",
        1800,
        1_706_900_000_000,
        vec![participant("someone-else", "Lux", true, (3, 3, 3))],
    ));

    let reviewer = SeasonReviewer::default();
    let (stats, _, _) = reviewer.prepare(&matches, PLAYER, "Tester#NA1", BenchmarkTier::Gold);

    assert_eq!(stats.total_matches, 3);
    assert_eq!(stats.skipped_matches, 1);
    assert_eq!(stats.total_kills, 16);
}

#[test]
fn malformed_record_does_not_abort_the_season() {
    let mut matches = three_match_season();
    matches.insert(1, serde_json::json!({ "info": { "participants": "not a list" } }));

    let reviewer = SeasonReviewer::default();
    let (stats, _, _) = reviewer.prepare(&matches, PLAYER, "Tester#NA1", BenchmarkTier::Gold);

    assert_eq!(stats.total_matches, 3);
    assert_eq!(stats.discarded_matches, 1);
}

#[test]
fn cs_per_minute_is_assessed_against_gold_mid() {
    let reviewer = SeasonReviewer::default();
    let (stats, assessment, prompt) =
        reviewer.prepare(&three_match_season(), PLAYER, "Tester#NA1", BenchmarkTier::Gold);

    // 180 cs over 30 minutes
    assert!((stats.rates.cs_per_min - 6.0).abs() < 1e-9);
    let cs = assessment.get(Metric::CsPerMin).expect("cs assessed");
    assert_eq!(cs.benchmark, 7.5);
    assert!((cs.percent_delta - -20.0).abs() < 1e-9);
    assert!(prompt.contains("- CS per minute: 6.0 (benchmark 7.5, -20.0%, needs_improvement)"));
}

#[test]
fn backend_failure_keeps_statistics() {
    let reviewer = SeasonReviewer::default();
    let review = reviewer.review(
        &three_match_season(),
        PLAYER,
        "Tester#NA1",
        BenchmarkTier::Gold,
        &FailingBackend,
        4096,
    );

    assert_eq!(review.stats.total_matches, 3);
    assert!(!review.assessment.results.is_empty());
    assert!(matches!(review.insights, Err(AppError::BackendUnavailable(_))));
}

#[test]
fn unconfigured_backend_is_reported_not_fatal() {
    let reviewer = SeasonReviewer::default();
    let review = reviewer.review(
        &three_match_season(),
        PLAYER,
        "Tester#NA1",
        BenchmarkTier::Gold,
        &DisabledBackend,
        4096,
    );

    assert_eq!(review.stats.wins, 2);
    assert!(review.insights.is_err());
}

#[test]
fn backend_receives_assembled_prompt_and_limit() {
    let backend = EchoBackend {
        seen: RefCell::new(None),
    };
    let reviewer = SeasonReviewer::default();
    let review = reviewer.review(
        &three_match_season(),
        PLAYER,
        "Tester#NA1",
        BenchmarkTier::Platinum,
        &backend,
        1024,
    );

    assert_eq!(review.insights.as_deref().ok(), Some("What a season."));
    let seen = backend.seen.borrow();
    let (prompt, max_tokens) = seen.as_ref().expect("backend called");
    assert_eq!(prompt, &review.prompt);
    assert_eq!(*max_tokens, 1024);
}

#[test]
fn prompt_is_complete_and_deterministic() {
    let reviewer = SeasonReviewer::default();
    let season = three_match_season();
    let (_, _, first) = reviewer.prepare(&season, PLAYER, "Tester#NA1", BenchmarkTier::Gold);
    let (_, _, second) = reviewer.prepare(&season, PLAYER, "Tester#NA1", BenchmarkTier::Gold);

    assert_eq!(first, second);
    for heading in SECTION_HEADINGS {
        assert!(first.contains(heading), "missing {heading}");
    }
    assert!(first.contains("Tester#NA1"));
    assert!(first.contains("Ahri"));
}

#[test]
fn empty_season_still_produces_prompt() {
    let reviewer = SeasonReviewer::default();
    let (stats, assessment, prompt) =
        reviewer.prepare(&[], PLAYER, "Tester#NA1", BenchmarkTier::DEFAULT);

    assert_eq!(stats.total_matches, 0);
    assert_eq!(stats.rates.win_rate, 0.0);
    assert!(stats.best_champion.is_none());
    assert_eq!(assessment.tier, BenchmarkTier::Gold);
    assert!(prompt.contains("## PROFILE"));
}
