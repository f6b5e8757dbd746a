use crate::analysis::aggregator::{PlayerSeasonStats, StatsAggregator};
use crate::analysis::assessor::{AssessmentReport, PerformanceAssessor};
use crate::analysis::benchmarks::BenchmarkTier;
use crate::error::AppError;
use crate::insight::InsightBackend;
use crate::prompt::PromptAssembler;
use serde_json::Value;

/// Everything one analysis run produces. `insights` carries a backend
/// failure instead of discarding the statistics.
#[derive(Debug)]
pub struct SeasonReview {
    pub stats: PlayerSeasonStats,
    pub assessment: AssessmentReport,
    pub prompt: String,
    pub insights: Result<String, AppError>,
}

/// Aggregate → assess → assemble → generate.
#[derive(Default)]
pub struct SeasonReviewer {
    aggregator: StatsAggregator,
    assessor: PerformanceAssessor,
    assembler: PromptAssembler,
}

impl SeasonReviewer {
    pub fn new(
        aggregator: StatsAggregator,
        assessor: PerformanceAssessor,
        assembler: PromptAssembler,
    ) -> Self {
        SeasonReviewer {
            aggregator,
            assessor,
            assembler,
        }
    }

    /// Runs every step except narrative generation.
    pub fn prepare(
        &self,
        matches: &[Value],
        puuid: &str,
        display_name: &str,
        tier: BenchmarkTier,
    ) -> (PlayerSeasonStats, AssessmentReport, String) {
        let stats = self.aggregator.aggregate(matches, puuid);
        let assessment = self.assessor.assess(&stats, tier);
        let prompt = self.assembler.assemble(&stats, &assessment, display_name);
        log::info!(
            "Prepared {}-character prompt for {} ({} matches)",
            prompt.len(),
            display_name,
            stats.total_matches
        );
        (stats, assessment, prompt)
    }

    pub fn review(
        &self,
        matches: &[Value],
        puuid: &str,
        display_name: &str,
        tier: BenchmarkTier,
        backend: &dyn InsightBackend,
        max_tokens: u32,
    ) -> SeasonReview {
        let (stats, assessment, prompt) = self.prepare(matches, puuid, display_name, tier);

        let insights = backend.generate(&prompt, max_tokens);
        if let Err(e) = &insights {
            log::warn!("Narrative generation failed, returning statistics only: {}", e);
        }

        SeasonReview {
            stats,
            assessment,
            prompt,
            insights,
        }
    }
}
