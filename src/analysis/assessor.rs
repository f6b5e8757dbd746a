use super::aggregator::PlayerSeasonStats;
use super::benchmarks::{Benchmark, BenchmarkTable, BenchmarkTier};
use super::role::Role;
use serde::Serialize;
use std::fmt;

pub const EXCELLENT_THRESHOLD: f64 = 10.0;
pub const GOOD_THRESHOLD: f64 = 0.0;
pub const BELOW_AVERAGE_THRESHOLD: f64 = -15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLabel {
    Excellent,
    Good,
    BelowAverage,
    NeedsImprovement,
}

impl PerformanceLabel {
    pub fn from_percent_delta(percent_delta: f64) -> Self {
        if percent_delta >= EXCELLENT_THRESHOLD {
            PerformanceLabel::Excellent
        } else if percent_delta >= GOOD_THRESHOLD {
            PerformanceLabel::Good
        } else if percent_delta >= BELOW_AVERAGE_THRESHOLD {
            PerformanceLabel::BelowAverage
        } else {
            PerformanceLabel::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLabel::Excellent => "excellent",
            PerformanceLabel::Good => "good",
            PerformanceLabel::BelowAverage => "below_average",
            PerformanceLabel::NeedsImprovement => "needs_improvement",
        }
    }
}

impl fmt::Display for PerformanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub actual: f64,
    pub benchmark: f64,
    pub absolute_delta: f64,
    pub percent_delta: f64,
    pub label: PerformanceLabel,
}

/// Compares one metric to its target. A non-positive benchmark yields a 0 %
/// delta (and therefore "good").
pub fn compare(actual: f64, benchmark: f64) -> AssessmentResult {
    let percent_delta = if benchmark > 0.0 {
        (actual - benchmark) / benchmark * 100.0
    } else {
        0.0
    };

    AssessmentResult {
        actual,
        benchmark,
        absolute_delta: actual - benchmark,
        percent_delta,
        label: PerformanceLabel::from_percent_delta(percent_delta),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CsPerMin,
    VisionPerMin,
    Kda,
    DamageShare,
    GoldShare,
    DragonsPerGame,
    TurretsPerGame,
}

impl Metric {
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::CsPerMin => "CS per minute",
            Metric::VisionPerMin => "Vision per minute",
            Metric::Kda => "KDA ratio",
            Metric::DamageShare => "Damage share %",
            Metric::GoldShare => "Gold share %",
            Metric::DragonsPerGame => "Dragons per game",
            Metric::TurretsPerGame => "Turrets per game",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssessedMetric {
    pub metric: Metric,
    #[serde(flatten)]
    pub result: AssessmentResult,
}

/// Every metric that had data, in a fixed order.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub role: Role,
    pub tier: BenchmarkTier,
    pub benchmark: Benchmark,
    pub results: Vec<AssessedMetric>,
}

impl AssessmentReport {
    pub fn get(&self, metric: Metric) -> Option<&AssessmentResult> {
        self.results
            .iter()
            .find(|r| r.metric == metric)
            .map(|r| &r.result)
    }

    pub fn count_with(&self, label: PerformanceLabel) -> usize {
        self.results.iter().filter(|r| r.result.label == label).count()
    }
}

pub struct PerformanceAssessor {
    table: BenchmarkTable,
}

impl PerformanceAssessor {
    pub fn new(table: BenchmarkTable) -> Self {
        PerformanceAssessor { table }
    }

    /// Rates `stats` against its primary role at `tier`. Metrics whose
    /// source data is entirely absent are left out rather than rated as 0.
    pub fn assess(&self, stats: &PlayerSeasonStats, tier: BenchmarkTier) -> AssessmentReport {
        let role = stats.primary_role;
        let benchmark = self.table.lookup(role, tier);
        let rates = &stats.rates;
        let exp = benchmark.expectations;

        let mut results = Vec::new();
        let mut push = |metric: Metric, actual: f64, target: f64| {
            results.push(AssessedMetric {
                metric,
                result: compare(actual, target),
            });
        };

        if stats.has_data() {
            if stats.total_cs > 0 {
                push(Metric::CsPerMin, rates.cs_per_min, benchmark.cs_per_min);
            }
            if stats.total_vision_score > 0 {
                push(Metric::VisionPerMin, rates.vision_per_min, benchmark.vision_per_min);
            }
            push(Metric::Kda, rates.kda_ratio, benchmark.kda);
            if stats.damage_share.has_samples() {
                push(Metric::DamageShare, rates.avg_damage_share, exp.damage_share);
            }
            if stats.gold_share.has_samples() {
                push(Metric::GoldShare, rates.avg_gold_share, exp.gold_share);
            }
            push(Metric::DragonsPerGame, rates.avg_dragons, exp.dragons_per_game);
            push(Metric::TurretsPerGame, rates.avg_turrets, exp.turrets_per_game);
        }

        log::debug!(
            "Assessed {} metrics for {} at {}",
            results.len(),
            role,
            tier
        );

        AssessmentReport {
            role,
            tier,
            benchmark,
            results,
        }
    }
}

impl Default for PerformanceAssessor {
    fn default() -> Self {
        PerformanceAssessor::new(BenchmarkTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::StatsAggregator;
    use serde_json::json;

    #[test]
    fn labels_follow_thresholds() {
        let r = compare(6.0, 5.0);
        assert!((r.percent_delta - 20.0).abs() < 1e-9);
        assert_eq!(r.label, PerformanceLabel::Excellent);

        let r = compare(5.0, 5.0);
        assert_eq!(r.percent_delta, 0.0);
        assert_eq!(r.label, PerformanceLabel::Good);

        let r = compare(4.0, 5.0);
        assert!((r.percent_delta + 20.0).abs() < 1e-9);
        assert_eq!(r.absolute_delta, -1.0);
        assert_eq!(r.label, PerformanceLabel::NeedsImprovement);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(PerformanceLabel::from_percent_delta(10.0), PerformanceLabel::Excellent);
        assert_eq!(PerformanceLabel::from_percent_delta(9.99), PerformanceLabel::Good);
        assert_eq!(PerformanceLabel::from_percent_delta(-0.01), PerformanceLabel::BelowAverage);
        assert_eq!(PerformanceLabel::from_percent_delta(-15.0), PerformanceLabel::BelowAverage);
        assert_eq!(PerformanceLabel::from_percent_delta(-15.01), PerformanceLabel::NeedsImprovement);
    }

    #[test]
    fn zero_benchmark_has_no_delta() {
        let r = compare(3.0, 0.0);
        assert_eq!(r.percent_delta, 0.0);
        assert_eq!(r.absolute_delta, 3.0);
        assert_eq!(r.label, PerformanceLabel::Good);
    }

    #[test]
    fn empty_season_has_no_results() {
        let stats = StatsAggregator::default().aggregate(&[], "p");
        let report = PerformanceAssessor::default().assess(&stats, BenchmarkTier::Gold);
        assert!(report.results.is_empty());
        assert_eq!(report.role, Role::Middle);
    }

    #[test]
    fn uses_primary_role_targets_and_substituted_table() {
        let m = json!({
            "info": {
                "gameDuration": 1800, "gameCreation": 0,
                "participants": [{
                    "puuid": "p", "championName": "Garen", "teamId": 100, "win": true,
                    "kills": 3, "deaths": 1, "assists": 0, "goldEarned": 9000,
                    "totalDamageDealtToChampions": 15000,
                    "totalMinionsKilled": 180, "neutralMinionsKilled": 0,
                    "teamPosition": "TOP"
                }]
            }
        });
        let stats = StatsAggregator::default().aggregate(&[m], "p");
        let table = BenchmarkTable::empty()
            .with_targets(Role::Top, BenchmarkTier::Silver, 5.0, 1.0)
            .with_kda_target(BenchmarkTier::Silver, 2.0);
        let report = PerformanceAssessor::new(table).assess(&stats, BenchmarkTier::Silver);

        assert_eq!(report.role, Role::Top);
        let cs = report.get(Metric::CsPerMin).unwrap();
        assert!((cs.percent_delta - 20.0).abs() < 1e-9);
        assert_eq!(cs.label, PerformanceLabel::Excellent);
        assert_eq!(report.get(Metric::Kda).unwrap().label, PerformanceLabel::Excellent);
        // no vision data at all
        assert!(report.get(Metric::VisionPerMin).is_none());
        // both shares are 100 % of a one-player team against the fallback 20 %
        assert_eq!(report.count_with(PerformanceLabel::Excellent), 4);
        assert_eq!(report.count_with(PerformanceLabel::NeedsImprovement), 2);
    }
}
