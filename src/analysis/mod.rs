pub mod aggregator;
pub mod assessor;
pub mod benchmarks;
pub mod champion_stats;
pub mod role;
