pub mod leaderboard_service;
pub mod metrics_aggregator;
pub mod metrics_normalizer;
pub mod performance_score_service;
pub mod settings_service;
