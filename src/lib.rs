pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::leaderboard::{CriteriaWeights, DeveloperRewardRecord, LeaderboardEntry};
pub use models::metrics::DeveloperMetrics;
pub use models::performance::{PerformanceLevel, PerformanceRating};
pub use services::leaderboard_service::rank_by_reward;
pub use services::performance_score_service::{
    calculate_performance_rating, calculate_performance_score, classify_performance,
};
