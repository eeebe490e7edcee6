pub mod leaderboard;
pub mod metrics;
pub mod performance;
pub mod settings;
pub mod ticket;
