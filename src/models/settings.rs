use serde::{Deserialize, Serialize};

use crate::models::leaderboard::CriteriaWeights;

pub const DEFAULT_ACTIVITY_WINDOW_DAYS: u32 = 7;
pub const MAX_ACTIVITY_WINDOW_DAYS: u32 = 90;
pub const DEFAULT_LOG_DIRECTIVES: &str = "info,app::performance=debug";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSettings {
    #[serde(default = "default_activity_window_days")]
    pub activity_window_days: u32,
    #[serde(default)]
    pub leaderboard_limit: Option<usize>,
    #[serde(default)]
    pub criteria_weights: CriteriaWeights,
    #[serde(default = "default_log_directives")]
    pub log_directives: String,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            activity_window_days: DEFAULT_ACTIVITY_WINDOW_DAYS,
            leaderboard_limit: None,
            criteria_weights: CriteriaWeights::default(),
            log_directives: default_log_directives(),
        }
    }
}

fn default_activity_window_days() -> u32 {
    DEFAULT_ACTIVITY_WINDOW_DAYS
}

fn default_log_directives() -> String {
    DEFAULT_LOG_DIRECTIVES.to_string()
}
