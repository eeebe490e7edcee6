use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Weights the upstream reward score was derived with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaWeights {
    pub priority_weight: f64,
    pub due_time_weight: f64,
    pub ticket_load_weight: f64,
}

impl Default for CriteriaWeights {
    fn default() -> Self {
        Self {
            priority_weight: 0.4,
            due_time_weight: 0.35,
            ticket_load_weight: 0.25,
        }
    }
}

impl CriteriaWeights {
    pub fn total(&self) -> f64 {
        self.priority_weight + self.due_time_weight + self.ticket_load_weight
    }
}

/// Sub-scores a reward score is combined from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RewardComponents {
    pub priority_score: f64,
    pub due_time_score: f64,
    pub ticket_load_score: f64,
}

/// Normalized ranking input: identity, reward score, and whatever else the
/// caller sent along, kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperRewardRecord {
    pub developer_id: String,
    pub reward_score: f64,
    #[serde(flatten)]
    pub metrics: JsonMap<String, JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub developer_id: String,
    pub reward_score: f64,
    #[serde(flatten)]
    pub metrics: JsonMap<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRequest {
    #[serde(default)]
    pub developers: Vec<JsonValue>,
    #[serde(default)]
    pub criteria_weights: Option<CriteriaWeights>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub total_developers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria_weights: Option<CriteriaWeights>,
}
