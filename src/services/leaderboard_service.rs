use std::cmp::Ordering;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::leaderboard::{
    CriteriaWeights, DeveloperRewardRecord, LeaderboardEntry, LeaderboardRequest,
    LeaderboardResponse, RewardComponents,
};
use crate::services::metrics_normalizer::{
    has_reward_score, is_reserved_field, normalize_reward_record, read_reward_components,
};

/// Orders developers by reward score, highest first.
///
/// Produces a new sequence; the slice is left untouched. The sort is stable,
/// so equal scores keep their input order. Non-finite scores compare as 0.
/// Passthrough keys that would shadow `rank`, `developerId` or `rewardScore`
/// are dropped.
pub fn rank_by_reward(records: &[DeveloperRewardRecord]) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<&DeveloperRewardRecord> = records.iter().collect();
    ordered.sort_by(|a, b| compare_rewards_desc(a.reward_score, b.reward_score));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, record)| LeaderboardEntry {
            rank: index + 1,
            developer_id: record.developer_id.clone(),
            reward_score: record.reward_score,
            metrics: record
                .metrics
                .iter()
                .filter(|(key, _)| !is_reserved_field(key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        })
        .collect()
}

pub fn top_n(mut entries: Vec<LeaderboardEntry>, limit: Option<usize>) -> Vec<LeaderboardEntry> {
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    entries
}

/// Weighted mean of the three sub-scores.
pub fn compute_reward_score(
    components: &RewardComponents,
    weights: &CriteriaWeights,
) -> AppResult<f64> {
    validate_weights(weights)?;

    let weighted = components.priority_score * weights.priority_weight
        + components.due_time_score * weights.due_time_weight
        + components.ticket_load_score * weights.ticket_load_weight;
    let score = weighted / weights.total();

    Ok(if score.is_finite() { score } else { 0.0 })
}

pub fn validate_weights(weights: &CriteriaWeights) -> AppResult<()> {
    let values = [
        ("priorityWeight", weights.priority_weight),
        ("dueTimeWeight", weights.due_time_weight),
        ("ticketLoadWeight", weights.ticket_load_weight),
    ];

    for (name, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation_with_details(
                format!("criteria weight {name} must be a finite, non-negative number"),
                serde_json::json!({ "field": name }),
            ));
        }
    }

    if weights.total() <= 0.0 {
        return Err(AppError::validation("criteria weights must not all be zero"));
    }

    Ok(())
}

fn compare_rewards_desc(a: f64, b: f64) -> Ordering {
    comparable(b).total_cmp(&comparable(a))
}

fn comparable(score: f64) -> f64 {
    if score.is_finite() {
        // folds -0.0 into 0.0 so total_cmp does not split them
        score + 0.0
    } else {
        0.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LeaderboardService;

impl LeaderboardService {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes raw rows, fills in missing reward scores and ranks them.
    ///
    /// `default_limit` applies when the request does not carry its own limit.
    pub fn build(
        &self,
        request: LeaderboardRequest,
        default_limit: Option<usize>,
    ) -> AppResult<LeaderboardResponse> {
        if let Some(weights) = request.criteria_weights.as_ref() {
            validate_weights(weights)?;
        }
        let limit = request.limit.or(default_limit);
        if limit == Some(0) {
            return Err(AppError::validation("leaderboard limit must be at least 1"));
        }

        let records = request
            .developers
            .iter()
            .map(|row| self.normalize_row(row, request.criteria_weights.as_ref()))
            .collect::<AppResult<Vec<_>>>()?;

        let total_developers = records.len();
        let entries = top_n(rank_by_reward(&records), limit);

        info!(
            target: "app::leaderboard",
            total_developers,
            returned = entries.len(),
            "ranked leaderboard"
        );

        Ok(LeaderboardResponse {
            entries,
            total_developers,
            criteria_weights: request.criteria_weights,
        })
    }

    fn normalize_row(
        &self,
        row: &JsonValue,
        weights: Option<&CriteriaWeights>,
    ) -> AppResult<DeveloperRewardRecord> {
        let mut record = normalize_reward_record(row)?;

        if !has_reward_score(row) {
            if let (Some(components), Some(weights)) = (read_reward_components(row), weights) {
                record.reward_score = compute_reward_score(&components, weights)?;
                debug!(
                    target: "app::leaderboard",
                    developer_id = %record.developer_id,
                    reward_score = record.reward_score,
                    "derived reward score from sub-scores"
                );
            }
        }

        Ok(record)
    }
}
