//! Maps loosely shaped API payloads onto the strict scoring inputs.
//!
//! Dashboard responses mix `camelCase`, `snake_case` and a handful of legacy
//! names, and send counters as numbers, strings or `null`. All of that is
//! resolved here so the scorer only ever sees [`DeveloperMetrics`].

use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::leaderboard::{DeveloperRewardRecord, RewardComponents};
use crate::models::metrics::DeveloperMetrics;

const TOTAL_ASSIGNED_TASKS: &[&str] = &["totalAssignedTasks", "assignedTasks", "totalTasks"];
const OVERDUE_TASKS: &[&str] = &["overdueTasks", "overdue"];
const TASK_COMPLETION_PERCENTAGE: &[&str] = &[
    "taskCompletionPercentage",
    "completionPercentage",
    "completionRate",
];
const COMPLETED_TASKS_RECENT: &[&str] = &["completedTasksLast7Days", "tasksCompletedLast7Days"];
const COMPLETED_ISSUES_RECENT: &[&str] = &["completedIssuesLast7Days", "issuesCompletedLast7Days"];
const TOTAL_ASSIGNED_ISSUES: &[&str] = &["totalAssignedIssues", "assignedIssues", "totalIssues"];
const ISSUES_IN_PROGRESS: &[&str] = &["issuesInProgress", "inProgressIssues"];
const CRITICAL_ISSUES: &[&str] = &["criticalIssues", "criticalIssueCount"];
const COMMENTS_RECENT: &[&str] = &[
    "commentsWrittenLast7Days",
    "commentsLast7Days",
    "recentComments",
];

const DEVELOPER_ID: &[&str] = &["developerId", "userId", "id"];
const REWARD_SCORE: &[&str] = &["rewardScore", "reward"];
const PRIORITY_SCORE: &[&str] = &["priorityScore"];
const DUE_TIME_SCORE: &[&str] = &["dueTimeScore", "dueScore"];
const TICKET_LOAD_SCORE: &[&str] = &["ticketLoadScore", "loadScore"];

/// Fields the leaderboard writes itself; never echoed from the input row.
const RESERVED_FIELDS: &[&str] = &["rank", "developerId", "rewardScore"];

pub fn normalize_metrics(payload: &JsonValue) -> AppResult<DeveloperMetrics> {
    let object = expect_object(payload, "developer metrics")?;

    Ok(DeveloperMetrics {
        total_assigned_tasks: read_count(object, TOTAL_ASSIGNED_TASKS),
        overdue_tasks: read_count(object, OVERDUE_TASKS),
        task_completion_percentage: read_number(object, TASK_COMPLETION_PERCENTAGE),
        completed_tasks_last7_days: read_count(object, COMPLETED_TASKS_RECENT),
        completed_issues_last7_days: read_count(object, COMPLETED_ISSUES_RECENT),
        total_assigned_issues: read_count(object, TOTAL_ASSIGNED_ISSUES),
        issues_in_progress: read_count(object, ISSUES_IN_PROGRESS),
        critical_issues: read_count(object, CRITICAL_ISSUES),
        comments_written_last7_days: read_count(object, COMMENTS_RECENT),
    })
}

/// Normalizes one leaderboard row.
///
/// The developer id and reward score are lifted out; every other key is kept
/// as-is so it can be echoed back next to the ranking, except keys that would
/// collide with the computed `rank`, `developerId` or `rewardScore`.
pub fn normalize_reward_record(payload: &JsonValue) -> AppResult<DeveloperRewardRecord> {
    let object = expect_object(payload, "leaderboard record")?;

    let (id_key, developer_id) = DEVELOPER_ID
        .iter()
        .find_map(|alias| {
            let (key, value) = find_field(object, &[alias])?;
            identifier_from_value(value).map(|id| (key, id))
        })
        .ok_or_else(|| {
            AppError::validation_with_details(
                "leaderboard record is missing a developer id",
                payload.clone(),
            )
        })?;

    let reward_key = find_field(object, REWARD_SCORE).map(|(key, _)| key);
    let reward_score = read_number(object, REWARD_SCORE);

    let metrics = object
        .iter()
        .filter(|(key, _)| {
            key.as_str() != id_key && Some(key.as_str()) != reward_key && !is_reserved_field(key)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(DeveloperRewardRecord {
        developer_id,
        reward_score,
        metrics,
    })
}

pub fn has_reward_score(payload: &JsonValue) -> bool {
    payload
        .as_object()
        .and_then(|object| find_field(object, REWARD_SCORE))
        .is_some()
}

/// True for keys that name a field the ranked entry computes itself.
pub fn is_reserved_field(key: &str) -> bool {
    let key = canonical_key(key);
    RESERVED_FIELDS
        .iter()
        .any(|reserved| canonical_key(reserved) == key)
}

pub fn read_reward_components(payload: &JsonValue) -> Option<RewardComponents> {
    let object = payload.as_object()?;
    let any_present = [PRIORITY_SCORE, DUE_TIME_SCORE, TICKET_LOAD_SCORE]
        .iter()
        .any(|aliases| find_field(object, aliases).is_some());
    if !any_present {
        return None;
    }

    Some(RewardComponents {
        priority_score: read_number(object, PRIORITY_SCORE),
        due_time_score: read_number(object, DUE_TIME_SCORE),
        ticket_load_score: read_number(object, TICKET_LOAD_SCORE),
    })
}

fn expect_object<'a>(payload: &'a JsonValue, what: &str) -> AppResult<&'a JsonMap<String, JsonValue>> {
    payload.as_object().ok_or_else(|| {
        AppError::validation_with_details(
            format!("{what} must be a JSON object"),
            serde_json::json!({ "receivedType": json_type_name(payload) }),
        )
    })
}

/// First non-null value under any alias, matching keys regardless of case,
/// `_` and `-`.
fn find_field<'a>(
    object: &'a JsonMap<String, JsonValue>,
    aliases: &[&str],
) -> Option<(&'a str, &'a JsonValue)> {
    aliases.iter().find_map(|alias| {
        let wanted = canonical_key(alias);
        object
            .iter()
            .find(|(key, value)| !value.is_null() && canonical_key(key) == wanted)
            .map(|(key, value)| (key.as_str(), value))
    })
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn read_number(object: &JsonMap<String, JsonValue>, aliases: &[&str]) -> f64 {
    find_field(object, aliases)
        .map(|(key, value)| {
            let number = coerce_number(value);
            if number.is_none() {
                debug!(target: "app::normalize", field = key, value = %value, "coercing non-numeric value to 0");
            }
            number.unwrap_or(0.0)
        })
        .unwrap_or(0.0)
}

fn read_count(object: &JsonMap<String, JsonValue>, aliases: &[&str]) -> u32 {
    let number = read_number(object, aliases);
    if number <= 0.0 {
        0
    } else if number >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        number.trunc() as u32
    }
}

fn coerce_number(value: &JsonValue) -> Option<f64> {
    let number = match value {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse::<f64>().ok(),
        JsonValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn identifier_from_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        JsonValue::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
