use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::models::performance::{PerformanceRating, TeamPerformanceResponse};
use crate::models::ticket::TeamActivityInput;
use crate::services::metrics_normalizer::normalize_metrics;
use crate::services::performance_score_service::PerformanceScoreService;

use super::{run_blocking, AppState, CommandResult};

/// Scores one developer from a raw metrics payload.
pub async fn performance_rating_compute(
    state: &AppState,
    payload: JsonValue,
) -> CommandResult<PerformanceRating> {
    let app_state = state.clone();
    run_blocking(move || {
        let metrics = normalize_metrics(&payload)?;
        Ok(app_state.performance().rate(&metrics))
    })
    .await
}

/// Aggregates ticket activity per developer and scores the whole team.
pub async fn performance_team_overview(
    state: &AppState,
    input: TeamActivityInput,
) -> CommandResult<TeamPerformanceResponse> {
    let app_state = state.clone();
    run_blocking(move || {
        let now = match input.as_of.as_deref() {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|parsed| parsed.with_timezone(&Utc))
                .map_err(|err| {
                    AppError::validation_with_details(
                        format!("asOf must be an RFC 3339 timestamp: {err}"),
                        serde_json::json!({ "asOf": raw }),
                    )
                })?,
            None => Utc::now(),
        };

        let aggregator = app_state.aggregator()?;
        let developers = input
            .developer_ids
            .iter()
            .map(|developer_id| {
                let metrics =
                    aggregator.aggregate(developer_id, &input.tickets, &input.comments, now);
                (developer_id.clone(), metrics)
            })
            .collect();

        let rated = app_state.performance().rate_team(developers);
        let average_score = PerformanceScoreService::average_score(&rated);

        Ok(TeamPerformanceResponse {
            generated_at: now.to_rfc3339(),
            window_days: aggregator.window_days(),
            developers: rated,
            average_score,
        })
    })
    .await
}
