use futures::future::join_all;
use pulseboard::commands::leaderboard::leaderboard_rank;
use pulseboard::commands::performance::{performance_rating_compute, performance_team_overview};
use pulseboard::commands::settings::{settings_get, settings_update, SettingsUpdatePayload};
use pulseboard::commands::AppState;
use pulseboard::models::leaderboard::LeaderboardRequest;
use pulseboard::models::ticket::TeamActivityInput;
use pulseboard::PerformanceLevel;
use serde_json::json;

#[tokio::test]
async fn test_rating_command_normalizes_payload() {
    let state = AppState::default();

    let rating = performance_rating_compute(
        &state,
        json!({
            "total_assigned_tasks": "10",
            "taskCompletionPercentage": 100,
            "completedTasksLast7Days": 5,
            "completedIssuesLast7Days": 5,
            "commentsWrittenLast7Days": 10
        }),
    )
    .await
    .unwrap();

    assert_eq!(rating.score, 100);
    assert_eq!(rating.level, PerformanceLevel::Excellent);
}

#[tokio::test]
async fn test_rating_command_rejects_non_object() {
    let state = AppState::default();
    let err = performance_rating_compute(&state, json!("metrics"))
        .await
        .unwrap_err();

    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(err.details.unwrap()["receivedType"], "string");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ratings_are_deterministic() {
    let state = AppState::default();
    let payload = json!({
        "totalAssignedTasks": 6,
        "overdueTasks": 2,
        "taskCompletionPercentage": 50,
        "totalAssignedIssues": 3,
        "issuesInProgress": 1,
        "commentsWrittenLast7Days": 3
    });

    let calls = (0..32).map(|_| performance_rating_compute(&state, payload.clone()));
    let results = join_all(calls).await;

    let scores: Vec<u8> = results.into_iter().map(|r| r.unwrap().score).collect();
    assert!(scores.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_team_overview_ranks_developers() {
    let state = AppState::default();
    let input: TeamActivityInput = serde_json::from_value(json!({
        "developerIds": ["quiet", "busy"],
        "asOf": "2025-05-20T10:00:00Z",
        "tickets": [
            { "id": "t1", "kind": "task", "status": "done", "assigneeIds": ["busy"], "completedAt": "2025-05-19T10:00:00Z" },
            { "id": "t2", "kind": "task", "status": "done", "assigneeIds": ["busy"], "completedAt": "2025-05-18T10:00:00Z" }
        ],
        "comments": [
            { "id": "c1", "ticketId": "t1", "authorId": "busy", "createdAt": "2025-05-19T11:00:00Z" }
        ]
    }))
    .unwrap();

    let overview = performance_team_overview(&state, input).await.unwrap();

    assert_eq!(overview.window_days, 7);
    assert_eq!(overview.developers.len(), 2);
    assert_eq!(overview.developers[0].developer_id, "busy");
    // 50 + 30 + 4 + 5 + 0.5
    assert_eq!(overview.developers[0].rating.score, 90);
    assert_eq!(overview.developers[1].developer_id, "quiet");
    assert_eq!(overview.developers[1].rating.score, 42);
    assert!((overview.average_score - 66.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_team_overview_rejects_bad_reference_time() {
    let state = AppState::default();
    let input = TeamActivityInput {
        developer_ids: vec!["dev".to_string()],
        as_of: Some("last tuesday".to_string()),
        ..Default::default()
    };

    let err = performance_team_overview(&state, input).await.unwrap_err();
    assert_eq!(err.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_leaderboard_uses_configured_default_limit() {
    let state = AppState::default();
    settings_update(
        &state,
        SettingsUpdatePayload {
            leaderboard_limit: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let request = LeaderboardRequest {
        developers: vec![
            json!({ "developerId": "a", "rewardScore": 10 }),
            json!({ "developerId": "b", "rewardScore": 30 }),
            json!({ "developerId": "c", "rewardScore": 20 }),
        ],
        ..Default::default()
    };

    let response = leaderboard_rank(&state, request).await.unwrap();
    let ids: Vec<&str> = response
        .entries
        .iter()
        .map(|e| e.developer_id.as_str())
        .collect();
    assert_eq!(ids, vec!["b", "c"]);
    assert_eq!(response.total_developers, 3);
}

#[tokio::test]
async fn test_settings_window_feeds_team_overview() {
    let state = AppState::default();
    let updated = settings_update(
        &state,
        SettingsUpdatePayload {
            activity_window_days: Some(30),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.activity_window_days, 30);
    assert_eq!(settings_get(&state).await.unwrap().activity_window_days, 30);

    let input: TeamActivityInput = serde_json::from_value(json!({
        "developerIds": ["dev"],
        "asOf": "2025-05-20T10:00:00Z",
        "comments": [
            { "id": "c1", "ticketId": "t1", "authorId": "dev", "createdAt": "2025-05-01T10:00:00Z" }
        ]
    }))
    .unwrap();

    let overview = performance_team_overview(&state, input).await.unwrap();
    assert_eq!(overview.window_days, 30);
    assert_eq!(overview.developers[0].metrics.comments_written_last7_days, 1);
}

#[tokio::test]
async fn test_settings_update_rejects_zero_limit() {
    let state = AppState::default();
    let err = settings_update(
        &state,
        SettingsUpdatePayload {
            leaderboard_limit: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(settings_get(&state).await.unwrap().leaderboard_limit, None);
}
