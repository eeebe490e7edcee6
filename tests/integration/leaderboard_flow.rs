use pulseboard::models::leaderboard::{CriteriaWeights, LeaderboardRequest};
use pulseboard::services::leaderboard_service::{rank_by_reward, LeaderboardService};
use pulseboard::services::metrics_normalizer::normalize_reward_record;
use serde_json::json;

#[test]
fn test_rank_raw_rows_end_to_end() {
    let rows = vec![
        json!({ "developerId": "ana", "rewardScore": 61.2, "openTickets": 4 }),
        json!({ "developer_id": "bo", "reward_score": "88.0", "openTickets": 2 }),
        json!({ "userId": "cy", "rewardScore": 61.2, "openTickets": 7 }),
        json!({ "id": 17, "rewardScore": null }),
    ];

    let records = rows
        .iter()
        .map(normalize_reward_record)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let ranked = rank_by_reward(&records);

    let order: Vec<&str> = ranked.iter().map(|e| e.developer_id.as_str()).collect();
    assert_eq!(order, vec!["bo", "ana", "cy", "17"]);
    assert_eq!(ranked[0].metrics["openTickets"], 2);
    assert_eq!(ranked[3].reward_score, 0.0);
}

#[test]
fn test_ranked_output_serializes_flat() {
    let records = vec![normalize_reward_record(&json!({
        "developerId": "ana",
        "rewardScore": 12,
        "name": "Ana",
        "completedTickets": 9
    }))
    .unwrap()];

    let value = serde_json::to_value(rank_by_reward(&records)).unwrap();
    assert_eq!(
        value,
        json!([{
            "rank": 1,
            "developerId": "ana",
            "rewardScore": 12.0,
            "name": "Ana",
            "completedTickets": 9
        }])
    );
}

#[test]
fn test_resubmitted_board_gets_fresh_ranks() {
    let records = vec![
        normalize_reward_record(&json!({ "developerId": "a", "rewardScore": 1, "rank": 1 })).unwrap(),
        normalize_reward_record(&json!({ "developerId": "b", "rewardScore": 9, "rank": 2 })).unwrap(),
    ];
    let ranked = rank_by_reward(&records);

    let value = serde_json::to_value(&ranked).unwrap();
    assert_eq!(
        value,
        json!([
            { "rank": 1, "developerId": "b", "rewardScore": 9.0 },
            { "rank": 2, "developerId": "a", "rewardScore": 1.0 }
        ])
    );

    let text = serde_json::to_string(&ranked[0]).unwrap();
    assert_eq!(text.matches("\"rank\"").count(), 1);
}

#[test]
fn test_null_id_alias_does_not_sink_the_board() {
    let response = LeaderboardService::new()
        .build(
            LeaderboardRequest {
                developers: vec![
                    json!({ "developerId": null, "id": "dev-9", "rewardScore": 3 }),
                    json!({ "developerId": "dev-2", "rewardScore": null, "reward": 5 }),
                ],
                ..Default::default()
            },
            None,
        )
        .unwrap();

    let order: Vec<&str> = response
        .entries
        .iter()
        .map(|e| e.developer_id.as_str())
        .collect();
    assert_eq!(order, vec!["dev-2", "dev-9"]);
    assert_eq!(response.entries[0].reward_score, 5.0);
    assert!(response.entries[1].metrics.is_empty());
}

#[test]
fn test_build_with_weights_from_request_json() {
    let request: LeaderboardRequest = serde_json::from_value(json!({
        "developers": [
            { "developerId": "a", "priorityScore": 90, "dueTimeScore": 10, "ticketLoadScore": 50 },
            { "developerId": "b", "priorityScore": 20, "dueTimeScore": 80, "ticketLoadScore": 50 },
            { "developerId": "c", "rewardScore": 40 }
        ],
        "criteriaWeights": { "priorityWeight": 0.5, "dueTimeWeight": 0.25, "ticketLoadWeight": 0.25 },
        "limit": 2
    }))
    .unwrap();

    let response = LeaderboardService::new().build(request, None).unwrap();

    // a: 45 + 2.5 + 12.5 = 60, b: 10 + 20 + 12.5 = 42.5
    assert_eq!(response.total_developers, 3);
    assert_eq!(response.entries.len(), 2);
    assert_eq!(response.entries[0].developer_id, "a");
    assert!((response.entries[0].reward_score - 60.0).abs() < 1e-9);
    assert_eq!(response.entries[1].developer_id, "b");
    assert_eq!(
        response.criteria_weights,
        Some(CriteriaWeights {
            priority_weight: 0.5,
            due_time_weight: 0.25,
            ticket_load_weight: 0.25,
        })
    );
}

#[test]
fn test_without_weights_sub_scores_are_passthrough_only() {
    let request = LeaderboardRequest {
        developers: vec![
            json!({ "developerId": "a", "priorityScore": 90 }),
            json!({ "developerId": "b", "rewardScore": 1 }),
        ],
        criteria_weights: None,
        limit: None,
    };

    let response = LeaderboardService::new().build(request, None).unwrap();
    assert_eq!(response.entries[0].developer_id, "b");
    assert_eq!(response.entries[1].reward_score, 0.0);
    assert_eq!(response.entries[1].metrics["priorityScore"], 90);
}

#[test]
fn test_empty_request_yields_empty_board() {
    let response = LeaderboardService::new()
        .build(LeaderboardRequest::default(), Some(10))
        .unwrap();
    assert!(response.entries.is_empty());
    assert_eq!(response.total_developers, 0);
}
