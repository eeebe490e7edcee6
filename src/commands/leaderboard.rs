use crate::models::leaderboard::{LeaderboardRequest, LeaderboardResponse};

use super::{run_blocking, AppState, CommandResult};

pub async fn leaderboard_rank(
    state: &AppState,
    request: LeaderboardRequest,
) -> CommandResult<LeaderboardResponse> {
    let app_state = state.clone();
    run_blocking(move || {
        let default_limit = app_state.settings().get()?.leaderboard_limit;
        app_state.leaderboard().build(request, default_limit)
    })
    .await
}
