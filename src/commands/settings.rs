use serde::Deserialize;

use crate::models::leaderboard::CriteriaWeights;
use crate::models::settings::ScoringSettings;
use crate::services::settings_service::SettingsUpdateInput;

use super::{run_blocking, AppState, CommandResult};

pub async fn settings_get(state: &AppState) -> CommandResult<ScoringSettings> {
    let app_state = state.clone();
    run_blocking(move || app_state.settings().get()).await
}

pub async fn settings_update(
    state: &AppState,
    payload: SettingsUpdatePayload,
) -> CommandResult<ScoringSettings> {
    let app_state = state.clone();
    let input = payload.into_input();
    run_blocking(move || app_state.settings().update(input)).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdatePayload {
    #[serde(default)]
    pub activity_window_days: Option<u32>,
    #[serde(default)]
    pub leaderboard_limit: Option<usize>,
    #[serde(default)]
    pub clear_leaderboard_limit: Option<bool>,
    #[serde(default)]
    pub criteria_weights: Option<CriteriaWeights>,
    #[serde(default)]
    pub log_directives: Option<String>,
}

impl SettingsUpdatePayload {
    fn into_input(self) -> SettingsUpdateInput {
        let leaderboard_limit = if self.clear_leaderboard_limit == Some(true) {
            Some(None)
        } else {
            self.leaderboard_limit.map(Some)
        };

        SettingsUpdateInput {
            activity_window_days: self.activity_window_days,
            leaderboard_limit,
            criteria_weights: self.criteria_weights,
            log_directives: self.log_directives,
        }
    }
}
