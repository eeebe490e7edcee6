pub mod leaderboard;
pub mod performance;
pub mod settings;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::error::{AppError, AppResult};
use crate::services::leaderboard_service::LeaderboardService;
use crate::services::metrics_aggregator::MetricsAggregator;
use crate::services::performance_score_service::PerformanceScoreService;
use crate::services::settings_service::SettingsService;

/// Shared handles for the request handlers; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    settings_service: Arc<SettingsService>,
    performance_service: Arc<PerformanceScoreService>,
    leaderboard_service: Arc<LeaderboardService>,
}

impl AppState {
    pub fn new(settings_service: SettingsService) -> Self {
        Self {
            settings_service: Arc::new(settings_service),
            performance_service: Arc::new(PerformanceScoreService::new()),
            leaderboard_service: Arc::new(LeaderboardService::new()),
        }
    }

    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings_service)
    }

    pub fn performance(&self) -> Arc<PerformanceScoreService> {
        Arc::clone(&self.performance_service)
    }

    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard_service)
    }

    /// Aggregator sized to the currently configured activity window.
    pub fn aggregator(&self) -> AppResult<MetricsAggregator> {
        let settings = self.settings_service.get()?;
        MetricsAggregator::new(settings.activity_window_days)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SettingsService::new())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation {
                message, details, ..
            } => CommandError::new("VALIDATION_ERROR", message, details),
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "requested resource does not exist", None)
            }
            AppError::Config { message } => {
                warn!(target: "app::command", %message, "configuration error in command");
                CommandError::new("CONFIG_ERROR", message, None)
            }
            AppError::Serialization(error) => {
                error!(target: "app::command", error = %error, "serialization error in command");
                CommandError::new("UNKNOWN", "serialization failed", None)
            }
            AppError::Yaml(error) => {
                error!(target: "app::command", error = %error, "yaml error in command");
                CommandError::new("CONFIG_ERROR", "settings file could not be parsed", None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "file system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}

pub(crate) async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("scoring task failed: {err}"), None))?
        .map_err(CommandError::from)
}
