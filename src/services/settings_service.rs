use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};
use crate::models::leaderboard::CriteriaWeights;
use crate::models::settings::{ScoringSettings, MAX_ACTIVITY_WINDOW_DAYS};
use crate::services::leaderboard_service::validate_weights;

/// Partial update; `leaderboard_limit: Some(None)` clears the limit.
#[derive(Debug, Default, Clone)]
pub struct SettingsUpdateInput {
    pub activity_window_days: Option<u32>,
    pub leaderboard_limit: Option<Option<usize>>,
    pub criteria_weights: Option<CriteriaWeights>,
    pub log_directives: Option<String>,
}

/// Scoring settings, optionally backed by a YAML file.
pub struct SettingsService {
    path: Option<PathBuf>,
    cache: RwLock<ScoringSettings>,
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsService {
    /// In-memory settings with defaults; updates are not persisted.
    pub fn new() -> Self {
        Self {
            path: None,
            cache: RwLock::new(ScoringSettings::default()),
        }
    }

    /// Loads settings from `path`; a missing file yields defaults and is
    /// created on the first update.
    pub fn from_file(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let settings = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                ScoringSettings::default()
            } else {
                serde_yaml::from_str::<ScoringSettings>(&raw)?
            }
        } else {
            warn!(target: "app::settings", path = %path.display(), "settings file not found, using defaults");
            ScoringSettings::default()
        };

        ensure_valid(&settings)?;
        info!(target: "app::settings", path = %path.display(), "loaded scoring settings");

        Ok(Self {
            path: Some(path),
            cache: RwLock::new(settings),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self) -> AppResult<ScoringSettings> {
        self.cache
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| AppError::other("settings lock poisoned"))
    }

    pub fn update(&self, input: SettingsUpdateInput) -> AppResult<ScoringSettings> {
        let mut guard = self
            .cache
            .write()
            .map_err(|_| AppError::other("settings lock poisoned"))?;
        let mut next = guard.clone();

        if let Some(days) = input.activity_window_days {
            next.activity_window_days = days;
        }
        if let Some(limit) = input.leaderboard_limit {
            next.leaderboard_limit = limit;
        }
        if let Some(weights) = input.criteria_weights {
            next.criteria_weights = weights;
        }
        if let Some(directives) = input.log_directives {
            next.log_directives = directives.trim().to_string();
        }

        ensure_valid(&next)?;

        if let Some(path) = self.path.as_ref() {
            persist(path, &next)?;
        }

        *guard = next.clone();
        info!(target: "app::settings", "scoring settings updated");
        Ok(next)
    }
}

fn ensure_valid(settings: &ScoringSettings) -> AppResult<()> {
    if settings.activity_window_days == 0
        || settings.activity_window_days > MAX_ACTIVITY_WINDOW_DAYS
    {
        return Err(AppError::validation_with_details(
            format!("activityWindowDays must be between 1 and {MAX_ACTIVITY_WINDOW_DAYS}"),
            serde_json::json!({ "activityWindowDays": settings.activity_window_days }),
        ));
    }

    if settings.leaderboard_limit == Some(0) {
        return Err(AppError::validation("leaderboardLimit must be at least 1"));
    }

    validate_weights(&settings.criteria_weights)?;

    if settings.log_directives.is_empty() {
        return Err(AppError::validation("logDirectives must not be empty"));
    }
    EnvFilter::try_new(&settings.log_directives)
        .map_err(|err| AppError::validation(format!("invalid logDirectives: {err}")))?;

    Ok(())
}

fn persist(path: &Path, settings: &ScoringSettings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let yaml = serde_yaml::to_string(settings)?;
    fs::write(path, yaml)?;
    Ok(())
}
