use serde::{Deserialize, Serialize};

/// Per-developer activity counters for one reporting period.
///
/// Built either by [`crate::services::metrics_normalizer`] from a raw API
/// payload or by [`crate::services::metrics_aggregator`] from ticket activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperMetrics {
    #[serde(default)]
    pub total_assigned_tasks: u32,
    #[serde(default)]
    pub overdue_tasks: u32,
    #[serde(default)]
    pub task_completion_percentage: f64,
    #[serde(default)]
    pub completed_tasks_last7_days: u32,
    #[serde(default)]
    pub completed_issues_last7_days: u32,
    #[serde(default)]
    pub total_assigned_issues: u32,
    #[serde(default)]
    pub issues_in_progress: u32,
    #[serde(default)]
    pub critical_issues: u32,
    #[serde(default)]
    pub comments_written_last7_days: u32,
}

impl DeveloperMetrics {
    pub fn recent_completions(&self) -> u64 {
        u64::from(self.completed_tasks_last7_days) + u64::from(self.completed_issues_last7_days)
    }
}
