use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::metrics::DeveloperMetrics;
use crate::models::settings::{DEFAULT_ACTIVITY_WINDOW_DAYS, MAX_ACTIVITY_WINDOW_DAYS};
use crate::models::ticket::{CommentRecord, TicketKind, TicketPriority, TicketRecord};

/// Derives per-developer counters from ticket and comment activity.
#[derive(Debug, Clone, Copy)]
pub struct MetricsAggregator {
    window_days: u32,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_ACTIVITY_WINDOW_DAYS,
        }
    }
}

impl MetricsAggregator {
    pub fn new(window_days: u32) -> AppResult<Self> {
        if window_days == 0 || window_days > MAX_ACTIVITY_WINDOW_DAYS {
            return Err(AppError::validation(format!(
                "activity window must be between 1 and {MAX_ACTIVITY_WINDOW_DAYS} days"
            )));
        }
        Ok(Self { window_days })
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn aggregate(
        &self,
        developer_id: &str,
        tickets: &[TicketRecord],
        comments: &[CommentRecord],
        now: DateTime<Utc>,
    ) -> DeveloperMetrics {
        let window_start = now - Duration::days(i64::from(self.window_days));
        let in_window = |timestamp: Option<&str>| {
            parse_timestamp(timestamp)
                .map(|at| at > window_start && at <= now)
                .unwrap_or(false)
        };

        let mut metrics = DeveloperMetrics::default();
        let mut done_tasks: u32 = 0;

        for ticket in tickets.iter().filter(|t| t.is_assigned_to(developer_id)) {
            let done = ticket.status.is_done();
            match ticket.kind {
                TicketKind::Task => {
                    metrics.total_assigned_tasks += 1;
                    if done {
                        done_tasks += 1;
                        if in_window(ticket.completed_at.as_deref()) {
                            metrics.completed_tasks_last7_days += 1;
                        }
                    } else if parse_timestamp(ticket.due_at.as_deref())
                        .map(|due| due < now)
                        .unwrap_or(false)
                    {
                        metrics.overdue_tasks += 1;
                    }
                }
                TicketKind::Issue => {
                    metrics.total_assigned_issues += 1;
                    if done {
                        if in_window(ticket.completed_at.as_deref()) {
                            metrics.completed_issues_last7_days += 1;
                        }
                    } else {
                        if ticket.status.is_active() {
                            metrics.issues_in_progress += 1;
                        }
                        if ticket.priority == TicketPriority::Critical {
                            metrics.critical_issues += 1;
                        }
                    }
                }
            }
        }

        if metrics.total_assigned_tasks > 0 {
            metrics.task_completion_percentage =
                f64::from(done_tasks) / f64::from(metrics.total_assigned_tasks) * 100.0;
        }

        metrics.comments_written_last7_days = comments
            .iter()
            .filter(|c| c.author_id == developer_id && in_window(Some(c.created_at.as_str())))
            .count()
            .try_into()
            .unwrap_or(u32::MAX);

        debug!(
            target: "app::aggregate",
            developer_id,
            window_days = self.window_days,
            total_tasks = metrics.total_assigned_tasks,
            total_issues = metrics.total_assigned_issues,
            "aggregated developer metrics"
        );

        metrics
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(err) => {
            debug!(target: "app::aggregate", value = raw, error = %err, "skipping unparseable timestamp");
            None
        }
    }
}
