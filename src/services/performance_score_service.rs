use tracing::debug;

use crate::models::metrics::DeveloperMetrics;
use crate::models::performance::{
    DeveloperPerformance, PerformanceLevel, PerformanceRating, ScoreBreakdown,
};

const COMPLETION_POINTS: f64 = 50.0;
const OVERDUE_POINTS: f64 = 30.0;
const RECENT_POINTS_CAP: f64 = 10.0;
const RECENT_POINTS_PER_COMPLETION: f64 = 2.0;
const RECENT_IDLE_POINTS: f64 = 5.0;
const ISSUE_POINTS: f64 = 5.0;
const ENGAGEMENT_POINTS_CAP: f64 = 5.0;
const ENGAGEMENT_POINTS_PER_COMMENT: f64 = 0.5;
const ENGAGEMENT_IDLE_POINTS: f64 = 2.5;

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// Computes the bounded 0..=100 performance score for one developer.
///
/// Total over every input: the percentage is coerced to 0 when not finite and
/// only the final sum is clamped.
pub fn calculate_performance_score(metrics: &DeveloperMetrics) -> u8 {
    finalize_score(score_breakdown(metrics).raw_total())
}

pub fn classify_performance(score: u8) -> PerformanceLevel {
    PerformanceLevel::from_score(score)
}

/// Score, tier and the per-component contributions behind them.
pub fn calculate_performance_rating(metrics: &DeveloperMetrics) -> PerformanceRating {
    let breakdown = score_breakdown(metrics);
    let score = finalize_score(breakdown.raw_total());
    let level = classify_performance(score);

    debug!(
        target: "app::performance",
        score,
        level = %level,
        raw_total = breakdown.raw_total(),
        "calculated performance rating"
    );

    PerformanceRating {
        score,
        level,
        accent: level.accent().to_string(),
        breakdown,
    }
}

pub fn score_breakdown(metrics: &DeveloperMetrics) -> ScoreBreakdown {
    ScoreBreakdown {
        completion: completion_points(metrics),
        overdue: overdue_points(metrics),
        recent_productivity: recent_productivity_points(metrics),
        issue_resolution: issue_resolution_points(metrics),
        engagement: engagement_points(metrics),
    }
}

fn completion_points(metrics: &DeveloperMetrics) -> f64 {
    (finite_or_zero(metrics.task_completion_percentage) / 100.0) * COMPLETION_POINTS
}

fn overdue_points(metrics: &DeveloperMetrics) -> f64 {
    let overdue_ratio = if metrics.total_assigned_tasks == 0 {
        0.0
    } else {
        f64::from(metrics.overdue_tasks) / f64::from(metrics.total_assigned_tasks)
    };
    (OVERDUE_POINTS - overdue_ratio * OVERDUE_POINTS).max(0.0)
}

fn recent_productivity_points(metrics: &DeveloperMetrics) -> f64 {
    if metrics.total_assigned_tasks == 0 {
        return RECENT_IDLE_POINTS;
    }
    (metrics.recent_completions() as f64 * RECENT_POINTS_PER_COMPLETION).min(RECENT_POINTS_CAP)
}

// Goes negative when in-progress plus critical exceeds the assigned total.
fn issue_resolution_points(metrics: &DeveloperMetrics) -> f64 {
    if metrics.total_assigned_issues == 0 {
        return ISSUE_POINTS;
    }
    let total = f64::from(metrics.total_assigned_issues);
    let resolved =
        total - f64::from(metrics.issues_in_progress) - f64::from(metrics.critical_issues);
    (resolved / total) * ISSUE_POINTS
}

fn engagement_points(metrics: &DeveloperMetrics) -> f64 {
    if metrics.comments_written_last7_days == 0 {
        return ENGAGEMENT_IDLE_POINTS;
    }
    (f64::from(metrics.comments_written_last7_days) * ENGAGEMENT_POINTS_PER_COMMENT)
        .min(ENGAGEMENT_POINTS_CAP)
}

fn finalize_score(raw_total: f64) -> u8 {
    let bounded = finite_or_zero(raw_total).clamp(MIN_SCORE, MAX_SCORE);
    // exact halves go to the even neighbour: the idle total 42.5 must give 42, not 43
    bounded.round_ties_even() as u8
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Stateless facade the command layer shares across handlers.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerformanceScoreService;

impl PerformanceScoreService {
    pub fn new() -> Self {
        Self
    }

    pub fn rate(&self, metrics: &DeveloperMetrics) -> PerformanceRating {
        calculate_performance_rating(metrics)
    }

    /// Rates every developer and orders them by score, best first.
    ///
    /// Equal scores keep the order they were supplied in.
    pub fn rate_team(
        &self,
        developers: Vec<(String, DeveloperMetrics)>,
    ) -> Vec<DeveloperPerformance> {
        let mut rated: Vec<DeveloperPerformance> = developers
            .into_iter()
            .map(|(developer_id, metrics)| {
                let rating = calculate_performance_rating(&metrics);
                DeveloperPerformance {
                    developer_id,
                    metrics,
                    rating,
                }
            })
            .collect();

        rated.sort_by(|a, b| b.rating.score.cmp(&a.rating.score));
        rated
    }

    pub fn average_score(performances: &[DeveloperPerformance]) -> f64 {
        if performances.is_empty() {
            return 0.0;
        }
        let total: f64 = performances
            .iter()
            .map(|performance| f64::from(performance.rating.score))
            .sum();
        total / performances.len() as f64
    }
}
