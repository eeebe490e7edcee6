use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::metrics::DeveloperMetrics;

/// Discrete tier bucketed from a rounded performance score.
///
/// Variants are declared lowest first so the derived `Ord` follows the tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PerformanceLevel {
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Fair,
    Good,
    Great,
    Excellent,
}

impl PerformanceLevel {
    pub const ALL: [PerformanceLevel; 5] = [
        PerformanceLevel::Excellent,
        PerformanceLevel::Great,
        PerformanceLevel::Good,
        PerformanceLevel::Fair,
        PerformanceLevel::NeedsImprovement,
    ];

    /// Inclusive lower thresholds, checked top-down.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => PerformanceLevel::Excellent,
            75..=89 => PerformanceLevel::Great,
            60..=74 => PerformanceLevel::Good,
            40..=59 => PerformanceLevel::Fair,
            _ => PerformanceLevel::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Great => "Great",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Fair => "Fair",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn min_score(&self) -> u8 {
        match self {
            PerformanceLevel::Excellent => 90,
            PerformanceLevel::Great => 75,
            PerformanceLevel::Good => 60,
            PerformanceLevel::Fair => 40,
            PerformanceLevel::NeedsImprovement => 0,
        }
    }

    /// Presentation tag the dashboard maps onto its own palette.
    pub fn accent(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "emerald",
            PerformanceLevel::Great => "blue",
            PerformanceLevel::Good => "yellow",
            PerformanceLevel::Fair => "orange",
            PerformanceLevel::NeedsImprovement => "red",
        }
    }
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PerformanceLevel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Excellent" => Ok(PerformanceLevel::Excellent),
            "Great" => Ok(PerformanceLevel::Great),
            "Good" => Ok(PerformanceLevel::Good),
            "Fair" => Ok(PerformanceLevel::Fair),
            "Needs Improvement" => Ok(PerformanceLevel::NeedsImprovement),
            other => Err(format!("unsupported performance level: {other}")),
        }
    }
}

/// Unclamped per-component contributions to the score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub completion: f64,
    pub overdue: f64,
    pub recent_productivity: f64,
    pub issue_resolution: f64,
    pub engagement: f64,
}

impl ScoreBreakdown {
    pub fn raw_total(&self) -> f64 {
        self.completion
            + self.overdue
            + self.recent_productivity
            + self.issue_resolution
            + self.engagement
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRating {
    pub score: u8,
    pub level: PerformanceLevel,
    pub accent: String,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperPerformance {
    pub developer_id: String,
    pub metrics: DeveloperMetrics,
    pub rating: PerformanceRating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPerformanceResponse {
    pub generated_at: String,
    pub window_days: u32,
    pub developers: Vec<DeveloperPerformance>,
    pub average_score: f64,
}
