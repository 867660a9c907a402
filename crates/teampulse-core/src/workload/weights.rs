//! Configurable weights and normalization ceilings for workload scoring.

use serde::{Deserialize, Serialize};

/// Per-signal multipliers plus the ceilings treated as 100% per category.
///
/// Immutable for the duration of one analysis run. Commit counts and the
/// in-progress/blocked item counts carry weights but no ceiling: they raise
/// the numerator without widening the denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadWeights {
    #[serde(default = "default_open_prs")]
    pub open_prs: f64,
    #[serde(default = "default_pending_reviews")]
    pub pending_reviews: f64,
    #[serde(default = "default_assigned_issues")]
    pub assigned_issues: f64,
    #[serde(default = "default_recent_commits")]
    pub recent_commits: f64,
    #[serde(default = "default_story_points")]
    pub story_points: f64,
    #[serde(default = "default_in_progress")]
    pub in_progress: f64,
    #[serde(default = "default_blocked")]
    pub blocked: f64,
    #[serde(default = "default_meeting_hours")]
    pub meeting_hours: f64,

    /// Ceilings: the per-signal value treated as 100% for that signal alone.
    #[serde(default = "default_max_open_prs")]
    pub max_open_prs: f64,
    #[serde(default = "default_max_pending_reviews")]
    pub max_pending_reviews: f64,
    #[serde(default = "default_max_assigned_issues")]
    pub max_assigned_issues: f64,
    #[serde(default = "default_max_story_points")]
    pub max_story_points: f64,
    #[serde(default = "default_max_meeting_hours")]
    pub max_meeting_hours: f64,
}

fn default_open_prs() -> f64 {
    3.0
}
fn default_pending_reviews() -> f64 {
    2.0
}
fn default_assigned_issues() -> f64 {
    2.0
}
fn default_recent_commits() -> f64 {
    0.5
}
fn default_story_points() -> f64 {
    1.0
}
fn default_in_progress() -> f64 {
    2.0
}
fn default_blocked() -> f64 {
    3.0
}
fn default_meeting_hours() -> f64 {
    0.5
}
fn default_max_open_prs() -> f64 {
    5.0
}
fn default_max_pending_reviews() -> f64 {
    8.0
}
fn default_max_assigned_issues() -> f64 {
    10.0
}
fn default_max_story_points() -> f64 {
    13.0
}
fn default_max_meeting_hours() -> f64 {
    20.0
}

impl Default for WorkloadWeights {
    fn default() -> Self {
        Self {
            open_prs: default_open_prs(),
            pending_reviews: default_pending_reviews(),
            assigned_issues: default_assigned_issues(),
            recent_commits: default_recent_commits(),
            story_points: default_story_points(),
            in_progress: default_in_progress(),
            blocked: default_blocked(),
            meeting_hours: default_meeting_hours(),
            max_open_prs: default_max_open_prs(),
            max_pending_reviews: default_max_pending_reviews(),
            max_assigned_issues: default_max_assigned_issues(),
            max_story_points: default_max_story_points(),
            max_meeting_hours: default_max_meeting_hours(),
        }
    }
}

impl WorkloadWeights {
    /// Theoretical maximum score: the sum of ceiling x weight over the five
    /// ceiling-bearing signals. Fixed per analysis run.
    pub fn max_score(&self) -> f64 {
        self.max_open_prs * self.open_prs
            + self.max_pending_reviews * self.pending_reviews
            + self.max_assigned_issues * self.assigned_issues
            + self.max_story_points * self.story_points
            + self.max_meeting_hours * self.meeting_hours
    }
}
