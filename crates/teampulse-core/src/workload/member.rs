//! Per-member workload records and the team-level summary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::stats;

/// Health band for a member's workload percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadStatus {
    Healthy,
    AtCapacity,
    Overloaded,
}

impl WorkloadStatus {
    /// Band boundaries: [0, 80) healthy, [80, 100) at capacity, 100+ overloaded.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            WorkloadStatus::Overloaded
        } else if percentage >= 80.0 {
            WorkloadStatus::AtCapacity
        } else {
            WorkloadStatus::Healthy
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkloadStatus::Healthy => "🟢",
            WorkloadStatus::AtCapacity => "🟡",
            WorkloadStatus::Overloaded => "🔴",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkloadStatus::Healthy => "Healthy",
            WorkloadStatus::AtCapacity => "At capacity",
            WorkloadStatus::Overloaded => "Overloaded",
        }
    }
}

/// One team member's merged activity signals plus the derived score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberWorkload {
    pub name: String,
    pub email: Option<String>,

    pub open_prs: u32,
    pub pending_reviews: u32,
    pub assigned_issues: u32,
    pub recent_commits: u32,
    pub story_points: f64,
    pub in_progress: u32,
    pub blocked: u32,
    pub meeting_hours: f64,

    pub pto_days_upcoming: u32,
    pub next_pto_date: Option<NaiveDate>,

    pub score: f64,
    pub percentage: f64,
    pub status: WorkloadStatus,
}

/// Team-wide snapshot, ordered by percentage descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub members: Vec<MemberWorkload>,
    pub calculated_at: DateTime<Utc>,
}

impl TeamSummary {
    pub fn team_size(&self) -> usize {
        self.members.len()
    }

    pub fn overloaded_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.status == WorkloadStatus::Overloaded)
            .count()
    }

    pub fn at_capacity_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.status == WorkloadStatus::AtCapacity)
            .count()
    }

    pub fn healthy_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.status == WorkloadStatus::Healthy)
            .count()
    }

    pub fn average_workload(&self) -> f64 {
        let percentages: Vec<f64> = self.members.iter().map(|m| m.percentage).collect();
        stats::mean(&percentages)
    }

    /// Population standard deviation of the percentages, reported under the
    /// historical name "variance" in every output surface.
    pub fn variance(&self) -> f64 {
        let percentages: Vec<f64> = self.members.iter().map(|m| m.percentage).collect();
        stats::population_std_dev(&percentages)
    }

    /// Balanced iff the spread is under 30 percentage points.
    pub fn is_balanced(&self) -> bool {
        self.variance() < 30.0
    }

    /// Top `n` members by percentage. Members are already sorted descending,
    /// so this is a prefix.
    pub fn most_overloaded(&self, n: usize) -> &[MemberWorkload] {
        &self.members[..n.min(self.members.len())]
    }

    /// Bottom `n` members by percentage, least loaded first.
    pub fn most_available(&self, n: usize) -> Vec<&MemberWorkload> {
        self.members.iter().rev().take(n).collect()
    }
}

/// A proposed move of work from an overloaded member to an available one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalancingSuggestion {
    pub from: String,
    pub to: String,
    pub from_percentage: f64,
    pub to_percentage: f64,
    pub reason: String,
}
