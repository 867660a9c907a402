//! Sprint work items, the sprint descriptor, and velocity history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One trackable unit of sprint work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: Option<String>,
    pub story_points: Option<f64>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl WorkItem {
    pub fn points(&self) -> f64 {
        self.story_points.unwrap_or(0.0)
    }

    pub fn is_done(&self) -> bool {
        matches!(
            self.status.to_lowercase().as_str(),
            "done" | "closed" | "resolved"
        )
    }

    pub fn is_in_progress(&self) -> bool {
        self.status.to_lowercase().contains("progress")
    }

    /// Blocked either by status or by a "blocked" label.
    pub fn is_blocked(&self) -> bool {
        self.status.to_lowercase().contains("blocked")
            || self.labels.iter().any(|l| l.eq_ignore_ascii_case("blocked"))
    }

    pub fn is_not_started(&self) -> bool {
        matches!(
            self.status.to_lowercase().as_str(),
            "to do" | "backlog" | "open"
        )
    }
}

/// Sprint descriptor as reported by the issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub goal: Option<String>,
}

impl Sprint {
    /// Whole days until the end date, floored at 0. No end date means 0.
    pub fn days_remaining_at(&self, now: DateTime<Utc>) -> i64 {
        match self.end_date {
            Some(end) => (end - now).num_days().max(0),
            None => 0,
        }
    }

    /// Fraction of the sprint elapsed, clamped to [0, 1]. Returns None when
    /// either date is missing or the duration is not positive.
    pub fn progress_fraction_at(&self, now: DateTime<Utc>) -> Option<f64> {
        let (start, end) = (self.start_date?, self.end_date?);
        let total_days = (end - start).num_days();
        if total_days <= 0 {
            return None;
        }
        let elapsed = total_days - self.days_remaining_at(now);
        Some((elapsed as f64 / total_days as f64).clamp(0.0, 1.0))
    }
}

/// Completed-points total for one finished sprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityRecord {
    pub sprint_id: u64,
    pub sprint_name: String,
    pub end_date: Option<DateTime<Utc>>,
    pub committed_points: f64,
    pub completed_points: f64,
}

/// Point and item totals over a sprint's item set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurndownSnapshot {
    pub total_points: f64,
    pub completed_points: f64,
    pub in_progress_points: f64,
    pub remaining_points: f64,
    pub items_total: usize,
    pub items_done: usize,
    pub items_in_progress: usize,
    pub items_blocked: usize,
}

impl BurndownSnapshot {
    pub fn from_items(items: &[WorkItem]) -> Self {
        let total_points: f64 = items.iter().map(WorkItem::points).sum();
        let completed_points: f64 = items
            .iter()
            .filter(|i| i.is_done())
            .map(WorkItem::points)
            .sum();
        let in_progress_points: f64 = items
            .iter()
            .filter(|i| i.is_in_progress())
            .map(WorkItem::points)
            .sum();
        Self {
            total_points,
            completed_points,
            in_progress_points,
            remaining_points: total_points - completed_points,
            items_total: items.len(),
            items_done: items.iter().filter(|i| i.is_done()).count(),
            items_in_progress: items.iter().filter(|i| i.is_in_progress()).count(),
            items_blocked: items.iter().filter(|i| i.is_blocked()).count(),
        }
    }

    pub fn completion_percentage(&self) -> f64 {
        if self.total_points > 0.0 {
            self.completed_points / self.total_points * 100.0
        } else {
            0.0
        }
    }
}
