//! Sprint completion forecasting.
//!
//! Two regimes: with at least 3 velocity records the forecast projects from
//! historical throughput and scores a z-style probability; with less history
//! it falls back to a linear projection of progress so far.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forecast::item::{Sprint, VelocityRecord, WorkItem};
use crate::forecast::risk::{assess_item_risk, ItemRisk, RiskLevel};
use crate::forecast::velocity::{Trend, VelocityStats};

/// Historical throughput is normalized against a 10-day sprint regardless of
/// the actual length. Known simplification kept for compatibility; actual
/// duration would arguably be more accurate.
const ASSUMED_SPRINT_DAYS: f64 = 10.0;

/// Completion forecast for one sprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationPrediction {
    pub sprint_name: String,
    pub total_points: f64,
    pub completed_points: f64,
    pub in_progress_points: f64,
    pub remaining_points: f64,
    pub days_elapsed: i64,
    pub days_remaining: i64,
    /// Final completed-points estimate, clamped to [0, total].
    pub predicted_points: f64,
    pub predicted_remaining: f64,
    /// Completion probability, clamped to [0, 100].
    pub probability: f64,
    pub velocity: VelocityStats,
    pub risk_level: RiskLevel,
    pub at_risk_items: Vec<ItemRisk>,
    pub recommendations: Vec<String>,
    pub calculated_at: DateTime<Utc>,
}

impl IterationPrediction {
    pub fn on_track(&self) -> bool {
        self.probability >= 70.0
    }

    pub fn completion_percentage(&self) -> f64 {
        if self.total_points > 0.0 {
            self.completed_points / self.total_points * 100.0
        } else {
            0.0
        }
    }
}

/// Forecasts sprint completion from items, the sprint clock, and history.
#[derive(Debug, Clone, Copy, Default)]
pub struct SprintPredictor;

impl SprintPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(
        &self,
        items: &[WorkItem],
        sprint: &Sprint,
        history: &[VelocityRecord],
    ) -> IterationPrediction {
        self.predict_at(items, sprint, history, Utc::now())
    }

    pub fn predict_at(
        &self,
        items: &[WorkItem],
        sprint: &Sprint,
        history: &[VelocityRecord],
        now: DateTime<Utc>,
    ) -> IterationPrediction {
        let total: f64 = items.iter().map(WorkItem::points).sum();
        let done: f64 = items
            .iter()
            .filter(|i| i.is_done())
            .map(WorkItem::points)
            .sum();
        let in_progress: f64 = items
            .iter()
            .filter(|i| i.is_in_progress())
            .map(WorkItem::points)
            .sum();
        let remaining = total - done;

        let days_remaining = sprint.days_remaining_at(now);
        // Midpoint fallback when the sprint carries no dates; a dated sprint
        // with a degenerate duration reads as not started instead.
        let (days_elapsed, progress) = match (sprint.start_date, sprint.end_date) {
            (Some(start), Some(end)) => {
                let total_days = (end - start).num_days();
                let elapsed = (total_days - days_remaining).max(0);
                let fraction = if total_days > 0 {
                    (elapsed as f64 / total_days as f64).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                (elapsed, fraction)
            }
            _ => (0, 0.5),
        };

        let velocity = VelocityStats::from_history(history);

        let (raw_predicted, probability) = if velocity.is_reliable() {
            let points_per_day = velocity.average / ASSUMED_SPRINT_DAYS;
            let projected = points_per_day * days_remaining as f64;
            let predicted = done + projected;
            let probability = if velocity.std_dev > 0.0 {
                let z = (remaining - projected) / velocity.std_dev;
                (50.0 - 25.0 * z).clamp(0.0, 100.0)
            } else {
                50.0
            };
            (predicted, probability)
        } else if progress > 0.0 {
            let rate = done / progress;
            let probability = if total > 0.0 {
                (rate / total * 100.0).clamp(0.0, 100.0)
            } else {
                100.0
            };
            (rate, probability)
        } else {
            (total, 50.0)
        };

        let predicted_points = raw_predicted.clamp(0.0, total.max(0.0));
        let predicted_remaining = (total - predicted_points).max(0.0);

        let risks: Vec<ItemRisk> = items
            .iter()
            .filter(|i| !i.is_done())
            .map(|i| assess_item_risk(i, days_remaining, progress))
            .collect();

        let risk_level = overall_risk(probability, &risks);

        let mut at_risk_items: Vec<ItemRisk> =
            risks.into_iter().filter(|r| r.score >= 40.0).collect();
        at_risk_items.sort_by(|a, b| b.score.total_cmp(&a.score));
        at_risk_items.truncate(5);

        let recommendations =
            build_recommendations(risk_level, &at_risk_items, velocity.trend);

        IterationPrediction {
            sprint_name: sprint.name.clone(),
            total_points: total,
            completed_points: done,
            in_progress_points: in_progress,
            remaining_points: remaining,
            days_elapsed,
            days_remaining,
            predicted_points,
            predicted_remaining,
            probability,
            velocity,
            risk_level,
            at_risk_items,
            recommendations,
            calculated_at: now,
        }
    }
}

/// Sprint-level tier from probability and per-item tiers over all
/// incomplete items, not just the reported top 5.
fn overall_risk(probability: f64, risks: &[ItemRisk]) -> RiskLevel {
    let critical_items = risks
        .iter()
        .filter(|r| r.level == RiskLevel::Critical)
        .count();
    let high_or_worse = risks.iter().filter(|r| r.level >= RiskLevel::High).count();

    if probability < 50.0 || critical_items > 0 {
        RiskLevel::Critical
    } else if probability < 70.0 || high_or_worse >= 2 {
        RiskLevel::High
    } else if probability < 85.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn build_recommendations(
    risk_level: RiskLevel,
    at_risk: &[ItemRisk],
    trend: Trend,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if risk_level >= RiskLevel::High {
        if !at_risk.is_empty() {
            recommendations.push(format!(
                "Review {} at-risk item(s) for descoping",
                at_risk.len()
            ));
        }
        let blocked = at_risk
            .iter()
            .filter(|r| r.reasons.iter().any(|reason| reason.contains("blocked")))
            .count();
        if blocked > 0 {
            recommendations.push(format!("Unblock {blocked} blocked item(s)"));
        }
        let unassigned = at_risk
            .iter()
            .filter(|r| r.reasons.iter().any(|reason| reason.contains("assignee")))
            .count();
        if unassigned > 0 {
            recommendations.push(format!("Assign {unassigned} unassigned item(s)"));
        }
    }

    if trend == Trend::Declining {
        recommendations
            .push("Velocity is declining over recent sprints; re-check commitments".to_string());
    }

    recommendations
}
