//! Per-item risk scoring for incomplete sprint work.
//!
//! Rules are additive and not mutually exclusive; the accumulated score is
//! capped at 100. Each fired rule contributes a reason string.

use serde::{Deserialize, Serialize};

use crate::forecast::item::WorkItem;

/// Risk tier derived from the accumulated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            RiskLevel::Critical
        } else if score >= 60.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟡",
            RiskLevel::High => "🟠",
            RiskLevel::Critical => "🔴",
        }
    }
}

/// Risk assessment for one incomplete item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRisk {
    pub key: String,
    pub summary: String,
    pub score: f64,
    pub level: RiskLevel,
    pub reasons: Vec<String>,
    pub recommendation: Option<String>,
}

/// Score one incomplete item against the sprint clock.
///
/// `progress_fraction` is how far through the sprint we are, in [0, 1].
pub fn assess_item_risk(item: &WorkItem, days_remaining: i64, progress_fraction: f64) -> ItemRisk {
    let mut score: f64 = 0.0;
    let mut reasons = Vec::new();

    let not_started = item.is_not_started();
    if not_started && progress_fraction > 0.5 {
        score += 40.0;
        reasons.push("Not started with sprint more than half over".to_string());
        if progress_fraction > 0.75 {
            score += 20.0;
            reasons.push("Sprint is in its final quarter".to_string());
        }
    }

    if item.points() >= 5.0 {
        if days_remaining < 3 {
            score += 30.0;
            reasons.push(format!(
                "Large item ({} pts) with under 3 days left",
                item.points()
            ));
        } else if days_remaining < 5 {
            score += 15.0;
            reasons.push(format!(
                "Large item ({} pts) with under 5 days left",
                item.points()
            ));
        }
    }

    if item.is_blocked() {
        score += 50.0;
        reasons.push("Item is blocked".to_string());
    }

    if item.assignee.is_none() {
        score += 20.0;
        reasons.push("No assignee".to_string());
    }

    let score = score.min(100.0);
    let recommendation = if score >= 60.0 {
        Some(
            if item.is_blocked() {
                "Unblock or defer to next sprint"
            } else if item.assignee.is_none() {
                "Assign to someone with capacity"
            } else if not_started {
                "Consider descoping from this sprint"
            } else {
                "Monitor closely"
            }
            .to_string(),
        )
    } else {
        None
    };

    ItemRisk {
        key: item.key.clone(),
        summary: item.summary.clone(),
        score,
        level: RiskLevel::from_score(score),
        reasons,
        recommendation,
    }
}
