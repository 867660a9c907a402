//! Workload scoring engine.
//!
//! Merges GitHub, Jira, and calendar activity into per-member records,
//! scores them against the configured weights, and proposes rebalancing
//! moves for overloaded members.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};

use crate::integrations::calendar::Availability;
use crate::integrations::github::GitHubActivity;
use crate::integrations::jira::JiraActivity;
use crate::workload::member::{
    MemberWorkload, RebalancingSuggestion, TeamSummary, WorkloadStatus,
};
use crate::workload::weights::WorkloadWeights;

/// Minimum percentage-point gap between an overloaded member and a healthy
/// one before a transfer suggestion is worth making.
const REBALANCE_GAP: f64 = 30.0;

/// Raw signals for one member before scoring. A source the member does not
/// appear in leaves its fields at zero.
#[derive(Debug, Clone, Default)]
pub struct MemberSignals {
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
}

/// Scores team workload from merged activity signals.
#[derive(Debug, Clone, Default)]
pub struct WorkloadAnalyzer {
    weights: WorkloadWeights,
}

impl WorkloadAnalyzer {
    pub fn new(weights: WorkloadWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WorkloadWeights {
        &self.weights
    }

    /// Score one member's signals. Every signal contributes its raw value
    /// times its weight; the ceilings only shape the denominator. Neither the
    /// score nor the percentage is clamped, so a member can sit above 100%.
    pub fn analyze_member(&self, name: &str, signals: &MemberSignals) -> MemberWorkload {
        let w = &self.weights;
        let score = f64::from(signals.open_prs) * w.open_prs
            + f64::from(signals.pending_reviews) * w.pending_reviews
            + f64::from(signals.assigned_issues) * w.assigned_issues
            + f64::from(signals.recent_commits) * w.recent_commits
            + signals.story_points * w.story_points
            + f64::from(signals.in_progress) * w.in_progress
            + f64::from(signals.blocked) * w.blocked
            + signals.meeting_hours * w.meeting_hours;

        let max_score = w.max_score();
        let percentage = if max_score > 0.0 {
            score / max_score * 100.0
        } else {
            0.0
        };

        MemberWorkload {
            name: name.to_string(),
            email: signals.email.clone(),
            open_prs: signals.open_prs,
            pending_reviews: signals.pending_reviews,
            assigned_issues: signals.assigned_issues,
            recent_commits: signals.recent_commits,
            story_points: signals.story_points,
            in_progress: signals.in_progress,
            blocked: signals.blocked,
            meeting_hours: signals.meeting_hours,
            pto_days_upcoming: signals.pto_days_upcoming,
            next_pto_date: signals.next_pto_date,
            score,
            percentage,
            status: WorkloadStatus::from_percentage(percentage),
        }
    }

    /// Merge and score activity as of now.
    pub fn analyze(
        &self,
        github: &[GitHubActivity],
        jira: &[JiraActivity],
        calendar: &[Availability],
        roster: &[String],
    ) -> TeamSummary {
        self.analyze_at(github, jira, calendar, roster, Utc::now().date_naive())
    }

    /// Merge and score activity as of `today`.
    ///
    /// A non-empty `roster` fixes the team membership; otherwise the team is
    /// the case-insensitive union of names seen in the three sources, in the
    /// order GitHub, Jira, calendar. A member missing from a source
    /// contributes zeros for that source's signals.
    pub fn analyze_at(
        &self,
        github: &[GitHubActivity],
        jira: &[JiraActivity],
        calendar: &[Availability],
        roster: &[String],
        today: NaiveDate,
    ) -> TeamSummary {
        // GitHub records key by login, not profile display name, so rosters
        // written as logins always join.
        let github_by_name: HashMap<String, &GitHubActivity> = github
            .iter()
            .map(|a| (a.login.to_lowercase(), a))
            .collect();
        let jira_by_name: HashMap<String, &JiraActivity> = jira
            .iter()
            .map(|a| (a.display_name.to_lowercase(), a))
            .collect();
        let calendar_by_name: HashMap<String, &Availability> = calendar
            .iter()
            .map(|a| (a.person.to_lowercase(), a))
            .collect();

        let names: Vec<String> = if roster.is_empty() {
            let mut seen: Vec<String> = Vec::new();
            let candidates = github
                .iter()
                .map(|a| a.login.clone())
                .chain(jira.iter().map(|a| a.display_name.clone()))
                .chain(calendar.iter().map(|a| a.person.clone()));
            for name in candidates {
                if !seen.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
                    seen.push(name);
                }
            }
            seen
        } else {
            roster.to_vec()
        };

        let mut members: Vec<MemberWorkload> = names
            .iter()
            .map(|name| {
                let key = name.to_lowercase();
                let mut signals = MemberSignals::default();
                if let Some(a) = github_by_name.get(&key) {
                    signals.open_prs = a.open_prs;
                    signals.pending_reviews = a.pending_reviews;
                    signals.assigned_issues = a.assigned_issues;
                    signals.recent_commits = a.recent_commits;
                }
                if let Some(a) = jira_by_name.get(&key) {
                    signals.story_points = a.story_points();
                    signals.in_progress = a.in_progress_count();
                    signals.blocked = a.blocked_count();
                    signals.email = a.email.clone();
                }
                if let Some(a) = calendar_by_name.get(&key) {
                    signals.meeting_hours = a.meeting_hours_per_week;
                    signals.pto_days_upcoming = a.pto_days_upcoming();
                    signals.next_pto_date = a.next_pto(today);
                }
                self.analyze_member(name, &signals)
            })
            .collect();

        // Stable sort preserves discovery order for equal percentages.
        members.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

        TeamSummary {
            members,
            calculated_at: Utc::now(),
        }
    }

    /// Members at or above `threshold` percent, most loaded first.
    pub fn identify_overloaded<'a>(
        &self,
        summary: &'a TeamSummary,
        threshold: f64,
    ) -> Vec<&'a MemberWorkload> {
        summary
            .members
            .iter()
            .filter(|m| m.percentage >= threshold)
            .collect()
    }

    /// Pair each overloaded member with the first healthy member, scanning in
    /// percentage-descending order, whose load sits more than 30 points
    /// below. One suggestion per overloaded member; a healthy member can
    /// absorb from several.
    pub fn suggest_rebalancing(&self, summary: &TeamSummary) -> Vec<RebalancingSuggestion> {
        let mut suggestions = Vec::new();

        for overloaded in summary
            .members
            .iter()
            .filter(|m| m.status == WorkloadStatus::Overloaded)
        {
            let candidate = summary.members.iter().find(|m| {
                m.status == WorkloadStatus::Healthy
                    && overloaded.percentage - m.percentage > REBALANCE_GAP
            });
            if let Some(target) = candidate {
                suggestions.push(RebalancingSuggestion {
                    from: overloaded.name.clone(),
                    to: target.name.clone(),
                    from_percentage: overloaded.percentage,
                    to_percentage: target.percentage,
                    reason: format!(
                        "{} is at {:.0}% while {} is at {:.0}%",
                        overloaded.name, overloaded.percentage, target.name, target.percentage
                    ),
                });
            }
        }

        suggestions
    }
}
