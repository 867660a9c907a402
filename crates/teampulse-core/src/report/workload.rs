//! Workload report renderers: terminal text, Slack Block Kit, and HTML.

use serde_json::{json, Value};

use crate::integrations::CoverageGap;
use crate::workload::{MemberWorkload, RebalancingSuggestion, TeamSummary};

const BAR_WIDTH: usize = 20;

/// Fixed-width fill bar; load beyond 100% stays a full bar.
fn workload_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0 * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Terminal report with one row per member, busiest first.
pub fn team_text_report(summary: &TeamSummary) -> String {
    let mut out = String::new();
    out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
    out.push_str("║                     TEAM WORKLOAD REPORT                     ║\n");
    out.push_str("╚══════════════════════════════════════════════════════════════╝\n\n");

    for member in &summary.members {
        out.push_str(&format!(
            "{} {:<20} [{}] {:>6.1}%  {}\n",
            member.status.emoji(),
            member.name,
            workload_bar(member.percentage),
            member.percentage,
            member.status.label(),
        ));
        out.push_str(&format!(
            "   PRs: {}  Reviews: {}  Issues: {}  Points: {}  Meetings: {:.1}h\n",
            member.open_prs,
            member.pending_reviews,
            member.assigned_issues,
            member.story_points,
            member.meeting_hours,
        ));
        if member.pto_days_upcoming > 0 {
            if let Some(date) = member.next_pto_date {
                out.push_str(&format!(
                    "   PTO: {} weekday(s) upcoming, next on {date}\n",
                    member.pto_days_upcoming
                ));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Team: {} member(s)  avg {:.1}%  variance {:.1}  {}\n",
        summary.team_size(),
        summary.average_workload(),
        summary.variance(),
        if summary.is_balanced() {
            "balanced"
        } else {
            "unbalanced"
        },
    ));
    out.push_str(&format!(
        "Overloaded: {}  At capacity: {}  Healthy: {}\n",
        summary.overloaded_count(),
        summary.at_capacity_count(),
        summary.healthy_count(),
    ));
    out
}

/// Slack Block Kit payload summarizing the team.
pub fn team_slack_summary(summary: &TeamSummary) -> Value {
    let mut blocks = vec![json!({
        "type": "header",
        "text": {"type": "plain_text", "text": "Team Workload Summary"}
    })];

    let mut lines: Vec<String> = summary
        .members
        .iter()
        .map(|m| {
            format!(
                "{} *{}* — {:.0}% ({})",
                m.status.emoji(),
                m.name,
                m.percentage,
                m.status.label()
            )
        })
        .collect();
    lines.push(format!(
        "\nAverage {:.0}% · variance {:.0} · {}",
        summary.average_workload(),
        summary.variance(),
        if summary.is_balanced() {
            "balanced"
        } else {
            "needs rebalancing"
        }
    ));
    blocks.push(json!({
        "type": "section",
        "text": {"type": "mrkdwn", "text": lines.join("\n")}
    }));

    json!({"blocks": blocks})
}

/// Slack alert for one overloaded member.
pub fn member_slack_alert(member: &MemberWorkload, suggestion: Option<&RebalancingSuggestion>) -> Value {
    let mut text = format!(
        "{} *{}* is at *{:.0}%* capacity\nPRs: {} · Reviews: {} · Issues: {} · Points: {}",
        member.status.emoji(),
        member.name,
        member.percentage,
        member.open_prs,
        member.pending_reviews,
        member.assigned_issues,
        member.story_points,
    );
    if let Some(s) = suggestion {
        text.push_str(&format!(
            "\nSuggestion: move work to *{}* ({:.0}%)",
            s.to, s.to_percentage
        ));
    }
    json!({
        "blocks": [{
            "type": "section",
            "text": {"type": "mrkdwn", "text": text}
        }]
    })
}

/// Self-contained HTML dashboard.
pub fn team_html_dashboard(summary: &TeamSummary) -> String {
    let mut rows = String::new();
    for member in &summary.members {
        let color = match member.status {
            crate::workload::WorkloadStatus::Healthy => "#2e7d32",
            crate::workload::WorkloadStatus::AtCapacity => "#f9a825",
            crate::workload::WorkloadStatus::Overloaded => "#c62828",
        };
        let width = member.percentage.min(100.0);
        rows.push_str(&format!(
            "<tr><td>{}</td>\
             <td><div class=\"bar\"><div style=\"width:{width:.0}%;background:{color}\"></div></div></td>\
             <td>{:.1}%</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            member.name,
            member.percentage,
            member.status.label(),
            member.open_prs,
            member.assigned_issues,
            member.story_points,
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Team Workload</title>\n\
         <style>\n\
         body{{font-family:sans-serif;margin:2em}}\n\
         table{{border-collapse:collapse;width:100%}}\n\
         td,th{{padding:6px 10px;border-bottom:1px solid #ddd;text-align:left}}\n\
         .bar{{width:160px;height:12px;background:#eee}}\n\
         .bar div{{height:12px}}\n\
         </style></head><body>\n\
         <h1>Team Workload</h1>\n\
         <p>{} member(s) · average {:.1}% · variance {:.1} · {}</p>\n\
         <table>\n\
         <tr><th>Member</th><th></th><th>Load</th><th>Status</th><th>PRs</th><th>Issues</th><th>Points</th></tr>\n\
         {rows}\
         </table>\n</body></html>\n",
        summary.team_size(),
        summary.average_workload(),
        summary.variance(),
        if summary.is_balanced() {
            "balanced"
        } else {
            "unbalanced"
        },
    )
}

/// Terminal report for upcoming coverage gaps.
pub fn pto_conflicts_text_report(gaps: &[CoverageGap]) -> String {
    if gaps.is_empty() {
        return "No coverage gaps in the selected window.\n".to_string();
    }
    let mut out = String::from("Upcoming coverage gaps:\n\n");
    for gap in gaps {
        out.push_str(&format!(
            "  {}  {} out ({}), {} available [{}]\n",
            gap.date,
            gap.people_out.len(),
            gap.people_out.join(", "),
            gap.available,
            gap.severity,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{MemberSignals, WorkloadAnalyzer};
    use chrono::Utc;

    fn summary() -> TeamSummary {
        let analyzer = WorkloadAnalyzer::default();
        let busy = analyzer.analyze_member(
            "alice",
            &MemberSignals {
                open_prs: 5,
                pending_reviews: 8,
                assigned_issues: 10,
                recent_commits: 60,
                ..MemberSignals::default()
            },
        );
        let calm = analyzer.analyze_member(
            "bob",
            &MemberSignals {
                open_prs: 1,
                ..MemberSignals::default()
            },
        );
        TeamSummary {
            members: vec![busy, calm],
            calculated_at: Utc::now(),
        }
    }

    #[test]
    fn test_text_report_lists_members_and_totals() {
        let report = team_text_report(&summary());
        assert!(report.contains("alice"));
        assert!(report.contains("bob"));
        assert!(report.contains("Team: 2 member(s)"));
        assert!(report.contains("variance"));
    }

    #[test]
    fn test_bar_clamps_above_100() {
        assert_eq!(workload_bar(250.0), "█".repeat(BAR_WIDTH));
        assert_eq!(workload_bar(0.0), "░".repeat(BAR_WIDTH));
    }

    #[test]
    fn test_slack_summary_block_shape() {
        let payload = team_slack_summary(&summary());
        let blocks = payload["blocks"].as_array().expect("blocks array");
        assert_eq!(blocks[0]["type"], "header");
        assert!(blocks[1]["text"]["text"]
            .as_str()
            .expect("section text")
            .contains("alice"));
    }

    #[test]
    fn test_html_dashboard_has_rows() {
        let html = team_html_dashboard(&summary());
        assert!(html.contains("<table>"));
        assert!(html.contains("alice"));
        assert!(html.contains("Overloaded"));
    }

    #[test]
    fn test_pto_report_empty() {
        assert!(pto_conflicts_text_report(&[]).contains("No coverage gaps"));
    }
}
