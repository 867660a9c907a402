//! Sprint forecast renderers: terminal text and Slack Block Kit.

use serde_json::{json, Value};

use crate::forecast::IterationPrediction;

/// Terminal forecast report.
pub fn sprint_text_report(prediction: &IterationPrediction) -> String {
    let mut out = String::new();
    out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
    out.push_str("║                       SPRINT FORECAST                        ║\n");
    out.push_str("╚══════════════════════════════════════════════════════════════╝\n\n");

    out.push_str(&format!("Sprint: {}\n", prediction.sprint_name));
    out.push_str(&format!(
        "Points: {:.0} done / {:.0} total ({:.1}% complete), {:.0} in progress\n",
        prediction.completed_points,
        prediction.total_points,
        prediction.completion_percentage(),
        prediction.in_progress_points,
    ));
    out.push_str(&format!(
        "Days: {} elapsed, {} remaining\n\n",
        prediction.days_elapsed, prediction.days_remaining
    ));

    out.push_str(&format!(
        "Completion probability: {:.1}%  ({})\n",
        prediction.probability,
        if prediction.on_track() {
            "on track"
        } else {
            "at risk"
        },
    ));
    out.push_str(&format!(
        "Predicted final: {:.1} points ({:.1} left over)\n",
        prediction.predicted_points, prediction.predicted_remaining
    ));
    out.push_str(&format!(
        "Overall risk: {} {}\n",
        prediction.risk_level.emoji(),
        prediction.risk_level.label()
    ));

    if prediction.velocity.is_reliable() {
        let (low, high) = prediction.velocity.confidence_range();
        out.push_str(&format!(
            "Velocity: avg {:.1} over {} sprint(s), range {:.1}-{:.1}, trend {}\n",
            prediction.velocity.average,
            prediction.velocity.sprints_analyzed,
            low,
            high,
            prediction.velocity.trend.label(),
        ));
    } else {
        out.push_str("Velocity: insufficient history, using linear projection\n");
    }

    if !prediction.at_risk_items.is_empty() {
        out.push_str("\nAt-risk items:\n");
        for risk in &prediction.at_risk_items {
            out.push_str(&format!(
                "  {} {} ({:.0}) {} — {}\n",
                risk.level.emoji(),
                risk.key,
                risk.score,
                risk.summary,
                risk.reasons.join("; "),
            ));
            if let Some(rec) = &risk.recommendation {
                out.push_str(&format!("      → {rec}\n"));
            }
        }
    }

    if !prediction.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &prediction.recommendations {
            out.push_str(&format!("  • {rec}\n"));
        }
    }

    out
}

/// Slack Block Kit alert for the forecast.
pub fn sprint_slack_alert(prediction: &IterationPrediction) -> Value {
    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {"type": "plain_text", "text": format!("Sprint Forecast: {}", prediction.sprint_name)}
        }),
        json!({
            "type": "section",
            "fields": [
                {"type": "mrkdwn", "text": format!("*Probability:* {:.0}%", prediction.probability)},
                {"type": "mrkdwn", "text": format!("*Risk:* {} {}", prediction.risk_level.emoji(), prediction.risk_level.label())},
                {"type": "mrkdwn", "text": format!("*Done:* {:.0}/{:.0} pts", prediction.completed_points, prediction.total_points)},
                {"type": "mrkdwn", "text": format!("*Days left:* {}", prediction.days_remaining)},
            ]
        }),
    ];

    if !prediction.at_risk_items.is_empty() {
        let lines: Vec<String> = prediction
            .at_risk_items
            .iter()
            .map(|r| format!("{} *{}* ({:.0}) — {}", r.level.emoji(), r.key, r.score, r.summary))
            .collect();
        blocks.push(json!({
            "type": "section",
            "text": {"type": "mrkdwn", "text": format!("*At-risk items:*\n{}", lines.join("\n"))}
        }));
    }

    if !prediction.recommendations.is_empty() {
        blocks.push(json!({
            "type": "context",
            "elements": [{"type": "mrkdwn", "text": prediction.recommendations.join(" · ")}]
        }));
    }

    json!({"blocks": blocks})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::item::{Sprint, WorkItem};
    use crate::forecast::SprintPredictor;
    use chrono::{Duration, TimeZone, Utc};

    fn prediction() -> IterationPrediction {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let sprint = Sprint {
            id: 7,
            name: "Sprint 7".to_string(),
            state: "active".to_string(),
            start_date: Some(now - Duration::days(8)),
            end_date: Some(now + Duration::days(2)),
            goal: None,
        };
        let items = vec![
            WorkItem {
                key: "TP-1".to_string(),
                summary: "done work".to_string(),
                status: "Done".to_string(),
                assignee: Some("alice".to_string()),
                story_points: Some(3.0),
                labels: vec![],
            },
            WorkItem {
                key: "TP-2".to_string(),
                summary: "stuck work".to_string(),
                status: "To Do".to_string(),
                assignee: None,
                story_points: Some(8.0),
                labels: vec!["blocked".to_string()],
            },
        ];
        SprintPredictor::new().predict_at(&items, &sprint, &[], now)
    }

    #[test]
    fn test_text_report_mentions_risky_item() {
        let report = sprint_text_report(&prediction());
        assert!(report.contains("Sprint 7"));
        assert!(report.contains("TP-2"));
        assert!(report.contains("CRITICAL"));
        assert!(report.contains("Recommendations"));
    }

    #[test]
    fn test_slack_alert_shape() {
        let payload = sprint_slack_alert(&prediction());
        let blocks = payload["blocks"].as_array().expect("blocks");
        assert_eq!(blocks[0]["type"], "header");
        assert!(blocks.len() >= 3);
    }
}
