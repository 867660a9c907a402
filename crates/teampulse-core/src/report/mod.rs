//! Report rendering for engine output.
//!
//! Thin presentation layer: every number it prints already exists on the
//! summary or prediction structures.

pub mod sprint;
pub mod workload;

use std::fmt;
use std::str::FromStr;

use crate::error::{ReportError, Result};
use crate::forecast::IterationPrediction;
use crate::workload::TeamSummary;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Slack,
    Html,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, ReportError> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "slack" => Ok(ReportFormat::Slack),
            "html" => Ok(ReportFormat::Html),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Text => "text",
            ReportFormat::Slack => "slack",
            ReportFormat::Html => "html",
        };
        write!(f, "{name}")
    }
}

/// Render a team workload report in the requested format.
pub fn render_team_report(summary: &TeamSummary, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(workload::team_text_report(summary)),
        ReportFormat::Slack => {
            Ok(serde_json::to_string_pretty(&workload::team_slack_summary(summary))
                .map_err(ReportError::Serialize)?)
        }
        ReportFormat::Html => Ok(workload::team_html_dashboard(summary)),
    }
}

/// Render a sprint forecast report in the requested format.
pub fn render_sprint_report(
    prediction: &IterationPrediction,
    format: ReportFormat,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(sprint::sprint_text_report(prediction)),
        ReportFormat::Slack => {
            Ok(serde_json::to_string_pretty(&sprint::sprint_slack_alert(prediction))
                .map_err(ReportError::Serialize)?)
        }
        ReportFormat::Html => Err(ReportError::Unsupported {
            report: "sprint".to_string(),
            format: "html".to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("SLACK".parse::<ReportFormat>().unwrap(), ReportFormat::Slack);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }
}
