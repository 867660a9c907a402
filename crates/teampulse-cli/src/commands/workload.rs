use clap::Subcommand;
use teampulse_core::{Config, ReportFormat, WorkloadAnalyzer};

use crate::commands::fetch_sources;

#[derive(Subcommand)]
pub enum WorkloadAction {
    /// Full team workload report
    Report {
        /// Output format: text, slack, html, or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List members at or above a load threshold
    Overloaded {
        /// Percentage threshold
        #[arg(long, default_value_t = 100.0)]
        threshold: f64,
    },
    /// Rebalancing suggestions for overloaded members
    Suggest,
}

pub fn run(action: WorkloadAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let analyzer = WorkloadAnalyzer::new(config.weights);

    let runtime = tokio::runtime::Runtime::new()?;
    let (github, jira, calendar) = runtime.block_on(fetch_sources(&config))?;
    let summary = analyzer.analyze(&github, &jira, &calendar, &config.team.members);

    match action {
        WorkloadAction::Report { format } => {
            // Raw JSON dump sits outside the report formats.
            if format.eq_ignore_ascii_case("json") {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let format: ReportFormat = format.parse()?;
                println!("{}", teampulse_core::report::render_team_report(&summary, format)?);
            }
        }
        WorkloadAction::Overloaded { threshold } => {
            let overloaded = analyzer.identify_overloaded(&summary, threshold);
            if overloaded.is_empty() {
                println!("Nobody at or above {threshold:.0}%.");
            }
            for member in overloaded {
                println!(
                    "{} {}: {:.1}% ({} PRs, {} reviews, {} issues, {} pts)",
                    member.status.emoji(),
                    member.name,
                    member.percentage,
                    member.open_prs,
                    member.pending_reviews,
                    member.assigned_issues,
                    member.story_points,
                );
            }
        }
        WorkloadAction::Suggest => {
            let suggestions = analyzer.suggest_rebalancing(&summary);
            if suggestions.is_empty() {
                println!("No rebalancing needed.");
            }
            for suggestion in suggestions {
                println!("{} → {}: {}", suggestion.from, suggestion.to, suggestion.reason);
            }
        }
    }
    Ok(())
}
