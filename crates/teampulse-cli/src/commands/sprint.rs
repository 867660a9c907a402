use clap::Subcommand;
use teampulse_core::forecast::{what_if_add_scope, what_if_remove_person};
use teampulse_core::{BurndownSnapshot, Config, ReportFormat, SprintPredictor, VelocityStats};

#[derive(Subcommand)]
pub enum SprintAction {
    /// Completion forecast for the active sprint
    Forecast {
        /// Output format: text or slack
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Velocity statistics over recent sprints
    Velocity {
        /// How many closed sprints to analyze
        #[arg(long, default_value_t = 5)]
        sprints: usize,
    },
    /// Point totals for the active sprint
    Burndown,
    /// List Jira boards visible to the configured account
    Boards,
    /// Counterfactual forecasts
    WhatIf {
        #[command(subcommand)]
        scenario: WhatIfAction,
    },
}

#[derive(Subcommand)]
pub enum WhatIfAction {
    /// Simulate a person leaving the sprint
    RemovePerson { name: String },
    /// Simulate extra scope landing
    AddScope { points: f64 },
}

pub fn run(action: SprintAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = config.jira_client()?;
    let runtime = tokio::runtime::Runtime::new()?;

    match action {
        SprintAction::Forecast { format } => {
            let board = config.jira_board_id()?;
            let (sprint, items, history) = runtime.block_on(async {
                let sprint = client
                    .active_sprint(board)
                    .await?
                    .ok_or("no active sprint on the board")?;
                let items = client.sprint_items(sprint.id).await?;
                let history = client.velocity_history(board, 5).await?;
                Ok::<_, Box<dyn std::error::Error>>((sprint, items, history))
            })?;
            let prediction = SprintPredictor::new().predict(&items, &sprint, &history);
            if format.eq_ignore_ascii_case("json") {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                let format: ReportFormat = format.parse()?;
                println!(
                    "{}",
                    teampulse_core::report::render_sprint_report(&prediction, format)?
                );
            }
        }
        SprintAction::Velocity { sprints } => {
            let board = config.jira_board_id()?;
            let history = runtime.block_on(client.velocity_history(board, sprints))?;
            let stats = VelocityStats::from_history(&history);
            for record in &history {
                println!(
                    "{}: {:.0} committed, {:.0} completed",
                    record.sprint_name, record.committed_points, record.completed_points
                );
            }
            println!(
                "\navg {:.1}  median {:.1}  std dev {:.1}  trend {}",
                stats.average,
                stats.median,
                stats.std_dev,
                stats.trend.label()
            );
        }
        SprintAction::Burndown => {
            let board = config.jira_board_id()?;
            let items = runtime.block_on(async {
                let sprint = client
                    .active_sprint(board)
                    .await?
                    .ok_or("no active sprint on the board")?;
                client
                    .sprint_items(sprint.id)
                    .await
                    .map_err(Into::<Box<dyn std::error::Error>>::into)
            })?;
            let snapshot = BurndownSnapshot::from_items(&items);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        SprintAction::Boards => {
            let boards = runtime.block_on(client.boards())?;
            for (id, name) in boards {
                println!("{id}: {name}");
            }
        }
        SprintAction::WhatIf { scenario } => {
            let board = config.jira_board_id()?;
            let (sprint, items, history) = runtime.block_on(async {
                let sprint = client
                    .active_sprint(board)
                    .await?
                    .ok_or("no active sprint on the board")?;
                let items = client.sprint_items(sprint.id).await?;
                let history = client.velocity_history(board, 5).await?;
                Ok::<_, Box<dyn std::error::Error>>((sprint, items, history))
            })?;
            let predictor = SprintPredictor::new();
            let now = chrono::Utc::now();
            let result = match scenario {
                WhatIfAction::RemovePerson { name } => {
                    what_if_remove_person(&predictor, &items, &sprint, &history, &name, now)
                }
                WhatIfAction::AddScope { points } => {
                    what_if_add_scope(&predictor, &items, &sprint, &history, points, now)
                }
            };
            println!("{}", result.scenario);
            println!("{}", result.impact);
            println!(
                "Probability: {:.1}% → {:.1}% ({:+.1})",
                result.original.probability,
                result.modified.probability,
                result.probability_change()
            );
        }
    }
    Ok(())
}
