pub mod config;
pub mod pto;
pub mod sprint;
pub mod workload;

use teampulse_core::{Availability, Config, GitHubActivity, JiraActivity};

/// Fetch the three activity sources, tolerating partial failure: a source
/// that is not configured simply contributes no records.
pub async fn fetch_sources(
    config: &Config,
) -> Result<
    (Vec<GitHubActivity>, Vec<JiraActivity>, Vec<Availability>),
    Box<dyn std::error::Error>,
> {
    let github = match config.github_client() {
        Ok(client) => client.team_activity(&config.github_logins()).await?,
        Err(e) => {
            eprintln!("warning: skipping GitHub ({e})");
            Vec::new()
        }
    };

    let jira = match config.jira_client() {
        Ok(client) => {
            let board = config.jira_board_id()?;
            match client.active_sprint(board).await? {
                Some(sprint) => client.team_activity(sprint.id).await?,
                None => Vec::new(),
            }
        }
        Err(e) => {
            eprintln!("warning: skipping Jira ({e})");
            Vec::new()
        }
    };

    let calendar = match config.calendar_client() {
        Ok(client) => client.team_availability(&config.team.emails).await,
        Err(e) => {
            eprintln!("warning: skipping calendar ({e})");
            Vec::new()
        }
    };

    Ok((github, jira, calendar))
}
