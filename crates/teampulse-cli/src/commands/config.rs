use clap::Subcommand;
use teampulse_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (tokens redacted)
    Show,
    /// Write a default configuration file
    Init,
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let mut config = Config::load()?;
            config.github.token = config.github.token.map(|_| "***".to_string());
            config.jira.token = config.jira.token.map(|_| "***".to_string());
            config.calendar.google_token = config.calendar.google_token.map(|_| "***".to_string());
            config.calendar.outlook_token =
                config.calendar.outlook_token.map(|_| "***".to_string());
            config.slack_webhook = config.slack_webhook.map(|_| "***".to_string());
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            let path = Config::path()?;
            if path.exists() {
                return Err(format!("{} already exists", path.display()).into());
            }
            Config::default().save()?;
            println!("Wrote {}", path.display());
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
