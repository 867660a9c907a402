use clap::Subcommand;
use teampulse_core::integrations::calendar::coverage_gaps;
use teampulse_core::report::workload::pto_conflicts_text_report;
use teampulse_core::Config;

#[derive(Subcommand)]
pub enum PtoAction {
    /// Days where too few people are available
    Conflicts {
        /// Window in days
        #[arg(long, default_value_t = 30)]
        days: i64,
        /// Minimum people that must be in
        #[arg(long, default_value_t = 2)]
        min_coverage: usize,
    },
}

pub fn run(action: PtoAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let client = config.calendar_client()?;
    let runtime = tokio::runtime::Runtime::new()?;

    match action {
        PtoAction::Conflicts { days, min_coverage } => {
            let availabilities = runtime.block_on(client.team_availability(&config.team.emails));
            let today = chrono::Utc::now().date_naive();
            let gaps = coverage_gaps(&availabilities, today, days, min_coverage);
            print!("{}", pto_conflicts_text_report(&gaps));
        }
    }
    Ok(())
}
