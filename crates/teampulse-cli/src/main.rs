use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "teampulse", version, about = "Team workload and sprint analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Team workload analysis
    Workload {
        #[command(subcommand)]
        action: commands::workload::WorkloadAction,
    },
    /// Sprint forecasting
    Sprint {
        #[command(subcommand)]
        action: commands::sprint::SprintAction,
    },
    /// Time-off coverage
    Pto {
        #[command(subcommand)]
        action: commands::pto::PtoAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Workload { action } => commands::workload::run(action),
        Commands::Sprint { action } => commands::sprint::run(action),
        Commands::Pto { action } => commands::pto::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
