use clap::{Parser, Subcommand};
use std::process::ExitCode;
use weekplan_lib::config::Config;

#[derive(Parser)]
#[command(name = "weekplan")]
#[command(about = "Shared weekly schedule planner with per-week day overrides")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve,
    /// Populate the template week with the starting schedule
    Seed {
        /// Clear existing template blocks first
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => weekplan_lib::serve(config).await,
        Commands::Seed { force } => weekplan_lib::seed(&config, force).map(|inserted| {
            if inserted == 0 {
                log::info!("Template already populated; run with --force to clear and re-seed");
            } else {
                log::info!("Seeded {inserted} blocks");
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("weekplan failed: {e}");
            ExitCode::FAILURE
        }
    }
}
