use anyhow::Result;
use clap::Parser;
use signup_flow::{registration_metrics, SignupConfig};

mod cli;

use cli::commands::register::RegisterCommand;
use cli::commands::show_config::ShowConfigCommand;
use cli::commands::status::StatusCommand;
use cli::commands::validate::ValidateCommand;
use cli::commands::{show_how_to_get_started, Command};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    SignupConfig::load_env_file()?;
    let config = SignupConfig::load()?;
    signup_flow::init_telemetry(&config.observability)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        match cli.command {
            // Default behavior: no subcommand - explain how to sign up
            None => show_how_to_get_started().await,
            Some(Commands::Register { details }) => {
                RegisterCommand::new(config.clone(), details.into())
                    .execute()
                    .await
            }
            Some(Commands::Validate { details }) => {
                ValidateCommand::new(details.into()).execute().await
            }
            Some(Commands::Status { session }) => {
                StatusCommand::new(config.clone(), session).execute().await
            }
            Some(Commands::Config) => ShowConfigCommand::new(config.clone()).execute().await,
        }
    });

    if config.observability.metrics_enabled {
        registration_metrics().log_stats();
    }
    signup_flow::shutdown_telemetry();

    result
}
