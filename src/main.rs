// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, Command};
use fantasy_hoops_ranker::config::Config;
use fantasy_hoops_ranker::error::AppError;
use tracing::{error, info};

async fn run(args: Args) -> Result<(), AppError> {
    // A first run must not prompt before logging is up.
    let config_log_path = logging::configured_log_path(&Config::get_config_path()).await;

    let (log_file_path, _guard) = logging::setup_logging(&args, config_log_path.as_ref()).await?;
    info!("Logs are being written to: {log_file_path}");

    let result = match args.command() {
        Command::ListConfig => commands::handle_list_config_command().await,
        Command::SetLeague => match &args.set_league {
            Some(league_key) => commands::handle_set_league_command(league_key).await,
            None => Ok(()),
        },
        Command::Show => commands::handle_show_command(&args).await,
        Command::ListLeagues => commands::handle_list_leagues_command(&args).await,
        Command::Rank => commands::handle_rank_command(&args).await,
    };

    if let Err(e) = &result {
        error!("{:?} error: {e}", e.kind());
    }
    result
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
