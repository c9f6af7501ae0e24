use crate::cli::Args;
use fantasy_hoops_ranker::auth::{AuthorizationMode, CredentialFile, OAuthClient, TokenStore};
use fantasy_hoops_ranker::config::Config;
use fantasy_hoops_ranker::data_fetcher::api::{
    ApiClient, Completion, create_http_client_with_timeout,
};
use fantasy_hoops_ranker::error::AppError;
use fantasy_hoops_ranker::export::{RankingFilter, RankingTable};
use fantasy_hoops_ranker::pipeline::{RunOptions, ranking_path, run_ranking};
use fantasy_hoops_ranker::table_view::render_ranking_table;
use std::io::{IsTerminal, stdout};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Applies per-run command line overrides on top of the loaded config.
pub fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(league) = &args.league {
        config.league_key = Some(league.clone());
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
}

/// Loads the config file if there is one, without prompting.
async fn load_config_without_prompt() -> Result<Config, AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };
    config.apply_env_overrides();
    Ok(config)
}

fn build_api_client(config: &Config, args: &Args) -> Result<ApiClient<TokenStore>, AppError> {
    let http = create_http_client_with_timeout(config.http_timeout_seconds)?;
    let mode = if args.no_prompt {
        AuthorizationMode::NonInteractive
    } else {
        AuthorizationMode::Interactive
    };
    let store = TokenStore::new(
        CredentialFile::new(config.credential_path()),
        OAuthClient::new(http.clone(), config),
        mode,
    );
    Ok(ApiClient::new(http, config.api_base_url.clone(), store))
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles the --set-league command.
pub async fn handle_set_league_command(league_key: &str) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    if !Path::new(&config_path).exists() {
        // First run: prompts for the app credentials and saves the file.
        Config::load().await?;
        if !Path::new(&config_path).exists() {
            return Err(AppError::config_error(format!(
                "No config file at {config_path} to store the league in. \
                 Run once without FANTASY_CONSUMER_KEY set to create it."
            )));
        }
    }
    set_league_in_file(&config_path, league_key).await?;
    println!("Default league set to {}", league_key.trim());
    Ok(())
}

/// Rewrites the league of the config file at `config_path`. Only the file's
/// own values are saved back; `FANTASY_*` overrides never reach the file.
async fn set_league_in_file(config_path: &str, league_key: &str) -> Result<Config, AppError> {
    let mut config = Config::load_from_path(config_path).await?;
    config.league_key = Some(league_key.trim().to_string());
    config.validate()?;
    config.save_to_path(config_path).await?;
    Ok(config)
}

/// Handles the --show command: prints the ranking artifact of the last run.
pub async fn handle_show_command(args: &Args) -> Result<(), AppError> {
    let mut config = load_config_without_prompt().await?;
    apply_cli_overrides(&mut config, args);

    let path = ranking_path(Path::new(&config.output_dir));
    if !path.exists() {
        return Err(AppError::config_error(format!(
            "No ranking file at {}. Run without --show first.",
            path.display()
        )));
    }

    let table = RankingTable::load(&path).await?;
    let filter = RankingFilter {
        position: args.position.clone(),
        name_query: args.search.clone(),
    };
    let rows = table.filter(&filter);

    if !table.rows.is_empty() {
        println!("Positions: {}", table.positions().join(", "));
    }
    let mut out = stdout();
    let color = out.is_terminal();
    render_ranking_table(&mut out, &rows, table.rows.len(), &filter, color)
}

/// Handles the --list-leagues command.
pub async fn handle_list_leagues_command(args: &Args) -> Result<(), AppError> {
    let config = Config::load().await?;
    let mut client = build_api_client(&config, args)?;
    let leagues = client.fetch_user_leagues().await?;

    if leagues.is_empty() {
        println!("No NBA leagues found for this account.");
        return Ok(());
    }

    println!("{:<16} {:<8} Name", "League key", "Season");
    for league in &leagues {
        println!(
            "{:<16} {:<8} {}",
            league.league_key,
            league.season.as_ref().map(|s| s.as_str()).unwrap_or("-"),
            league.name
        );
    }
    println!("\nUse --set-league <LEAGUE_KEY> to make one the default.");
    Ok(())
}

/// Handles the default command: ingest, rank and export one league.
pub async fn handle_rank_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    let Some(league_key) = config.league_key.clone() else {
        return Err(AppError::config_error(
            "No league selected. Pass --league, or use --list-leagues and --set-league.",
        ));
    };

    let options = RunOptions {
        league_key,
        page_size: config.page_size,
        top_n: config.top_n,
        output_dir: PathBuf::from(&config.output_dir),
    };
    info!("Ranking league {}", options.league_key);

    let mut client = build_api_client(&config, args)?;
    let summary = match run_ranking(&mut client, &options).await {
        Ok(summary) => summary,
        Err(failure) => {
            eprintln!("Run stopped during {}.", failure.stage);
            return Err(failure.source);
        }
    };

    if let Completion::Interrupted { offset, error } = &summary.completion {
        warn!("Partial run: stopped at offset {offset}: {error}");
        println!(
            "Warning: player download stopped at offset {offset} ({error}). \
             Ranking uses the {} players fetched before that.",
            summary.players_fetched
        );
    }
    if summary.skipped_entries > 0 {
        println!("Skipped {} malformed player entries.", summary.skipped_entries);
    }
    if summary.rejected_readings > 0 {
        println!("Dropped {} malformed stat readings.", summary.rejected_readings);
    }

    println!(
        "Fetched {} players, ranked {}.",
        summary.players_fetched, summary.ranked
    );
    println!("Player stats: {}", summary.stats_path.display());
    println!(
        "Top {} ranking: {}",
        summary.exported,
        summary.ranking_path.display()
    );
    Ok(())
}
