use crate::cli::Args;
use fantasy_hoops_ranker::config::Config;
use fantasy_hoops_ranker::constants::LOG_FILE_NAME;
use fantasy_hoops_ranker::error::AppError;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Resolves the log directory and file name: `--log-file` first, then the
/// config's `log_file_path`, then the default log directory.
fn resolve_log_location(args: &Args, config_log_path: Option<&String>) -> (String, String) {
    match args.log_file.as_ref().or(config_log_path) {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    }
}

/// Log path configured outside the command line: the config file's
/// `log_file_path` with `FANTASY_*` overrides applied. Never prompts; a
/// missing or unreadable config file counts as default settings.
pub async fn configured_log_path(config_path: &str) -> Option<String> {
    let mut config = Config::load_from_path(config_path)
        .await
        .unwrap_or_default();
    config.apply_env_overrides();
    config.log_file_path
}

fn build_filter(debug: bool) -> Result<EnvFilter, AppError> {
    let directive = if debug {
        "fantasy_hoops_ranker=debug"
    } else {
        "fantasy_hoops_ranker=info"
    };
    let directive = directive
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Sets up logging for the run.
///
/// - Always logs to a daily rolling file
/// - Also logs to stderr unless `--quiet` is given
/// - `--debug` raises the crate's level to debug
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(
    args: &Args,
    config_log_path: Option<&String>,
) -> Result<(String, WorkerGuard), AppError> {
    let (log_dir, log_file_name) = resolve_log_location(args, config_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost.
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(build_filter(args.debug)?);

    let console_layer = (!args.quiet).then(|| {
        build_filter(args.debug).map(|filter| {
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false)
                .with_filter(filter)
        })
    });
    let console_layer = console_layer.transpose()?;

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_cli_log_file_wins_over_config() {
        let args = Args::parse_from(["fantasy_hoops_ranker", "--log-file", "/tmp/x/run.log"]);
        let config_path = "/var/log/other.log".to_string();
        let (dir, file) = resolve_log_location(&args, Some(&config_path));
        assert_eq!(dir, "/tmp/x");
        assert_eq!(file, "run.log");
    }

    #[test]
    fn test_config_log_path_used_without_flag() {
        let args = Args::parse_from(["fantasy_hoops_ranker"]);
        let config_path = "ranker.log".to_string();
        let (dir, file) = resolve_log_location(&args, Some(&config_path));
        assert_eq!(dir, ".");
        assert_eq!(file, "ranker.log");
    }

    #[test]
    fn test_default_location() {
        let args = Args::parse_from(["fantasy_hoops_ranker"]);
        let (dir, file) = resolve_log_location(&args, None);
        assert_eq!(dir, Config::get_log_dir_path());
        assert_eq!(file, LOG_FILE_NAME);
    }

    #[tokio::test]
    #[serial]
    async fn test_env_log_file_applies_without_config_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        unsafe {
            std::env::set_var("FANTASY_LOG_FILE", "/tmp/env-logs/ranker.log");
        }

        let configured = configured_log_path(&missing.to_string_lossy()).await;

        unsafe {
            std::env::remove_var("FANTASY_LOG_FILE");
        }
        assert_eq!(configured.as_deref(), Some("/tmp/env-logs/ranker.log"));

        let args = Args::parse_from(["fantasy_hoops_ranker"]);
        let (dir, file) = resolve_log_location(&args, configured.as_ref());
        assert_eq!(dir, "/tmp/env-logs");
        assert_eq!(file, "ranker.log");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_log_file_overrides_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            "consumer_key = \"k\"\nconsumer_secret = \"s\"\nlog_file_path = \"/var/log/from-file.log\"\n",
        )
        .await
        .unwrap();
        let config_path = config_path.to_string_lossy().to_string();

        assert_eq!(
            configured_log_path(&config_path).await.as_deref(),
            Some("/var/log/from-file.log")
        );

        unsafe {
            std::env::set_var("FANTASY_LOG_FILE", "/tmp/env-logs/override.log");
        }
        let configured = configured_log_path(&config_path).await;
        unsafe {
            std::env::remove_var("FANTASY_LOG_FILE");
        }
        assert_eq!(configured.as_deref(), Some("/tmp/env-logs/override.log"));

        let args = Args::parse_from(["fantasy_hoops_ranker", "--log-file", "cli.log"]);
        let (_, file) = resolve_log_location(&args, configured.as_ref());
        assert_eq!(file, "cli.log");
    }

    #[test]
    fn test_filter_directives_parse() {
        assert!(build_filter(false).is_ok());
        assert!(build_filter(true).is_ok());
    }
}
