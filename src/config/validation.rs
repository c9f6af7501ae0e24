use crate::error::AppError;
use std::path::Path;

use super::Config;

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Validates the configuration settings
///
/// # Validation Rules
/// - Consumer key and secret cannot be empty
/// - API base, authorization and token endpoints must be http(s) URLs
/// - Page size and the exported top-N must be positive
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
/// - League key, when set, must look like `<game>.l.<id>`
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.consumer_key.trim().is_empty() {
        return Err(AppError::config_error("Consumer key cannot be empty"));
    }
    if config.consumer_secret.trim().is_empty() {
        return Err(AppError::config_error("Consumer secret cannot be empty"));
    }

    for (name, url) in [
        ("API base URL", &config.api_base_url),
        ("Authorization URL", &config.auth_url),
        ("Token URL", &config.token_url),
    ] {
        if !is_http_url(url) {
            return Err(AppError::config_error(format!(
                "{name} must start with http:// or https:// (got '{url}')"
            )));
        }
    }

    if config.page_size == 0 {
        return Err(AppError::config_error("Page size must be at least 1"));
    }
    if config.top_n == 0 {
        return Err(AppError::config_error("Top-N must be at least 1"));
    }

    if let Some(league_key) = &config.league_key
        && !league_key.contains(".l.")
    {
        return Err(AppError::config_error(format!(
            "League key '{league_key}' should look like 'nba.l.12345'"
        )));
    }

    if let Some(log_path) = &config.log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
