use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR_NAME, auth::CREDENTIAL_FILE_NAME};

fn app_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    app_config_dir()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    app_config_dir()
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the default location of the persisted OAuth credential.
///
/// The credential lives next to the config file so a single directory holds
/// everything a subsequent run needs to skip interactive authorization.
pub fn get_credential_path() -> String {
    app_config_dir()
        .join(CREDENTIAL_FILE_NAME)
        .to_string_lossy()
        .to_string()
}
