//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Number of players requested per page from the league players resource
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Number of ranked players written to the ranking artifact
pub const DEFAULT_TOP_N: usize = 150;

/// Application directory name under the platform config directory
pub const APP_DIR_NAME: &str = "fantasy_hoops_ranker";

/// Default log file name
pub const LOG_FILE_NAME: &str = "fantasy_hoops_ranker.log";

/// Yahoo Fantasy Sports endpoints
pub mod yahoo {
    /// Base URL of the Fantasy Sports v2 REST API
    pub const API_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

    /// OAuth2 authorization endpoint (interactive consent)
    pub const AUTH_URL: &str = "https://api.login.yahoo.com/oauth2/request_auth";

    /// OAuth2 token endpoint (code exchange and refresh)
    pub const TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";

    /// Out-of-band redirect: the verifier code is shown to the user instead of redirected
    pub const REDIRECT_URI_OOB: &str = "oob";

    /// Game code for basketball leagues
    pub const GAME_CODE: &str = "nba";
}

/// Credential handling
pub mod auth {
    /// A token this close to its expiry is treated as expired
    pub const EXPIRY_LEEWAY_SECONDS: i64 = 60;

    /// Fallback lifetime when the token endpoint omits `expires_in`
    pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;

    /// File name of the persisted credential inside the config directory
    pub const CREDENTIAL_FILE_NAME: &str = "token.json";
}

/// Ranking and export
pub mod ranking {
    /// Standard deviations below this are treated as zero (non-discriminating category)
    pub const STDEV_EPSILON: f64 = 1e-9;

    /// Default directory for generated CSV artifacts
    pub const DEFAULT_OUTPUT_DIR: &str = "data";

    /// File name of the ranking artifact
    pub const RANKING_FILE_NAME: &str = "nba_fantasy_ranking_top150.csv";

    /// File name of the flattened raw player stats
    pub const PLAYER_STATS_FILE_NAME: &str = "nba_player_stats.csv";
}
