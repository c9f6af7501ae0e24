//! URL building utilities for API endpoints

use crate::constants::yahoo::GAME_CODE;

/// Builds the URL of one page of a league's players with their season stats.
///
/// # Arguments
/// * `api_base` - The base API URL
/// * `league_key` - League identifier, e.g. `428.l.1111`
/// * `start` - Zero-based offset of the first player
/// * `count` - Page size
///
/// # Example
/// ```
/// use fantasy_hoops_ranker::data_fetcher::api::build_players_url;
///
/// let url = build_players_url("https://api.example.com/v2", "428.l.1111", 50, 25);
/// assert_eq!(
///     url,
///     "https://api.example.com/v2/league/428.l.1111/players;start=50;count=25/stats?format=json"
/// );
/// ```
pub fn build_players_url(api_base: &str, league_key: &str, start: u32, count: u32) -> String {
    format!("{api_base}/league/{league_key}/players;start={start};count={count}/stats?format=json")
}

/// Builds the URL of a league's settings, which carry the stat categories.
///
/// # Example
/// ```
/// use fantasy_hoops_ranker::data_fetcher::api::build_settings_url;
///
/// let url = build_settings_url("https://api.example.com/v2", "428.l.1111");
/// assert_eq!(url, "https://api.example.com/v2/league/428.l.1111/settings?format=json");
/// ```
pub fn build_settings_url(api_base: &str, league_key: &str) -> String {
    format!("{api_base}/league/{league_key}/settings?format=json")
}

/// Builds the URL listing the logged-in user's NBA leagues.
///
/// # Example
/// ```
/// use fantasy_hoops_ranker::data_fetcher::api::build_user_leagues_url;
///
/// let url = build_user_leagues_url("https://api.example.com/v2");
/// assert_eq!(
///     url,
///     "https://api.example.com/v2/users;use_login=1/games;game_keys=nba/leagues?format=json"
/// );
/// ```
pub fn build_user_leagues_url(api_base: &str) -> String {
    format!("{api_base}/users;use_login=1/games;game_keys={GAME_CODE}/leagues?format=json")
}
