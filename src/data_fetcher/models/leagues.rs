//! Schema of the league listing resource
//! (`/users;use_login=1/games;game_keys=nba/leagues`).
//!
//! users → user[1].games → game[1].leagues → league[0]

use serde::Deserialize;
use serde_json::Value;

use super::common::FlexString;
use super::indexed::Indexed;

#[derive(Debug, Clone, Deserialize)]
pub struct UsersContent {
    pub users: Indexed<UserEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub user: Vec<UserPart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UserPart {
    Games { games: Indexed<GameEntry> },
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameEntry {
    pub game: Vec<GamePart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GamePart {
    Leagues { leagues: Indexed<LeagueEntry> },
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueEntry {
    pub league: Vec<LeaguePart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LeaguePart {
    Summary(LeagueSummary),
    Other(Value),
}

/// A league the logged-in user belongs to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeagueSummary {
    pub league_key: String,
    pub name: String,
    #[serde(default)]
    pub season: Option<FlexString>,
    #[serde(default)]
    pub num_teams: Option<u32>,
}

impl UsersContent {
    /// All leagues across every user and game in the listing, in server order.
    pub fn leagues(&self) -> Vec<LeagueSummary> {
        self.users
            .entries()
            .iter()
            .flat_map(|user| user.user.iter())
            .filter_map(|part| match part {
                UserPart::Games { games } => Some(games),
                UserPart::Other(_) => None,
            })
            .flat_map(|games| games.entries().iter())
            .flat_map(|game| game.game.iter())
            .filter_map(|part| match part {
                GamePart::Leagues { leagues } => Some(leagues),
                GamePart::Other(_) => None,
            })
            .flat_map(|leagues| leagues.entries().iter())
            .filter_map(|league| {
                league.league.iter().find_map(|part| match part {
                    LeaguePart::Summary(summary) => Some(summary.clone()),
                    LeaguePart::Other(_) => None,
                })
            })
            .collect()
    }
}
