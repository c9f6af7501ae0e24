pub mod common;
pub mod indexed;
pub mod leagues;
pub mod players;
pub mod records;
pub mod settings;

use serde::Deserialize;
use serde_json::Value;

pub use common::FlexString;
pub use indexed::{Indexed, RejectedEntry};
pub use leagues::{LeagueSummary, UsersContent};
pub use players::{IdentityField, PlayerEntry, PlayersPage, StatReading};
pub use records::{PlayerRecord, StatValue};
pub use settings::{SettingsBlock, StatCategory};

/// Every Fantasy Sports API document is wrapped in `fantasy_content`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub fantasy_content: T,
}

/// `fantasy_content` of the league-scoped resources. The `league` array holds
/// the league metadata first and the requested sub-resource second.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueContent {
    pub league: Vec<LeagueSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LeagueSection {
    Players { players: Indexed<PlayerEntry> },
    Settings { settings: Vec<SettingsBlock> },
    Other(Value),
}

impl LeagueContent {
    /// The players sub-resource, if the document carries one.
    pub fn into_players_page(self) -> Option<PlayersPage> {
        self.league.into_iter().find_map(|section| match section {
            LeagueSection::Players { players } => Some(PlayersPage { entries: players }),
            _ => None,
        })
    }

    /// The first settings block, if the document carries one.
    pub fn into_settings(self) -> Option<SettingsBlock> {
        self.league.into_iter().find_map(|section| match section {
            LeagueSection::Settings { settings } => settings.into_iter().next(),
            _ => None,
        })
    }
}
