//! Schema of the league players resource (`/league/{key}/players;…/stats`).
//!
//! Each player entry is a two-element array: an identity section (an array of
//! single-key objects, interleaved with empty arrays) and a stats section.
//!
//! ```json
//! {"player": [
//!   [{"player_key": "428.p.3704"}, {"player_id": "3704"},
//!    {"name": {"full": "LeBron James", "first": "LeBron", "last": "James"}},
//!    {"editorial_team_abbr": "LAL"}, [], {"display_position": "SF,PF"},
//!    {"primary_position": "SF"}],
//!   {"player_stats": {"0": {"coverage_type": "season"},
//!                     "stats": [{"stat": {"stat_id": "12", "value": "1654"}}]}}
//! ]}
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::common::FlexString;
use super::indexed::Indexed;
use super::records::StatValue;

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntry {
    pub player: Vec<PlayerPart>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlayerPart {
    Identity(Vec<IdentityField>),
    Stats { player_stats: PlayerStats },
    Other(Value),
}

/// One fragment of the identity section. Unknown fragments are kept as
/// `Other` and ignored by the flattener.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdentityField {
    PlayerKey { player_key: String },
    PlayerId { player_id: FlexString },
    Name { name: PlayerName },
    EditorialTeamAbbr { editorial_team_abbr: String },
    DisplayPosition { display_position: String },
    PrimaryPosition { primary_position: String },
    Other(Value),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerName {
    pub full: String,
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

/// Readings are validated one by one, so a single malformed reading is
/// rejected without losing the rest of the section.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub stats: Indexed<StatEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatEntry {
    pub stat: StatReading,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatReading {
    pub stat_id: FlexString,
    #[serde(default)]
    pub value: StatValue,
}

/// One decoded page of the players resource.
#[derive(Debug, Clone, Default)]
pub struct PlayersPage {
    pub entries: Indexed<PlayerEntry>,
}

impl PlayersPage {
    /// Number of player entries the page reports, including malformed ones.
    pub fn item_count(&self) -> usize {
        self.entries.raw_len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PlayerEntry {
    pub fn identity(&self) -> Option<&[IdentityField]> {
        self.player.iter().find_map(|part| match part {
            PlayerPart::Identity(fields) => Some(fields.as_slice()),
            _ => None,
        })
    }

    pub fn stats(&self) -> Option<&PlayerStats> {
        self.player.iter().find_map(|part| match part {
            PlayerPart::Stats { player_stats } => Some(player_stats),
            _ => None,
        })
    }

    /// True when a `player_stats` section was sent but did not decode.
    pub fn has_unreadable_stats(&self) -> bool {
        self.stats().is_none()
            && self.player.iter().any(|part| {
                matches!(part, PlayerPart::Other(Value::Object(map)) if map.contains_key("player_stats"))
            })
    }
}
