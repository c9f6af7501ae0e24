//! Turns decoded player pages into flat [`PlayerRecord`]s.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::stat_categories::StatCategoryMap;
use crate::data_fetcher::models::{IdentityField, PlayerEntry, PlayerRecord, PlayersPage};

/// Result of flattening one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedPage {
    pub records: Vec<PlayerRecord>,
    /// Raw entries on the page, including skipped ones.
    pub item_count: usize,
    pub skipped: usize,
    /// Stat readings dropped from otherwise valid players.
    pub rejected_readings: usize,
}

/// Flattens every entry of `page`, naming stats through `categories`.
pub fn flatten_page(page: &PlayersPage, categories: &StatCategoryMap) -> FlattenedPage {
    let mut records = Vec::with_capacity(page.entries.entries().len());
    let mut skipped = page.entries.rejected().len();
    let mut rejected_readings = 0;

    for entry in page.entries.entries() {
        match flatten_entry(entry, categories) {
            Some(record) => {
                rejected_readings += rejected_reading_count(entry);
                records.push(record);
            }
            None => skipped += 1,
        }
    }

    FlattenedPage {
        records,
        item_count: page.item_count(),
        skipped,
        rejected_readings,
    }
}

fn rejected_reading_count(entry: &PlayerEntry) -> usize {
    entry
        .stats()
        .map_or(0, |player_stats| player_stats.stats.rejected().len())
}

/// Flattens a single player entry. Returns `None` (and logs) when the entry
/// has no identity section or no player key.
pub fn flatten_entry(entry: &PlayerEntry, categories: &StatCategoryMap) -> Option<PlayerRecord> {
    let Some(identity) = entry.identity() else {
        warn!("Skipping player entry without an identity section");
        return None;
    };

    let mut player_key = None;
    let mut player_id = None;
    let mut full_name = None;
    let mut team = None;
    let mut primary_position = None;
    let mut display_position = None;

    for field in identity {
        match field {
            IdentityField::PlayerKey { player_key: key } => player_key = Some(key.clone()),
            IdentityField::PlayerId { player_id: id } => player_id = Some(id.to_string()),
            IdentityField::Name { name } => full_name = Some(name.full.clone()),
            IdentityField::EditorialTeamAbbr { editorial_team_abbr } => {
                team = Some(editorial_team_abbr.clone())
            }
            IdentityField::PrimaryPosition { primary_position: pos } => {
                primary_position = Some(pos.clone())
            }
            IdentityField::DisplayPosition { display_position: pos } => {
                display_position = Some(pos.clone())
            }
            IdentityField::Other(_) => {}
        }
    }

    let Some(player_key) = player_key.filter(|key| !key.is_empty()) else {
        warn!(
            "Skipping player entry without a player key (name: {})",
            full_name.as_deref().unwrap_or("unknown")
        );
        return None;
    };

    let mut stats = BTreeMap::new();
    match entry.stats() {
        Some(player_stats) => {
            for reading in player_stats.stats.entries() {
                let field = categories.field_name(reading.stat.stat_id.as_str());
                stats.insert(field, reading.stat.value.clone());
            }
            for rejected in player_stats.stats.rejected() {
                warn!(
                    "Player {player_key}: dropping malformed stat reading {}: {}",
                    rejected.index, rejected.reason
                );
            }
        }
        None if entry.has_unreadable_stats() => {
            warn!("Player {player_key} has an unreadable stats section, keeping identity only")
        }
        None => debug!("Player {player_key} has no stats section"),
    }

    Some(PlayerRecord {
        player_key,
        player_id,
        full_name: full_name.unwrap_or_default(),
        editorial_team_abbr: team.unwrap_or_default(),
        primary_position: primary_position.unwrap_or_default(),
        display_position,
        stats,
    })
}
