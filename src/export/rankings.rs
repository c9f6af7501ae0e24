//! The ranking artifact (`nba_fantasy_ranking_top150.csv`) and its read-only
//! filtering contract.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::{finish, write_artifact};
use crate::error::AppError;
use crate::ranking::RankedPlayerRecord;

/// Column order of the ranking artifact.
pub const RANKING_HEADER: [&str; 14] = [
    "rank",
    "full_name",
    "editorial_team_abbr",
    "primary_position",
    "Fantasy_Score",
    "PTS",
    "REB",
    "AST",
    "ST",
    "BLK",
    "3PTM",
    "FG%",
    "FT%",
    "TO",
];

/// One line of the ranking artifact. Field order matches [`RANKING_HEADER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    pub full_name: String,
    pub editorial_team_abbr: String,
    pub primary_position: String,
    #[serde(rename = "Fantasy_Score")]
    pub fantasy_score: f64,
    #[serde(rename = "PTS")]
    pub points: u32,
    #[serde(rename = "REB")]
    pub rebounds: u32,
    #[serde(rename = "AST")]
    pub assists: u32,
    #[serde(rename = "ST")]
    pub steals: u32,
    #[serde(rename = "BLK")]
    pub blocks: u32,
    #[serde(rename = "3PTM")]
    pub three_pointers_made: u32,
    #[serde(rename = "FG%")]
    pub field_goal_pct: Option<u8>,
    #[serde(rename = "FT%")]
    pub free_throw_pct: Option<u8>,
    #[serde(rename = "TO")]
    pub turnovers: u32,
}

impl From<&RankedPlayerRecord> for RankingRow {
    fn from(ranked: &RankedPlayerRecord) -> Self {
        let player = &ranked.player;
        RankingRow {
            rank: ranked.rank,
            full_name: player.full_name.clone(),
            editorial_team_abbr: player.editorial_team_abbr.clone(),
            primary_position: player.primary_position.clone(),
            fantasy_score: ranked.fantasy_score,
            points: player.points,
            rebounds: player.rebounds,
            assists: player.assists,
            steals: player.steals,
            blocks: player.blocks,
            three_pointers_made: player.three_pointers_made,
            field_goal_pct: player.field_goal_pct,
            free_throw_pct: player.free_throw_pct,
            turnovers: player.turnovers,
        }
    }
}

/// Renders ranked players as CSV. The header is written even when there are
/// no rows.
pub fn rankings_csv(ranked: &[RankedPlayerRecord]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(RANKING_HEADER)?;
    for record in ranked {
        writer.serialize(RankingRow::from(record))?;
    }
    finish(writer)
}

pub async fn write_rankings_csv(path: &Path, ranked: &[RankedPlayerRecord]) -> Result<(), AppError> {
    let contents = rankings_csv(ranked)?;
    write_artifact(path, &contents).await
}

/// Loads a ranking artifact. An empty or header-only file yields no rows.
pub async fn read_rankings_csv(path: &Path) -> Result<Vec<RankingRow>, AppError> {
    let raw = fs::read(path).await?;
    parse_rankings(&raw)
}

fn parse_rankings(raw: &[u8]) -> Result<Vec<RankingRow>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(raw);

    let mut rows = Vec::new();
    for row in reader.deserialize::<RankingRow>() {
        rows.push(row?);
    }
    debug!("Read {} ranking rows", rows.len());
    Ok(rows)
}

/// Position and name filters over the ranking artifact.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingFilter {
    /// Exact primary position, e.g. `PG`.
    pub position: Option<String>,
    /// Case-insensitive substring of the player name.
    pub name_query: Option<String>,
}

impl RankingFilter {
    pub fn matches(&self, row: &RankingRow) -> bool {
        let position_ok = self
            .position
            .as_deref()
            .is_none_or(|position| row.primary_position == position);

        let name_ok = match self.name_query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => row
                .full_name
                .to_lowercase()
                .contains(&query.to_lowercase()),
        };

        position_ok && name_ok
    }

    pub fn apply<'a>(&self, rows: &'a [RankingRow]) -> Vec<&'a RankingRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Rows of a loaded artifact plus what the viewer needs to present them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingTable {
    pub rows: Vec<RankingRow>,
}

impl RankingTable {
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        Ok(Self {
            rows: read_rankings_csv(path).await?,
        })
    }

    /// Distinct primary positions, sorted.
    pub fn positions(&self) -> Vec<&str> {
        let mut positions: Vec<&str> = self
            .rows
            .iter()
            .map(|row| row.primary_position.as_str())
            .filter(|position| !position.is_empty())
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    pub fn filter(&self, filter: &RankingFilter) -> Vec<&RankingRow> {
        filter.apply(&self.rows)
    }
}
