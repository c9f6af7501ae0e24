use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::auth::{Credential, TokenProvider};
use crate::data_fetcher::models::{PlayerRecord, StatValue};
use crate::error::AppError;
use crate::ranking::NormalizedPlayerRecord;

/// Stat categories of a standard 9-cat NBA league, as the settings resource
/// lists them: `(stat_id, display_name, name)`.
pub const NBA_STAT_CATEGORIES: [(u32, &str, &str); 11] = [
    (9004003, "FGM/A", "Field Goals Made / Attempted"),
    (5, "FG%", "Field Goal Percentage"),
    (9007006, "FTM/A", "Free Throws Made / Attempted"),
    (8, "FT%", "Free Throw Percentage"),
    (10, "3PTM", "3-point Shots Made"),
    (12, "PTS", "Points Scored"),
    (15, "REB", "Total Rebounds"),
    (16, "AST", "Assists"),
    (17, "ST", "Steals"),
    (18, "BLK", "Blocked Shots"),
    (19, "TO", "Turnovers"),
];

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates one player entry as the players resource encodes it.
    /// `stats` pairs are `(stat_id, value)`.
    pub fn player_entry_json(
        player_key: &str,
        full_name: &str,
        team: &str,
        position: &str,
        stats: &[(&str, &str)],
    ) -> Value {
        let player_id = player_key.rsplit('.').next().unwrap_or(player_key);
        let stats: Vec<Value> = stats
            .iter()
            .map(|(id, value)| json!({"stat": {"stat_id": id, "value": value}}))
            .collect();

        json!({"player": [
            [
                {"player_key": player_key},
                {"player_id": player_id},
                {"name": {"full": full_name}},
                {"editorial_team_abbr": team},
                [],
                {"display_position": position},
                {"primary_position": position}
            ],
            {"player_stats": {
                "0": {"coverage_type": "season"},
                "stats": stats
            }}
        ]})
    }

    /// Wraps player entries in a players document. No entries gives the
    /// `[]` form the server uses past the last page.
    pub fn players_page_json(entries: &[Value]) -> Value {
        let players = if entries.is_empty() {
            json!([])
        } else {
            let mut map = serde_json::Map::new();
            for (index, entry) in entries.iter().enumerate() {
                map.insert(index.to_string(), entry.clone());
            }
            map.insert("count".to_string(), json!(entries.len()));
            Value::Object(map)
        };

        json!({"fantasy_content": {"league": [
            {"league_key": "428.l.1", "name": "Test League"},
            {"players": players}
        ]}})
    }

    /// A settings document carrying [`NBA_STAT_CATEGORIES`].
    pub fn nba_settings_json() -> Value {
        let stats: Vec<Value> = NBA_STAT_CATEGORIES
            .iter()
            .map(|(id, display_name, name)| {
                json!({"stat": {"stat_id": id, "enabled": "1", "name": name, "display_name": display_name}})
            })
            .collect();

        json!({"fantasy_content": {"league": [
            {"league_key": "428.l.1", "name": "Test League"},
            {"settings": [{"draft_type": "live", "stat_categories": {"stats": stats}}]}
        ]}})
    }

    /// Creates a flattened record; `stats` pairs are `(display_name, value)`.
    pub fn player_record(player_key: &str, full_name: &str, stats: &[(&str, &str)]) -> PlayerRecord {
        PlayerRecord {
            player_key: player_key.to_string(),
            player_id: player_key.rsplit('.').next().map(str::to_string),
            full_name: full_name.to_string(),
            editorial_team_abbr: "LAL".to_string(),
            primary_position: "PG".to_string(),
            display_position: Some("PG".to_string()),
            stats: stats
                .iter()
                .map(|(name, value)| (name.to_string(), StatValue::Text(value.to_string())))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    /// Creates a normalized record. `counts` is PTS, REB, AST, ST, BLK, 3PTM.
    pub fn normalized_player(
        player_key: &str,
        counts: [u32; 6],
        field_goal_pct: Option<u8>,
        free_throw_pct: Option<u8>,
        turnovers: u32,
    ) -> NormalizedPlayerRecord {
        let [points, rebounds, assists, steals, blocks, three_pointers_made] = counts;
        NormalizedPlayerRecord {
            player_key: player_key.to_string(),
            full_name: format!("Player {player_key}"),
            editorial_team_abbr: "LAL".to_string(),
            primary_position: "PG".to_string(),
            display_position: Some("PG".to_string()),
            field_goals_made: None,
            field_goals_attempted: None,
            field_goal_pct,
            free_throws_made: None,
            free_throws_attempted: None,
            free_throw_pct,
            points,
            rebounds,
            assists,
            steals,
            blocks,
            three_pointers_made,
            turnovers,
        }
    }
}

/// Token provider handing out a fixed bearer token, or failing like a store
/// without any credential.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Option<String>,
    acquired: usize,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            acquired: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            token: None,
            acquired: 0,
        }
    }

    /// Number of successful `acquire` calls.
    pub fn acquired(&self) -> usize {
        self.acquired
    }

    fn credential(&self) -> Result<Credential, AppError> {
        match &self.token {
            Some(token) => Ok(Credential {
                access_token: token.clone(),
                refresh_token: format!("{token}-refresh"),
                token_type: "bearer".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            }),
            None => Err(AppError::auth_missing("static provider has no token")),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    async fn acquire(&mut self) -> Result<Credential, AppError> {
        let credential = self.credential()?;
        self.acquired += 1;
        Ok(credential)
    }

    async fn refresh(&mut self) -> Result<Credential, AppError> {
        self.credential()
    }
}
