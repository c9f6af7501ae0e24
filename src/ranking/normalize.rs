//! Coercion of raw stat values into the typed ranking schema.
//!
//! Every rule here is soft: a value that cannot be read is logged at debug
//! level and replaced by the rule's fallback (null or zero).

use tracing::debug;

use super::categories::{Category, FIELD_GOALS_MADE_ATTEMPTED, FREE_THROWS_MADE_ATTEMPTED};
use crate::data_fetcher::models::{PlayerRecord, StatValue};

/// Splits a `made/attempted` composite into its two numbers.
///
/// Anything other than exactly two numeric halves around one `/` yields
/// `(None, None)`.
pub fn parse_fraction(value: &StatValue) -> (Option<f64>, Option<f64>) {
    let StatValue::Text(text) = value else {
        return (None, None);
    };

    let mut parts = text.split('/');
    let (Some(made), Some(attempted), None) = (parts.next(), parts.next(), parts.next()) else {
        return (None, None);
    };

    match (made.trim().parse::<f64>(), attempted.trim().parse::<f64>()) {
        (Ok(made), Ok(attempted)) if made.is_finite() && attempted.is_finite() => {
            (Some(made), Some(attempted))
        }
        _ => (None, None),
    }
}

/// Reads a 0–1 ratio and returns it as a whole percentage. Halves round to
/// the even neighbour (`.125` is 12, `.375` is 38).
pub fn normalize_percentage(value: &StatValue) -> Option<u8> {
    let ratio = value.as_f64()?;
    let scaled = (ratio * 100.0).round_ties_even();
    if (0.0..=100.0).contains(&scaled) {
        Some(scaled as u8)
    } else {
        debug!("Percentage {ratio} is outside [0, 1], treating as missing");
        None
    }
}

/// Reads a counting stat. Missing, unreadable and negative values are 0;
/// fractions truncate.
pub fn normalize_count(value: &StatValue) -> u32 {
    match value.as_f64() {
        Some(n) if n >= 0.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// A player with every ranking field typed.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlayerRecord {
    pub player_key: String,
    pub full_name: String,
    pub editorial_team_abbr: String,
    pub primary_position: String,
    pub display_position: Option<String>,
    pub field_goals_made: Option<f64>,
    pub field_goals_attempted: Option<f64>,
    pub field_goal_pct: Option<u8>,
    pub free_throws_made: Option<f64>,
    pub free_throws_attempted: Option<f64>,
    pub free_throw_pct: Option<u8>,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub three_pointers_made: u32,
    pub turnovers: u32,
}

impl NormalizedPlayerRecord {
    pub fn percentage(&self, category: Category) -> Option<u8> {
        match category {
            Category::FieldGoalPct => self.field_goal_pct,
            Category::FreeThrowPct => self.free_throw_pct,
            _ => None,
        }
    }

    pub fn count(&self, category: Category) -> Option<u32> {
        match category {
            Category::Points => Some(self.points),
            Category::Rebounds => Some(self.rebounds),
            Category::Assists => Some(self.assists),
            Category::Steals => Some(self.steals),
            Category::Blocks => Some(self.blocks),
            Category::ThreePointersMade => Some(self.three_pointers_made),
            Category::Turnovers => Some(self.turnovers),
            Category::FieldGoalPct | Category::FreeThrowPct => None,
        }
    }

    /// Value entering the z-score computation. A null percentage counts as 0.
    pub fn category_value(&self, category: Category) -> f64 {
        if category.is_percentage() {
            self.percentage(category).map_or(0.0, f64::from)
        } else {
            self.count(category).map_or(0.0, f64::from)
        }
    }
}

fn stat<'a>(record: &'a PlayerRecord, name: &str) -> &'a StatValue {
    static MISSING: StatValue = StatValue::Missing;
    record.stat(name).unwrap_or(&MISSING)
}

fn percentage_field(record: &PlayerRecord, category: Category) -> Option<u8> {
    let raw = stat(record, category.display_name());
    let value = normalize_percentage(raw);
    if value.is_none() && *raw != StatValue::Missing {
        debug!(
            "{}: unreadable {} value {:?}",
            record.player_key,
            category.display_name(),
            raw
        );
    }
    value
}

fn count_field(record: &PlayerRecord, category: Category) -> u32 {
    let raw = stat(record, category.display_name());
    if raw.as_f64().is_none() && *raw != StatValue::Missing {
        debug!(
            "{}: unreadable {} value {:?}, using 0",
            record.player_key,
            category.display_name(),
            raw
        );
    }
    normalize_count(raw)
}

pub fn normalize_player(record: &PlayerRecord) -> NormalizedPlayerRecord {
    let (field_goals_made, field_goals_attempted) =
        parse_fraction(stat(record, FIELD_GOALS_MADE_ATTEMPTED));
    let (free_throws_made, free_throws_attempted) =
        parse_fraction(stat(record, FREE_THROWS_MADE_ATTEMPTED));

    NormalizedPlayerRecord {
        player_key: record.player_key.clone(),
        full_name: record.full_name.clone(),
        editorial_team_abbr: record.editorial_team_abbr.clone(),
        primary_position: record.primary_position.clone(),
        display_position: record.display_position.clone(),
        field_goals_made,
        field_goals_attempted,
        field_goal_pct: percentage_field(record, Category::FieldGoalPct),
        free_throws_made,
        free_throws_attempted,
        free_throw_pct: percentage_field(record, Category::FreeThrowPct),
        points: count_field(record, Category::Points),
        rebounds: count_field(record, Category::Rebounds),
        assists: count_field(record, Category::Assists),
        steals: count_field(record, Category::Steals),
        blocks: count_field(record, Category::Blocks),
        three_pointers_made: count_field(record, Category::ThreePointersMade),
        turnovers: count_field(record, Category::Turnovers),
    }
}

pub fn normalize_players(records: &[PlayerRecord]) -> Vec<NormalizedPlayerRecord> {
    records.iter().map(normalize_player).collect()
}
