//! Flattened raw stats of every ingested player (`nba_player_stats.csv`).

use std::collections::BTreeSet;
use std::path::Path;

use super::{finish, write_artifact};
use crate::data_fetcher::models::PlayerRecord;
use crate::data_fetcher::processors::StatCategoryMap;
use crate::error::AppError;

const IDENTITY_COLUMNS: [&str; 6] = [
    "player_key",
    "player_id",
    "full_name",
    "editorial_team_abbr",
    "display_position",
    "primary_position",
];

/// Stat columns: league categories in league order, then any other stat
/// field seen on a record, sorted.
fn stat_columns(records: &[PlayerRecord], categories: &StatCategoryMap) -> Vec<String> {
    let mut columns: Vec<String> = categories.display_names().map(str::to_string).collect();
    let known: BTreeSet<&str> = categories.display_names().collect();

    let extra: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.stats.keys())
        .map(String::as_str)
        .filter(|name| !known.contains(name))
        .collect();
    columns.extend(extra.into_iter().map(str::to_string));
    columns
}

pub fn player_stats_csv(
    records: &[PlayerRecord],
    categories: &StatCategoryMap,
) -> Result<Vec<u8>, AppError> {
    let columns = stat_columns(records, categories);
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(
        IDENTITY_COLUMNS
            .iter()
            .copied()
            .chain(columns.iter().map(String::as_str)),
    )?;

    for record in records {
        let mut row = vec![
            record.player_key.clone(),
            record.player_id.clone().unwrap_or_default(),
            record.full_name.clone(),
            record.editorial_team_abbr.clone(),
            record.display_position.clone().unwrap_or_default(),
            record.primary_position.clone(),
        ];
        row.extend(
            columns
                .iter()
                .map(|column| record.stat(column).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    finish(writer)
}

pub async fn write_player_stats_csv(
    path: &Path,
    records: &[PlayerRecord],
    categories: &StatCategoryMap,
) -> Result<(), AppError> {
    let contents = player_stats_csv(records, categories)?;
    write_artifact(path, &contents).await
}
