//! One ranking run: authenticate, ingest, export raw stats, rank, export ranking.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::auth::TokenProvider;
use crate::constants::ranking::{PLAYER_STATS_FILE_NAME, RANKING_FILE_NAME};
use crate::data_fetcher::api::{ApiClient, Completion, ingest_league};
use crate::error::{AppError, ErrorKind};
use crate::export::{write_player_stats_csv, write_rankings_csv};
use crate::ranking::{normalize_players, rank_players, top_ranked};

/// Pipeline stage named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authentication,
    CategoryResolution,
    Pagination,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Authentication => "authentication",
            Stage::CategoryResolution => "category resolution",
            Stage::Pagination => "pagination",
            Stage::Export => "export",
        })
    }
}

#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    pub source: AppError,
}

impl StageFailure {
    fn new(stage: Stage, source: AppError) -> Self {
        error!("{stage} failed: {source}");
        Self { stage, source }
    }
}

/// What to run and where to put the artifacts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub league_key: String,
    pub page_size: u32,
    pub top_n: usize,
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub struct RunSummary {
    pub players_fetched: usize,
    pub skipped_entries: usize,
    pub rejected_readings: usize,
    pub ranked: usize,
    pub exported: usize,
    pub stats_path: PathBuf,
    pub ranking_path: PathBuf,
    pub completion: Completion,
}

impl RunSummary {
    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Exhausted)
    }
}

pub fn ranking_path(output_dir: &Path) -> PathBuf {
    output_dir.join(RANKING_FILE_NAME)
}

pub fn player_stats_path(output_dir: &Path) -> PathBuf {
    output_dir.join(PLAYER_STATS_FILE_NAME)
}

/// Runs the whole pipeline against `client`.
///
/// An interrupted pagination still ranks and exports the players gathered
/// before the failure; only an interruption before any player was gathered
/// fails the run.
#[instrument(skip(client))]
pub async fn run_ranking<P: TokenProvider>(
    client: &mut ApiClient<P>,
    options: &RunOptions,
) -> Result<RunSummary, StageFailure> {
    client
        .tokens_mut()
        .acquire()
        .await
        .map_err(|e| StageFailure::new(Stage::Authentication, e))?;

    let report = ingest_league(client, &options.league_key, options.page_size)
        .await
        .map_err(|e| {
            let stage = if e.kind() == ErrorKind::Auth {
                Stage::Authentication
            } else {
                Stage::CategoryResolution
            };
            StageFailure::new(stage, e)
        })?;

    let completion = match report.completion {
        Completion::Interrupted { offset, error } if report.players.is_empty() => {
            warn!("No players gathered before the failure at offset {offset}");
            return Err(StageFailure::new(Stage::Pagination, error));
        }
        completion => completion,
    };

    let stats_path = player_stats_path(&options.output_dir);
    write_player_stats_csv(&stats_path, &report.players, &report.categories)
        .await
        .map_err(|e| StageFailure::new(Stage::Export, e))?;

    let normalized = normalize_players(&report.players);
    let ranked = rank_players(&normalized);
    let top = top_ranked(&ranked, options.top_n);

    let ranking_path = ranking_path(&options.output_dir);
    write_rankings_csv(&ranking_path, top)
        .await
        .map_err(|e| StageFailure::new(Stage::Export, e))?;

    info!(
        "Ranked {} players, exported top {} to {}",
        ranked.len(),
        top.len(),
        ranking_path.display()
    );

    Ok(RunSummary {
        players_fetched: report.players.len(),
        skipped_entries: report.skipped_entries,
        rejected_readings: report.rejected_readings,
        ranked: ranked.len(),
        exported: top.len(),
        stats_path,
        ranking_path,
        completion,
    })
}
