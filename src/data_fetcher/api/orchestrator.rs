// src/data_fetcher/api/orchestrator.rs - League ingestion: categories first, then pages until exhaustion

use tracing::{error, info, instrument, warn};

use super::client::ApiClient;
use crate::auth::TokenProvider;
use crate::data_fetcher::models::PlayerRecord;
use crate::data_fetcher::processors::{StatCategoryMap, flatten_page, resolve_stat_categories};
use crate::error::AppError;

/// How pagination ended.
#[derive(Debug)]
pub enum Completion {
    /// A page reported zero players.
    Exhausted,
    /// A page fetch failed. Players from earlier pages are kept; nothing is
    /// retried or resumed.
    Interrupted { offset: u32, error: AppError },
}

/// Players gathered by [`paginate_players`].
#[derive(Debug)]
pub struct PaginationOutcome {
    pub players: Vec<PlayerRecord>,
    pub pages_fetched: usize,
    pub entries_seen: usize,
    pub skipped_entries: usize,
    pub rejected_readings: usize,
    pub completion: Completion,
}

/// Everything one league ingestion produced.
#[derive(Debug)]
pub struct IngestReport {
    pub categories: StatCategoryMap,
    pub players: Vec<PlayerRecord>,
    pub pages_fetched: usize,
    pub entries_seen: usize,
    pub skipped_entries: usize,
    pub rejected_readings: usize,
    pub completion: Completion,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Exhausted)
    }
}

/// Walks the players resource from offset 0 in steps of `page_size` until a
/// page reports no entries or a fetch fails.
#[instrument(skip(client, categories))]
pub async fn paginate_players<P: TokenProvider>(
    client: &mut ApiClient<P>,
    league_key: &str,
    page_size: u32,
    categories: &StatCategoryMap,
) -> PaginationOutcome {
    let mut outcome = PaginationOutcome {
        players: Vec::new(),
        pages_fetched: 0,
        entries_seen: 0,
        skipped_entries: 0,
        rejected_readings: 0,
        completion: Completion::Exhausted,
    };
    let mut offset: u32 = 0;

    loop {
        let page = match client.fetch_page(league_key, offset, page_size).await {
            Ok(page) => page,
            Err(error) => {
                error!(
                    "Fetching players at offset {offset} failed, keeping {} players: {error}",
                    outcome.players.len()
                );
                outcome.completion = Completion::Interrupted { offset, error };
                return outcome;
            }
        };

        if page.item_count() == 0 {
            info!("No players at offset {offset}, pagination finished");
            return outcome;
        }

        let flattened = flatten_page(&page, categories);
        outcome.pages_fetched += 1;
        outcome.entries_seen += flattened.item_count;
        outcome.skipped_entries += flattened.skipped;
        outcome.rejected_readings += flattened.rejected_readings;
        outcome.players.extend(flattened.records);
        info!(
            "Fetched {} players at offset {offset} ({} total)",
            flattened.item_count,
            outcome.players.len()
        );

        offset = match offset.checked_add(page_size) {
            Some(next) => next,
            None => {
                warn!("Player offset overflowed after {offset}, stopping");
                return outcome;
            }
        };
    }
}

/// Resolves the league's stat categories, then paginates its players.
///
/// Only the category step can fail the call: without categories the players
/// cannot be named. Pagination failures are reported through
/// [`IngestReport::completion`].
#[instrument(skip(client))]
pub async fn ingest_league<P: TokenProvider>(
    client: &mut ApiClient<P>,
    league_key: &str,
    page_size: u32,
) -> Result<IngestReport, AppError> {
    let categories = resolve_stat_categories(client, league_key).await?;
    let outcome = paginate_players(client, league_key, page_size, &categories).await;

    if outcome.skipped_entries > 0 {
        warn!("Skipped {} malformed player entries", outcome.skipped_entries);
    }
    if outcome.rejected_readings > 0 {
        warn!("Dropped {} malformed stat readings", outcome.rejected_readings);
    }

    Ok(IngestReport {
        categories,
        players: outcome.players,
        pages_fetched: outcome.pages_fetched,
        entries_seen: outcome.entries_seen,
        skipped_entries: outcome.skipped_entries,
        rejected_readings: outcome.rejected_readings,
        completion: outcome.completion,
    })
}
