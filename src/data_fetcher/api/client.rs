//! Authenticated client for the league resources.

use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::fetch_utils::fetch_json;
use super::urls::{build_players_url, build_settings_url, build_user_leagues_url};
use crate::auth::TokenProvider;
use crate::data_fetcher::models::{
    Envelope, LeagueContent, LeagueSummary, PlayersPage, SettingsBlock, UsersContent,
};
use crate::error::AppError;

/// Issues one request per call. Pagination and failure policy belong to the
/// caller (see [`super::orchestrator`]).
#[derive(Debug)]
pub struct ApiClient<P> {
    http: Client,
    base_url: String,
    tokens: P,
}

impl<P: TokenProvider> ApiClient<P> {
    pub fn new(http: Client, base_url: impl Into<String>, tokens: P) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn tokens_mut(&mut self) -> &mut P {
        &mut self.tokens
    }

    async fn get<T: serde::de::DeserializeOwned>(&mut self, url: &str) -> Result<T, AppError> {
        let credential = self.tokens.acquire().await?;
        fetch_json(&self.http, url, &credential.access_token).await
    }

    /// Fetches one page of players with season stats, starting at `offset`.
    #[instrument(skip(self))]
    pub async fn fetch_page(
        &mut self,
        league_key: &str,
        offset: u32,
        page_size: u32,
    ) -> Result<PlayersPage, AppError> {
        let url = build_players_url(&self.base_url, league_key, offset, page_size);
        let envelope: Envelope<LeagueContent> = self.get(&url).await?;

        let page = envelope
            .fantasy_content
            .into_players_page()
            .ok_or_else(|| AppError::api_unexpected_structure("league has no players section", &url))?;

        for rejected in page.entries.rejected() {
            warn!(
                "Players page at offset {offset}: entry {} does not match the player schema: {}",
                rejected.index, rejected.reason
            );
        }
        debug!("Page at offset {offset} holds {} entries", page.item_count());
        Ok(page)
    }

    /// Fetches the league settings block holding the stat categories.
    #[instrument(skip(self))]
    pub async fn fetch_settings(&mut self, league_key: &str) -> Result<SettingsBlock, AppError> {
        let url = build_settings_url(&self.base_url, league_key);
        let envelope: Envelope<LeagueContent> = self.get(&url).await?;

        envelope
            .fantasy_content
            .into_settings()
            .ok_or_else(|| AppError::api_unexpected_structure("league has no settings section", &url))
    }

    /// Lists the NBA leagues of the logged-in user.
    #[instrument(skip(self))]
    pub async fn fetch_user_leagues(&mut self) -> Result<Vec<LeagueSummary>, AppError> {
        let url = build_user_leagues_url(&self.base_url);
        let envelope: Envelope<UsersContent> = self.get(&url).await?;
        Ok(envelope.fantasy_content.leagues())
    }
}
