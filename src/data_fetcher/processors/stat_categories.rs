//! Stat id to display name resolution.

use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use crate::auth::TokenProvider;
use crate::data_fetcher::api::ApiClient;
use crate::data_fetcher::models::SettingsBlock;
use crate::error::AppError;

/// Mapping from stat id to display name for one league, in the order the
/// league lists its categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatCategoryMap {
    ordered: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl StatCategoryMap {
    /// Builds the map from `(stat_id, display_name)` pairs. Later duplicates
    /// of an id are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = StatCategoryMap::default();
        for (id, name) in pairs {
            let id = id.into();
            if map.index.contains_key(&id) {
                warn!("Duplicate stat id {id} in league settings, keeping the first");
                continue;
            }
            map.index.insert(id.clone(), map.ordered.len());
            map.ordered.push((id, name.into()));
        }
        map
    }

    pub fn from_settings(settings: &SettingsBlock) -> Self {
        let pairs = settings
            .stat_categories
            .iter()
            .flat_map(|categories| categories.stats.iter())
            .map(|entry| {
                (
                    entry.stat.stat_id.as_str().to_string(),
                    entry.stat.display_name.clone(),
                )
            });
        Self::from_pairs(pairs)
    }

    pub fn display_name(&self, stat_id: &str) -> Option<&str> {
        self.index
            .get(stat_id)
            .map(|&position| self.ordered[position].1.as_str())
    }

    /// Column name for a stat: its display name, or `stat_<id>` when unknown.
    pub fn field_name(&self, stat_id: &str) -> String {
        match self.display_name(stat_id) {
            Some(name) => name.to_string(),
            None => format!("stat_{stat_id}"),
        }
    }

    /// Display names in league order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Fetches a league's settings once and builds its category map.
///
/// A league without categories cannot be ranked, so an empty list is an
/// error rather than an empty map.
#[instrument(skip(client))]
pub async fn resolve_stat_categories<P: TokenProvider>(
    client: &mut ApiClient<P>,
    league_key: &str,
) -> Result<StatCategoryMap, AppError> {
    let settings = client.fetch_settings(league_key).await?;
    let map = StatCategoryMap::from_settings(&settings);

    if map.is_empty() {
        return Err(AppError::no_stat_categories(league_key));
    }

    info!("Resolved {} stat categories for league {league_key}", map.len());
    debug!("Categories: {:?}", map.display_names().collect::<Vec<_>>());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use crate::error::ErrorKind;
    use crate::testing_utils::{StaticTokenProvider, TestDataBuilder};
    use serde_json::json;
    use wiremock::{Mock, MockServer, ResponseTemplate, matchers::method};

    #[test]
    fn test_field_name_falls_back_to_stat_id() {
        let map = StatCategoryMap::from_pairs([("12", "PTS"), ("15", "REB")]);
        assert_eq!(map.field_name("12"), "PTS");
        assert_eq!(map.field_name("999"), "stat_999");
        assert_eq!(map.display_name("999"), None);
    }

    #[test]
    fn test_order_is_preserved_and_first_duplicate_wins() {
        let map = StatCategoryMap::from_pairs([("15", "REB"), ("12", "PTS"), ("15", "Rebounds")]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.display_names().collect::<Vec<_>>(), vec!["REB", "PTS"]);
        assert_eq!(map.display_name("15"), Some("REB"));
    }

    #[test]
    fn test_from_settings_stringifies_numeric_ids() {
        let block: SettingsBlock = serde_json::from_value(json!({
            "stat_categories": {"stats": [
                {"stat": {"stat_id": 9004003, "display_name": "FGM/A"}},
                {"stat": {"stat_id": "5", "display_name": "FG%"}}
            ]}
        }))
        .unwrap();
        let map = StatCategoryMap::from_settings(&block);
        assert_eq!(map.display_name("9004003"), Some("FGM/A"));
        assert_eq!(map.display_name("5"), Some("FG%"));
    }

    #[tokio::test]
    async fn test_resolve_full_nba_category_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestDataBuilder::nba_settings_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = ApiClient::new(
            create_test_http_client(),
            server.uri(),
            StaticTokenProvider::new("t"),
        );
        let map = resolve_stat_categories(&mut client, "428.l.1").await.unwrap();
        assert_eq!(map.len(), 11);
        assert_eq!(map.display_name("19"), Some("TO"));
        assert_eq!(map.display_name("10"), Some("3PTM"));
    }

    #[tokio::test]
    async fn test_resolve_without_categories_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fantasy_content": {"league": [
                    {"league_key": "428.l.1"},
                    {"settings": [{"draft_type": "live"}]}
                ]}
            })))
            .mount(&server)
            .await;

        let mut client = ApiClient::new(
            create_test_http_client(),
            server.uri(),
            StaticTokenProvider::new("t"),
        );
        let error = resolve_stat_categories(&mut client, "428.l.1").await.unwrap_err();
        assert!(matches!(error, AppError::NoStatCategories { .. }));
        assert_eq!(error.kind(), ErrorKind::Parse);
    }
}
