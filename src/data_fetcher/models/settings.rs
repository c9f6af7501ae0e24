//! Schema of the league settings resource (`/league/{key}/settings`).
//!
//! Only the stat category list is consumed:
//! `fantasy_content.league[1].settings[0].stat_categories.stats[*].stat`.

use serde::Deserialize;

use super::common::FlexString;

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsBlock {
    #[serde(default)]
    pub stat_categories: Option<StatCategories>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatCategories {
    pub stats: Vec<StatCategoryEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatCategoryEntry {
    pub stat: StatCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatCategory {
    pub stat_id: FlexString,
    pub display_name: String,
    #[serde(default)]
    pub name: Option<String>,
}
