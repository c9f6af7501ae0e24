use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Raw stat value as the API sends it. Counts and percentages usually arrive
/// as strings (`"1654"`, `".516"`), composite fields as `"475/920"`, and
/// "no value" as `"-"` or `null`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl StatValue {
    /// Numeric reading of the value, accepting numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) if n.is_finite() => Some(*n),
            StatValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) => write!(f, "{n}"),
            StatValue::Text(s) => f.write_str(s),
            StatValue::Missing => Ok(()),
        }
    }
}

/// One player flattened out of a players page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_key: String,
    pub player_id: Option<String>,
    pub full_name: String,
    pub editorial_team_abbr: String,
    pub primary_position: String,
    pub display_position: Option<String>,
    /// Stat display name (or `stat_<id>` fallback) to raw value.
    pub stats: BTreeMap<String, StatValue>,
}

impl PlayerRecord {
    pub fn stat(&self, name: &str) -> Option<&StatValue> {
        self.stats.get(name)
    }
}
