use serde::{Deserialize, Deserializer};
use std::fmt;

/// Identifier the API sends either as a JSON string or as a number
/// (`"stat_id": 5` in settings, `"stat_id": "5"` in player stats).
/// Always stored in its string form so both spellings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlexString(pub String);

impl FlexString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FlexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FlexString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(FlexString(match Repr::deserialize(deserializer)? {
            Repr::Unsigned(n) => n.to_string(),
            Repr::Signed(n) => n.to_string(),
            Repr::Text(s) => s.trim().to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_string_forms_are_equal() {
        let from_number: FlexString = serde_json::from_str("9004003").unwrap();
        let from_string: FlexString = serde_json::from_str("\"9004003\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "9004003");
    }

    #[test]
    fn test_float_is_rejected() {
        assert!(serde_json::from_str::<FlexString>("1.5").is_err());
    }
}
