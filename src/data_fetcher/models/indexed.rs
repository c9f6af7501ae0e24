//! Positionally-indexed JSON collections.
//!
//! The Fantasy Sports API encodes lists as objects keyed by stringified
//! integers, usually with an extra `count` key:
//!
//! ```json
//! { "0": { "player": [...] }, "1": { "player": [...] }, "count": 2 }
//! ```
//!
//! An empty collection is sent as `[]` instead. [`Indexed`] accepts both
//! shapes and yields the entries in numeric index order. Each entry is
//! validated on its own: an entry that does not match `T` is recorded as
//! rejected rather than failing the whole document.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

/// An entry that was present in the collection but did not match the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, PartialEq)]
pub struct Indexed<T> {
    entries: Vec<T>,
    rejected: Vec<RejectedEntry>,
}

impl<T> Indexed<T> {
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    /// Number of entries the server sent, valid or not.
    pub fn raw_len(&self) -> usize {
        self.entries.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_len() == 0
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<RejectedEntry>) {
        (self.entries, self.rejected)
    }
}

impl<T> Default for Indexed<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Indexed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexed")
            .field("entries", &self.entries)
            .field("rejected", &self.rejected)
            .finish()
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Repr {
    Object(Map<String, Value>),
    List(Vec<Value>),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Indexed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut positioned: Vec<(usize, Value)> = match Repr::deserialize(deserializer)? {
            // Non-numeric keys such as "count" carry no entries.
            Repr::Object(map) => map
                .into_iter()
                .filter_map(|(key, value)| key.parse::<usize>().ok().map(|i| (i, value)))
                .collect(),
            Repr::List(items) => items.into_iter().enumerate().collect(),
        };
        // Object keys arrive in string order ("10" < "2"); restore numeric order.
        positioned.sort_by_key(|(index, _)| *index);

        let mut indexed = Indexed::default();
        for (index, value) in positioned {
            match serde_json::from_value::<T>(value) {
                Ok(entry) => indexed.entries.push(entry),
                Err(e) => indexed.rejected.push(RejectedEntry {
                    index,
                    reason: e.to_string(),
                }),
            }
        }
        Ok(indexed)
    }
}
