use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// an OSM tag map. `BTreeMap` gives deterministic iteration order, which
/// matters for the validator `hash` and for tag-rewrite tests that
/// compare a whole map at once.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Tags(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_value(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// renames `old` to `new`, preserving its value, if present.
    pub fn rename_key(&mut self, old: &str, new: &str) {
        if let Some(v) = self.0.remove(old) {
            self.0.insert(new.to_string(), v);
        }
    }

    /// returns a copy with the merge of `self` and `other`; keys in `other`
    /// win on conflict.
    pub fn merged_with(&self, other: &Tags) -> Tags {
        let mut out = self.clone();
        for (k, v) in other.iter() {
            out.set(k, v);
        }
        out
    }
}

impl From<BTreeMap<String, String>> for Tags {
    fn from(value: BTreeMap<String, String>) -> Self {
        Tags(value)
    }
}

impl FromIterator<(String, String)> for Tags {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Tags(iter.into_iter().collect())
    }
}
