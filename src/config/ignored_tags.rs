use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// set of keys considered uninteresting for `hasInterestingTags` (names,
/// notes, sources, metadata…), mirroring the iD editor's `discardTags`-like
/// table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IgnoredTagConfig {
    keys: HashSet<String>,
}

impl Default for IgnoredTagConfig {
    fn default() -> Self {
        let keys = [
            "name",
            "name:en",
            "note",
            "source",
            "source:date",
            "attribution",
            "created_by",
            "tiger:county",
            "tiger:cfcc",
            "tiger:reviewed",
            "import_uuid",
            "check_date",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        IgnoredTagConfig { keys }
    }
}

impl IgnoredTagConfig {
    pub fn is_ignored(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn has_interesting_tag(&self, tags: impl Iterator<Item = (String, String)>) -> bool {
        tags.filter(|(_, v)| !v.is_empty())
            .any(|(k, _)| !self.is_ignored(&k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_alone_is_not_interesting() {
        let cfg = IgnoredTagConfig::default();
        let tags = vec![("name".to_string(), "Elm St".to_string())];
        assert!(!cfg.has_interesting_tag(tags.into_iter()));
    }

    #[test]
    fn highway_is_interesting() {
        let cfg = IgnoredTagConfig::default();
        let tags = vec![
            ("name".to_string(), "Elm St".to_string()),
            ("highway".to_string(), "residential".to_string()),
        ];
        assert!(cfg.has_interesting_tag(tags.into_iter()));
    }
}
