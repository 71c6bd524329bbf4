use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// mapping of OSM key -> set of values that indicate area geometry, with an
/// exclusion set of keys that are linear even when closed (`highway`,
/// `barrier`, …). mirrors the iD editor's `ignoredKeys`-style defaults table
/// but scoped to area detection, following `OsmImportConfiguration`'s
/// pattern of a hand-written `Default` plus TOML override.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaKeyConfig {
    /// key -> values which do NOT make the way an area, i.e. an "allowlist of
    /// exceptions"; an empty set means any value of that key qualifies.
    keys: HashMap<String, HashSet<String>>,
    /// keys that are never area keys regardless of value (linear features
    /// that can still be closed, e.g. a roundabout `highway`).
    excluded: HashSet<String>,
}

impl Default for AreaKeyConfig {
    fn default() -> Self {
        let mut keys: HashMap<String, HashSet<String>> = HashMap::new();
        keys.insert("building".to_string(), HashSet::new());
        keys.insert("landuse".to_string(), HashSet::new());
        keys.insert("leisure".to_string(), HashSet::new());
        keys.insert("natural".to_string(), {
            let mut excl = HashSet::new();
            excl.insert("coastline".to_string());
            excl.insert("tree_row".to_string());
            excl
        });
        keys.insert("amenity".to_string(), HashSet::new());
        keys.insert("area".to_string(), {
            let mut excl = HashSet::new();
            excl.insert("no".to_string());
            excl
        });

        let mut excluded = HashSet::new();
        excluded.insert("highway".to_string());
        excluded.insert("barrier".to_string());
        excluded.insert("railway".to_string());

        AreaKeyConfig { keys, excluded }
    }
}

impl AreaKeyConfig {
    /// `isArea(way)`: the way is closed AND carries a tag recognized here,
    /// modulo the excluded (always-linear) keys.
    pub fn matches(&self, tags_iter: impl Iterator<Item = (String, String)>) -> bool {
        let mut found = false;
        for (k, v) in tags_iter {
            if self.excluded.contains(&k) {
                continue;
            }
            if let Some(excluded_values) = self.keys.get(&k) {
                if !excluded_values.contains(&v) {
                    found = true;
                    break;
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn building_is_area_highway_is_not() {
        let cfg = AreaKeyConfig::default();
        let building = vec![("building".to_string(), "yes".to_string())];
        assert!(cfg.matches(building.into_iter()));

        let highway = vec![("highway".to_string(), "residential".to_string())];
        assert!(!cfg.matches(highway.into_iter()));
    }

    #[test]
    fn area_no_is_excluded_value() {
        let cfg = AreaKeyConfig::default();
        let tags = vec![("area".to_string(), "no".to_string())];
        assert!(!cfg.matches(tags.into_iter()));
    }
}
