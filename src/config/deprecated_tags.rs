use crate::model::tags::Tags;
use serde::{Deserialize, Serialize};

/// a single outdated-tagging rule. four forms: a 1:0 drop, a 1:1 rename, a
/// wildcard `*` capture that carries the old value into the new tag, and a
/// 2:1 combine of two old tags into one new tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum DeprecatedTagRule {
    /// `old=value` (or any value if `old_value` is `None`) should simply be removed.
    Drop { old_key: String, old_value: Option<String> },
    /// `old=old_value` -> `new=new_value`.
    Replace {
        old_key: String,
        old_value: Option<String>,
        new_key: String,
        new_value: String,
    },
    /// `old=*` -> `new=*`, carrying the captured value across verbatim.
    Wildcard { old_key: String, new_key: String },
    /// `old_a=value_a` AND `old_b=value_b` -> `new=new_value`.
    Combine {
        old_key_a: String,
        old_value_a: String,
        old_key_b: String,
        old_value_b: String,
        new_key: String,
        new_value: String,
    },
}

/// outcome of a single rule matching a tag set: which keys to remove, and
/// which `(key, value)` pairs to set in their place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedTagFix {
    pub remove: Vec<String>,
    pub set: Vec<(String, String)>,
}

impl DeprecatedTagRule {
    pub fn check(&self, tags: &Tags) -> Option<DeprecatedTagFix> {
        match self {
            DeprecatedTagRule::Drop { old_key, old_value } => {
                let actual = tags.get(old_key)?;
                if old_value.as_deref().map_or(true, |v| v == actual) {
                    Some(DeprecatedTagFix {
                        remove: vec![old_key.clone()],
                        set: vec![],
                    })
                } else {
                    None
                }
            }
            DeprecatedTagRule::Replace {
                old_key,
                old_value,
                new_key,
                new_value,
            } => {
                let actual = tags.get(old_key)?;
                if old_value.as_deref().map_or(true, |v| v == actual) {
                    Some(DeprecatedTagFix {
                        remove: vec![old_key.clone()],
                        set: vec![(new_key.clone(), new_value.clone())],
                    })
                } else {
                    None
                }
            }
            DeprecatedTagRule::Wildcard { old_key, new_key } => {
                let captured = tags.get(old_key)?;
                Some(DeprecatedTagFix {
                    remove: vec![old_key.clone()],
                    set: vec![(new_key.clone(), captured.to_string())],
                })
            }
            DeprecatedTagRule::Combine {
                old_key_a,
                old_value_a,
                old_key_b,
                old_value_b,
                new_key,
                new_value,
            } => {
                if tags.is_value(old_key_a, old_value_a) && tags.is_value(old_key_b, old_value_b) {
                    Some(DeprecatedTagFix {
                        remove: vec![old_key_a.clone(), old_key_b.clone()],
                        set: vec![(new_key.clone(), new_value.clone())],
                    })
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeprecatedTagTable {
    pub rules: Vec<DeprecatedTagRule>,
}

impl DeprecatedTagTable {
    /// a small representative table; a full install loads its real table
    /// from TOML via [`super::EditorConfiguration`].
    pub fn with_defaults() -> Self {
        DeprecatedTagTable {
            rules: vec![
                DeprecatedTagRule::Replace {
                    old_key: "highway".to_string(),
                    old_value: Some("no".to_string()),
                    new_key: "highway".to_string(),
                    new_value: "road".to_string(),
                },
                DeprecatedTagRule::Drop {
                    old_key: "created_by".to_string(),
                    old_value: None,
                },
                DeprecatedTagRule::Wildcard {
                    old_key: "amenity:bicycle_repair_station".to_string(),
                    new_key: "service:bicycle:repair".to_string(),
                },
                DeprecatedTagRule::Combine {
                    old_key_a: "barrier".to_string(),
                    old_value_a: "fence".to_string(),
                    old_key_b: "fence_type".to_string(),
                    old_value_b: "chain_link".to_string(),
                    new_key: "barrier".to_string(),
                    new_value: "chain_link_fence".to_string(),
                },
            ],
        }
    }

    /// returns the fixes suggested by every rule that matches `tags`.
    pub fn check_all(&self, tags: &Tags) -> Vec<DeprecatedTagFix> {
        self.rules.iter().filter_map(|r| r.check(tags)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_rule_removes_unconditionally() {
        let rule = DeprecatedTagRule::Drop {
            old_key: "created_by".to_string(),
            old_value: None,
        };
        let mut tags = Tags::new();
        tags.set("created_by", "JOSM");
        let fix = rule.check(&tags).unwrap();
        assert_eq!(fix.remove, vec!["created_by".to_string()]);
        assert!(fix.set.is_empty());
    }

    #[test]
    fn wildcard_rule_carries_value() {
        let rule = DeprecatedTagRule::Wildcard {
            old_key: "amenity:bicycle_repair_station".to_string(),
            new_key: "service:bicycle:repair".to_string(),
        };
        let mut tags = Tags::new();
        tags.set("amenity:bicycle_repair_station", "yes");
        let fix = rule.check(&tags).unwrap();
        assert_eq!(fix.set, vec![("service:bicycle:repair".to_string(), "yes".to_string())]);
    }

    #[test]
    fn combine_rule_requires_both_tags() {
        let rule = DeprecatedTagRule::Combine {
            old_key_a: "barrier".to_string(),
            old_value_a: "fence".to_string(),
            old_key_b: "fence_type".to_string(),
            old_value_b: "chain_link".to_string(),
            new_key: "barrier".to_string(),
            new_value: "chain_link_fence".to_string(),
        };
        let mut tags = Tags::new();
        tags.set("barrier", "fence");
        assert!(rule.check(&tags).is_none());
        tags.set("fence_type", "chain_link");
        assert!(rule.check(&tags).is_some());
    }
}
