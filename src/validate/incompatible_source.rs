//! `incompatibleSource`: flags a `source` tag matching a denylist,
//! unless it also matches a more specific allowlist exception.

use regex::{escape, Regex};

use crate::model::Entity;

use super::issue::{Issue, Severity};

pub struct IncompatibleSourceValidator<'c> {
    pub denylist: &'c [String],
    pub exceptions: &'c [String],
}

/// turns an exception pattern like `esri/Google_*_Buildings` into an anchored
/// regex, escaping everything but the `*` wildcard.
fn wildcard_regex(pattern: &str) -> Regex {
    let escaped = pattern.split('*').map(escape).collect::<Vec<_>>().join(".*");
    Regex::new(&format!("^{escaped}$")).expect("wildcard patterns always produce valid regexes")
}

fn wildcard_matches(pattern: &str, value: &str) -> bool {
    wildcard_regex(pattern).is_match(value)
}

impl IncompatibleSourceValidator<'_> {
    pub fn validate(&self, entity: &Entity) -> Vec<Issue> {
        let Some(source) = entity.tags().get("source") else {
            return vec![];
        };

        if self.exceptions.iter().any(|e| wildcard_matches(e, source)) {
            return vec![];
        }

        let flagged = self.denylist.iter().any(|d| source.to_lowercase().contains(&d.to_lowercase()));
        if flagged {
            vec![Issue::new(
                "incompatible_source",
                None,
                Severity::Error,
                vec![entity.id()],
                vec![("source".to_string(), source.to_string())],
            )]
        } else {
            vec![]
        }
    }
}
