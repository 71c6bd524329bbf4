use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::{area_keys::AreaKeyConfig, deprecated_tags::DeprecatedTagTable, ignored_tags::IgnoredTagConfig};
use crate::cli_error::EditorCliError;

/// the top-level configuration surface loaded at startup: area keys,
/// deprecated tags, ignored tags, plus small validator knobs. mirrors
/// `bambam-osm`'s `OsmImportConfiguration`: a hand-written `Default`, layered
/// with a file source (TOML, JSON, or YAML, by extension) via the `config`
/// crate in `TryFrom<&str>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfiguration {
    pub area_keys: AreaKeyConfig,
    pub deprecated_tags: DeprecatedTagTable,
    pub ignored_tags: IgnoredTagConfig,
    /// denylist of `source` tag values treated as incompatible, e.g. traced
    /// imagery whose terms of use forbid OSM import.
    pub incompatible_sources: Vec<String>,
    /// allowlist of `source` values that look like they match
    /// `incompatible_sources` but are in fact fine.
    pub incompatible_source_exceptions: Vec<String>,
}

impl Default for EditorConfiguration {
    fn default() -> Self {
        EditorConfiguration {
            area_keys: AreaKeyConfig::default(),
            deprecated_tags: DeprecatedTagTable::with_defaults(),
            ignored_tags: IgnoredTagConfig::default(),
            incompatible_sources: vec![
                "esri".to_string(),
                "Google".to_string(),
                "google".to_string(),
            ],
            incompatible_source_exceptions: vec!["esri/Google_*_Buildings".to_string()],
        }
    }
}

impl TryFrom<&str> for EditorConfiguration {
    type Error = EditorCliError;

    /// layers `f` (TOML, JSON, or YAML, inferred from its extension by the
    /// `config` crate) over the hand-written defaults, so a partial file only
    /// needs to override the keys it cares about.
    fn try_from(f: &str) -> Result<Self, Self::Error> {
        let defaults = Config::try_from(&EditorConfiguration::default())
            .map_err(|e| EditorCliError::ConfigurationError(format!("failure building defaults: {e}")))?;
        let config = Config::builder()
            .add_source(defaults)
            .add_source(File::from(Path::new(f)))
            .build()
            .map_err(|e| EditorCliError::ConfigurationError(format!("failure decoding {f}: {e}")))?;
        config
            .try_deserialize()
            .map_err(|e| EditorCliError::ConfigurationError(format!("failure decoding {f}: {e}")))
    }
}
