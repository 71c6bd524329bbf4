pub mod area_keys;
pub mod deprecated_tags;
pub mod editor_config;
pub mod ignored_tags;

pub use area_keys::AreaKeyConfig;
pub use deprecated_tags::{DeprecatedTagFix, DeprecatedTagRule, DeprecatedTagTable};
pub use editor_config::EditorConfiguration;
pub use ignored_tags::IgnoredTagConfig;
