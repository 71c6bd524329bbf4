use crate::error::{ActionError, GraphError};
use thiserror::Error;

/// errors at the CLI/file boundary. wraps the core's `GraphError`/`ActionError`
/// plus I/O and (de)serialization failures, mirroring how `bambam-osm`'s
/// `OsmCliError` wraps `OsmError`.
#[derive(Error, Debug)]
pub enum EditorCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error("failure reading file: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("failure decoding TOML: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },
    #[error("unknown entity id: {0}")]
    UnknownEntityId(String),
}
