//! Errors raised while loading level data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown image '{0}'")]
    UnknownImage(String),
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
    #[error("map {0} has no rows")]
    EmptyMap(u32),
    #[error("no map files found in {0:?}")]
    NoMaps(PathBuf),
}

impl LoadError {
    /// True when the underlying file does not exist.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
