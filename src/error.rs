// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a whole traversal. Neighbor read failures never surface here.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Collection failed: {source}")]
    StartUnreadable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Rejected before collecting; the previous settings stay in effect.
    #[error(transparent)]
    Settings(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to save {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(#[source] io::Error),

    #[error(transparent)]
    Collection(#[from] CollectionError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Max depth must be between {min} and {max}, got {depth}")]
    DepthOutOfRange { depth: usize, min: usize, max: usize },
}
