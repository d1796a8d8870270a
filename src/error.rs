use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading graphs or configuration.
///
/// The traversal engine itself never fails; missing ids, dangling edges and
/// cycles all map to well-defined degenerate output instead.
#[derive(Error, Debug)]
pub enum LineageError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognized graph layout: {0}")]
    UnrecognizedLayout(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LineageError>;
