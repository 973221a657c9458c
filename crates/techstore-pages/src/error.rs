use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode page data for {route}: {source}")]
    Encode {
        route: String,
        #[source]
        source: serde_json::Error,
    },
}
