use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the Overpass client, normalizer and writer.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// An HTTP exchange could not be completed (DNS, connect, timeout, body read)
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// Interpreter returned 200 but the body is not the expected JSON
    #[error("malformed Overpass response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid mirror URL '{url}': {source}")]
    InvalidMirror {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no Overpass mirrors configured")]
    NoMirrors,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("element {id} has neither lat/lon nor a center")]
    MissingCoordinates { id: i64 },

    #[error("state relation {id} has no ISO3166-2 tag")]
    MissingStateCode { id: i64 },

    #[error("failed to encode GeoJSON: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
