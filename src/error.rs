use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response is neither JSON nor JSONP: {message}")]
    Parse { message: String },

    #[error("Missing {path} in response: {message}")]
    MissingField { path: &'static str, message: String },

    #[error("Marker block {start} ... {end} not found")]
    MarkersNotFound { start: String, end: String },

    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid format template: {message}")]
    Template { message: String },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, UpdateError>;
