use std::path::PathBuf;

use thiserror::Error;

/// Failure to retrieve one document from the review site.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    /// Rate limiting, server errors and timeouts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            FetchError::Transport { source, .. } => source.is_timeout() || source.is_connect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("could not fetch first listing page: {0}")]
    Fetch(#[from] FetchError),
    #[error("pagination control not found")]
    MissingControl,
    #[error("pagination control has no numeric page labels")]
    NoPageNumbers,
}

#[derive(Debug, Error)]
pub enum AttributeTableError {
    #[error("rating row {row} has {cells} cell(s), expected a label and a value")]
    MalformedRow { row: usize, cells: usize },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{path} has no {column} column")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
