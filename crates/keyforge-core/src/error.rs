//! Error types for the KeyForge snapshot fetcher
//!
//! This module defines all error types used throughout the library.
//! Only [`KeyforgeError::HttpStatus`] is retried by the fetcher; every other
//! variant aborts the run on first occurrence.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for KeyForge snapshot operations
#[derive(Error, Debug)]
pub enum KeyforgeError {
    /// Transport-level failure (connection, DNS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP Error {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Response body or snapshot could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record is missing a field the collector relies on
    #[error("Unexpected payload: {0}")]
    Payload(String),

    /// The deck listing ran out of cards before the target count was reached
    #[error("No more cards for expansion {expansion} at page {page}, {missing} still missing")]
    PagesExhausted {
        expansion: String,
        page: u32,
        missing: usize,
    },

    /// Writing an output file failed
    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KeyforgeError {
    /// Whether the fetcher should back off and try the request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, KeyforgeError::HttpStatus { .. })
    }
}

/// Result type alias for KeyForge snapshot operations
pub type Result<T> = std::result::Result<T, KeyforgeError>;
