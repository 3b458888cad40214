// Centralized error handling for the keeper

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a download manager client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Login rejected by download manager")]
    AuthFailed,

    #[error("Invalid download manager host: {0}")]
    InvalidHost(String),

    #[error("Request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned error status: {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Download manager error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
#[error("Failed to read free space of {}: {source}", .path.display())]
pub struct ProbeError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Failures that abort a whole run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Login failed: {0}")]
    Login(#[source] ClientError),

    #[error("Failed to list torrents: {0}")]
    Snapshot(#[source] ClientError),

    #[error(transparent)]
    FreeSpace(#[from] ProbeError),
}
