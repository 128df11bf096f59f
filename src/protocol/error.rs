use thiserror::Error;

use crate::host::{HttpError, RemoteError};

use super::parser::PROTOCOL;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid protocol url '{url}'. Must start with '{}'", PROTOCOL)]
    InvalidProtocol { url: String },
}

/// Failures while downloading and reading a deep-linked transcript.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Invalid transcript file contents; should be an array of conversation activities.")]
    InvalidFormat,
    #[error("Authorization error while trying to download transcript: {detail}")]
    Authorization { detail: String },
    #[error("Transcript file not found at: {url}")]
    NotFound { url: String },
    #[error("Unexpected status {status} while downloading transcript from: {url}")]
    UnexpectedStatus { status: u16, url: String },
    #[error("Error occurred while reading downloaded transcript")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to download transcript from: {url}")]
    Fetch {
        url: String,
        #[source]
        source: HttpError,
    },
}

#[derive(Debug, Error)]
#[error("Error occurred while trying to deep link to bot project at: {path}")]
pub struct BotLoadError {
    pub path: String,
    #[source]
    pub source: RemoteError,
}
