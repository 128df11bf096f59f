use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::host::HttpFetcher;
use crate::logging::error_chain;
use crate::types::{RemoteCommand, DEEP_LINKED_TRANSCRIPT};

use super::super::command::ProtocolCommand;
use super::super::context::HandlerContext;
use super::super::error::TranscriptError;
use super::decoded_arg;

/// Downloads the transcript at the link's `url` argument (base64) and has
/// the client open it.
///
/// Failures end here and are only logged.
pub(super) fn open_transcript(command: &ProtocolCommand, context: &HandlerContext) -> JoinHandle<()> {
    let url = decoded_arg(command, "url");
    let context = context.clone();

    tokio::spawn(async move {
        let activities = match fetch_transcript(&url, context.http()).await {
            Ok(Some(activities)) => activities,
            Ok(None) => {
                debug!("Transcript at {} has an empty body, nothing to open", url);
                return;
            }
            Err(e) => {
                error!(
                    "Error downloading and parsing transcript file: {}",
                    error_chain(&e)
                );
                return;
            }
        };

        let count = activities.len();
        let command = RemoteCommand::OpenTranscript {
            filename: DEEP_LINKED_TRANSCRIPT.to_string(),
            activities,
            deep_link: true,
        };
        match context.remote().notify(command) {
            Ok(()) => info!("Opened transcript from {} ({} activities)", url, count),
            Err(e) => error!("Could not open transcript from {}: {}", url, error_chain(&e)),
        }
    })
}

/// Fetches a transcript and returns its activities.
///
/// Returns `Ok(None)` for a successful response with an empty body.
///
/// # Errors
///
/// * `TranscriptError::Fetch` if the request itself fails.
/// * `TranscriptError::Authorization` on 401, `TranscriptError::NotFound`
///   on 404, `TranscriptError::UnexpectedStatus` on any other non-2xx.
/// * `TranscriptError::Parse` or `TranscriptError::InvalidFormat` if the
///   body is not a JSON array.
pub(super) async fn fetch_transcript(
    url: &str,
    http: &dyn HttpFetcher,
) -> Result<Option<Vec<Value>>, TranscriptError> {
    let response = http
        .get(url)
        .await
        .map_err(|source| TranscriptError::Fetch {
            url: url.to_string(),
            source,
        })?;

    if response.is_success() {
        if response.body.is_empty() {
            return Ok(None);
        }
        let parsed: Value = serde_json::from_str(&response.body)?;
        return match parsed {
            Value::Array(activities) => Ok(Some(activities)),
            _ => Err(TranscriptError::InvalidFormat),
        };
    }

    match response.status {
        401 => {
            let detail = if response.body.is_empty() {
                response.status_text
            } else {
                response.body
            };
            Err(TranscriptError::Authorization { detail })
        }
        404 => Err(TranscriptError::NotFound {
            url: url.to_string(),
        }),
        status => Err(TranscriptError::UnexpectedStatus {
            status,
            url: url.to_string(),
        }),
    }
}
