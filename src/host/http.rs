//! This module defines the outbound HTTP client used to download
//! transcripts.
use async_trait::async_trait;
use thiserror::Error;

const USER_AGENT: &str = concat!("deeplink-handler/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request failed")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

/// The parts of an HTTP response the handler looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Issues a single GET request. No retries.
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;
}

/// An `HttpFetcher` backed by `reqwest`.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Builds the fetcher with the client's default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HttpError::Other(format!(
                "url must start with http:// or https://, got '{}'",
                url
            )));
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
