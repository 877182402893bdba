//! HTTP client for the movie API, used by chat front ends and the CLI.

use std::time::Duration;

use tracing::{debug, warn};

use crate::types::{MovieRequest, MovieResponse};
use crate::ClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Searches shorter than this (after trimming) are not sent.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Clone, Debug)]
pub struct MovieApiClient {
    http: reqwest::Client,
    url: String,
}

impl MovieApiClient {
    pub fn new(url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str { &self.url }

    async fn call(&self, body: &MovieRequest) -> Result<MovieResponse, ClientError> {
        let resp = self
            .http
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url = %self.url, status = status.as_u16(), "movie api returned non-success status");
            return Err(ClientError::Status(status.as_u16()));
        }
        resp.json::<MovieResponse>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Look up a title. Returns `Ok(None)` when not found or when the text is too short to search.
    pub async fn search(&self, title: &str) -> Result<Option<String>, ClientError> {
        let title = title.trim();
        if title.chars().count() < MIN_SEARCH_LEN {
            debug!(title, "search text too short; skipped");
            return Ok(None);
        }
        match self.call(&MovieRequest::search(title)).await? {
            MovieResponse::Found { link } => Ok(Some(link)),
            MovieResponse::NotFound => Ok(None),
            MovieResponse::Error { message } => Err(ClientError::Rejected(message)),
            other => Err(ClientError::Parse(format!("unexpected search response: {other:?}"))),
        }
    }

    /// Add or update a title's link.
    pub async fn add(&self, title: &str, link: &str) -> Result<(), ClientError> {
        match self.call(&MovieRequest::add(title, link)).await? {
            MovieResponse::Success { .. } => Ok(()),
            MovieResponse::Error { message } => Err(ClientError::Rejected(message)),
            other => Err(ClientError::Parse(format!("unexpected add response: {other:?}"))),
        }
    }
}

/// Parse `"Movie Name | https://link"` into a lower-cased name and a trimmed link.
pub fn parse_add_command(input: &str) -> Result<(String, String), ClientError> {
    const USAGE: &str = "expected `<movie name> | <link>`";
    let (name, link) = input
        .split_once('|')
        .ok_or_else(|| ClientError::Format(USAGE.into()))?;
    let name = name.trim().to_lowercase();
    let link = link.trim();
    if name.is_empty() || link.is_empty() {
        return Err(ClientError::Format(USAGE.into()));
    }
    Ok((name, link.to_string()))
}
