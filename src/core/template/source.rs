use crate::core::error::PipelineError;
use crate::utils::FileUtils;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// What the caller hands to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTemplateInput {
    /// Already-parsed data; skips both the read and the JSON parse.
    Inline(Value),
    /// Raw text the caller already holds (pasted JSON, stdin); skips the read.
    Text(String),
    /// A URL or filesystem path read exactly once.
    Location(String),
}

/// Single-shot read of template text from a named location.
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn fetch_text(&self, location: &str) -> Result<String, PipelineError>;
}

/// Where a location string points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Http(Url),
    File(PathBuf),
}

impl SourceLocation {
    /// `http(s)://` URLs go over the network, `file://` URLs and anything else
    /// that is not a URL are treated as local paths.
    pub fn classify(location: &str) -> Result<Self, PipelineError> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::FetchFailed(
                "template location is empty".to_string(),
            ));
        }

        match Url::parse(trimmed) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(SourceLocation::Http(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(SourceLocation::File)
                .map_err(|_| PipelineError::FetchFailed(format!("invalid file URL: {}", trimmed))),
            _ => Ok(SourceLocation::File(PathBuf::from(trimmed))),
        }
    }
}

/// Reads over HTTP with `reqwest` and from the local filesystem otherwise.
#[derive(Debug, Clone)]
pub struct DefaultSourceReader {
    client: reqwest::Client,
}

impl DefaultSourceReader {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|err| {
                PipelineError::FetchFailed(format!("failed to build HTTP client: {}", err))
            })?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_http(&self, url: Url) -> Result<String, PipelineError> {
        tracing::debug!(url = %url, "fetching template over HTTP");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| PipelineError::FetchFailed(format!("{}: {}", url, err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::FetchFailed(format!(
                "{} responded with {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|err| PipelineError::FetchFailed(format!("{}: {}", url, err)))
    }
}

#[async_trait]
impl SourceReader for DefaultSourceReader {
    async fn fetch_text(&self, location: &str) -> Result<String, PipelineError> {
        match SourceLocation::classify(location)? {
            SourceLocation::Http(url) => self.fetch_http(url).await,
            SourceLocation::File(path) => {
                tracing::debug!(path = %path.display(), "reading template from disk");
                FileUtils::read_text(&path)
                    .map_err(|err| PipelineError::FetchFailed(format!("{:#}", err)))
            }
        }
    }
}
