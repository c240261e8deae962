//! HTTP client for the list/file/thumbnail endpoints, used by the viewer side.

mod fetcher;

pub use fetcher::{HttpImageFetcher, WarmCache};

use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::file_system::DirectoryListing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered with an error status.
    Http {
        status: u16,
        kind: String,
        message: String,
    },
    /// The request never got a response.
    Transport(String),
    /// The response body wasn't what we expected.
    Decode(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { status, message, .. } => write!(f, "{} ({})", message, status),
            Self::Transport(msg) => write!(f, "Request failed: {}", msg),
            Self::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// HTTP status if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

/// Bytes and content type of a fetched file or thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` is the server origin, like `http://127.0.0.1:9230`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Transport(format!("bad base URL: {}", e)))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }

    pub fn file_url(&self, path: &str) -> Result<Url, ClientError> {
        self.endpoint("/api/file", &[("path", path.to_string())])
    }

    pub fn thumbnail_url(&self, path: &str, size: u32) -> Result<Url, ClientError> {
        self.endpoint("/api/thumbnail", &[("path", path.to_string()), ("size", size.to_string())])
    }

    pub async fn list(&self, path: &str) -> Result<DirectoryListing, ClientError> {
        let url = self.endpoint("/api/list", &[("path", path.to_string())])?;
        let response = self.send(url).await?;
        response
            .json::<DirectoryListing>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn file(&self, path: &str) -> Result<Fetched, ClientError> {
        let url = self.file_url(path)?;
        self.fetch_bytes(url).await
    }

    pub async fn thumbnail(&self, path: &str, size: u32) -> Result<Fetched, ClientError> {
        let url = self.thumbnail_url(path, size)?;
        self.fetch_bytes(url).await
    }

    async fn fetch_bytes(&self, url: Url) -> Result<Fetched, ClientError> {
        let response = self.send(url).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Fetched {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    /// Sends a GET and turns error statuses into `ClientError::Http`.
    async fn send(&self, url: Url) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(error_from_response(status, response).await)
    }
}

async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ClientError {
    match response.json::<ErrorBody>().await {
        Ok(body) => ClientError::Http {
            status: status.as_u16(),
            kind: body.error,
            message: body.message,
        },
        Err(_) => ClientError::Http {
            status: status.as_u16(),
            kind: "unknown".to_string(),
            message: status.canonical_reason().unwrap_or("Request failed").to_string(),
        },
    }
}
