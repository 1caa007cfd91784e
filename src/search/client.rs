//! HTTP client for the OpenWords search API.

use crate::config::{Config, TOP_K_RANGE};
use crate::search::SearchService;
use crate::types::{ApiErrorBody, AppError, AppResult, HealthStatus, IngestJob, SearchReply};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct SearchClient {
    client: Client,
    base_url: String,
    top_k: Option<u32>,
}

impl SearchClient {
    /// Create a client for the given API base with no result limit
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            top_k: None,
        }
    }

    /// Build a client from loaded configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = Self::with_timeout(config.api.base_url.clone(), config.timeout())?;
        match config.api.top_k {
            Some(k) => client.with_top_k(k),
            None => Ok(client),
        }
    }

    /// Create a client whose requests fail once `timeout` elapses
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            top_k: None,
        })
    }

    /// Limit the number of results the service returns
    pub fn with_top_k(mut self, top_k: u32) -> AppResult<Self> {
        if !TOP_K_RANGE.contains(&top_k) {
            return Err(AppError::InvalidRequest(format!(
                "top_k must be between {} and {}",
                TOP_K_RANGE.start(),
                TOP_K_RANGE.end()
            )));
        }
        self.top_k = Some(top_k);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a transcript search.
    ///
    /// The body is kept as received; it only has to match the
    /// `SearchResponse` shape.
    pub async fn search(&self, query: &str) -> AppResult<SearchReply> {
        let url = search_url(&self.base_url, query, self.top_k);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let body: Value = decode(response).await?;
        let reply = SearchReply::from_value(body)?;

        info!(
            "Search for {:?} returned {} result(s)",
            reply.response.query,
            reply.response.results.len()
        );
        Ok(reply)
    }

    /// Probe the service's health endpoint
    pub async fn health(&self) -> AppResult<HealthStatus> {
        let url = format!("{}/health", trim_base(&self.base_url));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// Queue a media URL for download, transcription and indexing
    pub async fn ingest_url(&self, media_url: &str) -> AppResult<IngestJob> {
        if media_url.trim().is_empty() {
            return Err(AppError::InvalidRequest("media URL must not be empty".to_string()));
        }

        let url = format!(
            "{}/ingest/url?url={}",
            trim_base(&self.base_url),
            urlencoding::encode(media_url)
        );
        debug!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        let job: IngestJob = decode(response).await?;
        info!("Queued ingest job {} for {}", job.job_id, media_url);
        Ok(job)
    }
}

#[async_trait]
impl SearchService for SearchClient {
    async fn search(&self, query: &str) -> AppResult<SearchReply> {
        SearchClient::search(self, query).await
    }
}

/// Build `{base}/search?q=...` with the query percent-encoded.
///
/// Only RFC 3986 unreserved characters survive unescaped; a space becomes
/// `%20`, never `+`.
pub fn search_url(base_url: &str, query: &str, top_k: Option<u32>) -> String {
    let mut url = format!(
        "{}/search?q={}",
        trim_base(base_url),
        urlencoding::encode(query)
    );
    if let Some(k) = top_k {
        url.push_str(&format!("&top_k={}", k));
    }
    url
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}

/// Check the status, then parse the body as `T`.
async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .map(|e| e.message);
        warn!("Search service replied {} ({:?})", status, detail);
        return Err(AppError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
