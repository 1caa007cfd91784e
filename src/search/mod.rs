//! Search Module
//!
//! Client side of the OpenWords search API:
//! - `GET /search` - transcript search (the only call the query page needs)
//! - `GET /health` - liveness probe shown in the TUI header
//! - `POST /ingest/url` - queue a media URL for transcription
//!
//! The page talks to the service through the [`SearchService`] trait so it
//! can be driven by the HTTP client or by an in-process double.

pub mod client;

pub use client::{search_url, SearchClient};

use crate::types::{AppResult, SearchReply};
use async_trait::async_trait;

/// Anything that can answer a transcript search.
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str) -> AppResult<SearchReply>;
}
