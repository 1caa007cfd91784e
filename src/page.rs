//! Query Page
//!
//! State behind the search screen: the query being typed, the last
//! response, a loading flag and an error message. Each submit hands out a
//! [`SearchTicket`]; the completion for that ticket is applied only if no
//! newer submit happened in the meantime.

use crate::search::SearchService;
use crate::types::{AppResult, SearchReply, SearchResponse};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No results yet.";

/// Identifies one submitted search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// What the results panel shows. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView<'a> {
    Loading,
    Error(&'a str),
    Results(&'a SearchReply),
    Empty,
}

#[derive(Debug, Default)]
pub struct QueryPage {
    query: String,
    reply: Option<SearchReply>,
    loading: bool,
    error: Option<String>,
    latest_seq: u64,
    completed_at: Option<DateTime<Utc>>,
}

impl QueryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn response(&self) -> Option<&SearchResponse> {
        self.reply.as_ref().map(|r| &r.response)
    }

    /// Last response body exactly as the service sent it
    pub fn body(&self) -> Option<&Value> {
        self.reply.as_ref().map(|r| &r.body)
    }

    /// When the most recent applied completion landed
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Start a search for the current query.
    ///
    /// The query is sent as typed, empty included. Submitting while a
    /// previous search is still running supersedes it.
    pub fn submit(&mut self) -> SearchTicket {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;

        debug!("Submitting search #{} for {:?}", self.latest_seq, self.query);
        SearchTicket {
            seq: self.latest_seq,
            query: self.query.clone(),
        }
    }

    /// Apply the outcome of the search identified by `seq`.
    ///
    /// Returns `false` when the outcome is stale and was dropped.
    pub fn complete(&mut self, seq: u64, outcome: AppResult<SearchReply>) -> bool {
        if seq != self.latest_seq {
            debug!(
                "Dropping stale search #{} (latest is #{})",
                seq, self.latest_seq
            );
            return false;
        }

        match outcome {
            Ok(reply) => {
                info!(
                    "Search #{} completed with {} result(s)",
                    seq,
                    reply.response.results.len()
                );
                self.reply = Some(reply);
                self.error = None;
            }
            Err(e) => {
                warn!("Search #{} failed: {}", seq, e);
                self.error = Some(e.to_string());
                self.reply = None;
            }
        }
        self.loading = false;
        self.completed_at = Some(Utc::now());
        true
    }

    /// Submit, wait for `service`, then apply the outcome.
    pub async fn run_cycle(&mut self, service: &dyn SearchService) -> PageView<'_> {
        let ticket = self.submit();
        let outcome = service.search(&ticket.query).await;
        self.complete(ticket.seq, outcome);
        self.view()
    }

    pub fn view(&self) -> PageView<'_> {
        if self.loading {
            PageView::Loading
        } else if let Some(e) = &self.error {
            PageView::Error(e)
        } else if let Some(r) = &self.reply {
            PageView::Results(r)
        } else {
            PageView::Empty
        }
    }

    /// Text for the results panel
    pub fn display_text(&self) -> String {
        match self.view() {
            PageView::Loading => LOADING_TEXT.to_string(),
            PageView::Error(e) => e.to_string(),
            PageView::Results(r) => render_json(&r.body),
            PageView::Empty => EMPTY_TEXT.to_string(),
        }
    }
}

/// Pretty-print a body with two-space indentation, keys in received order.
pub fn render_json(body: &Value) -> String {
    serde_json::to_string_pretty(body)
        .unwrap_or_else(|e| format!("Failed to format response: {}", e))
}
