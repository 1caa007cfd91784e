// Wire types and the crate-wide error enum

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One matched transcript span.
///
/// `t0` and `t1` are offsets in seconds into the media; the server is
/// expected to send `t0 <= t1` but nothing here checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub media_id: String,
    pub t0: f64,
    pub t1: f64,
    pub text: String,
}

/// Full reply to one search request. Result order is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

/// A search reply as received: the body exactly as the service sent it,
/// plus the typed view it was checked against.
///
/// Fields outside the typed shape and the original number formatting
/// survive in `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReply {
    pub response: SearchResponse,
    pub body: Value,
}

impl SearchReply {
    /// Check `body` against the [`SearchResponse`] shape and keep both.
    pub fn from_value(body: Value) -> AppResult<Self> {
        let response = SearchResponse::deserialize(&body)?;
        Ok(Self { response, body })
    }

    pub fn from_response(response: SearchResponse) -> AppResult<Self> {
        let body = serde_json::to_value(&response)?;
        Ok(Self { response, body })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
}

/// Handle returned when a media URL is queued for ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestJob {
    pub job_id: String,
}

/// Structured error body the search service sends with 4xx/5xx replies,
/// e.g. `{"error": "invalid_top_k", "message": "top_k must be between 1 and 50"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The service answered with a non-success status.
    #[error("Request failed with status {status}{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    /// No response was received at all.
    #[error("{}", non_empty_or_unknown(.0))]
    Network(String),

    /// A response arrived but its body did not match the expected shape.
    #[error("Invalid response: {}", non_empty_or_unknown(.0))]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status carried by the error, if the service replied at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            AppError::Status {
                status: status.as_u16(),
                detail: None,
            }
        } else if e.is_decode() {
            AppError::Parse(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

fn non_empty_or_unknown(message: &str) -> &str {
    if message.trim().is_empty() {
        "Unknown error"
    } else {
        message
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_code() {
        let err = AppError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "Request failed with status 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_status_error_with_detail() {
        let err = AppError::Status {
            status: 400,
            detail: Some("top_k must be between 1 and 50".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 400: top_k must be between 1 and 50"
        );
    }

    #[test]
    fn test_empty_messages_fall_back_to_unknown() {
        assert_eq!(AppError::Network(String::new()).to_string(), "Unknown error");
        assert_eq!(AppError::Network("  ".to_string()).to_string(), "Unknown error");
        assert_eq!(
            AppError::Parse(String::new()).to_string(),
            "Invalid response: Unknown error"
        );
        assert_eq!(
            AppError::Network("connection refused".to_string()).to_string(),
            "connection refused"
        );
    }

    #[test]
    fn test_search_response_keeps_result_order() {
        let body = r#"{"query":"q","results":[
            {"media_id":"b","t0":5.0,"t1":6.5,"text":"second"},
            {"media_id":"a","t0":1.0,"t1":2.0,"text":"first"}
        ]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let ids: Vec<&str> = parsed.results.iter().map(|r| r.media_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_reply_keeps_body_as_sent() {
        let body: Value = serde_json::from_str(
            r#"{"query":"q","results":[{"media_id":"a","t0":12,"t1":18,"text":"x","score":0.9}],"took_ms":3}"#,
        )
        .unwrap();
        let reply = SearchReply::from_value(body.clone()).unwrap();

        assert_eq!(reply.body, body);
        assert_eq!(reply.response.results[0].t0, 12.0);
        assert_eq!(reply.body["took_ms"], 3);
    }

    #[test]
    fn test_reply_rejects_wrong_shape() {
        let err = SearchReply::from_value(serde_json::json!({"query": "q", "results": "none"}))
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let err: AppError = serde_json::from_str::<SearchResponse>(r#"{"query":"q"}"#)
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Parse(_)));
        assert!(err.to_string().contains("results"));
    }
}
