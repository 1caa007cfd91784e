// OpenWords - terminal front-end for transcript search

pub mod config;
pub mod page;      // Query page state and the request/response cycle
pub mod search;    // HTTP client for the OpenWords search API
pub mod tui;       // Terminal User Interface
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use page::QueryPage;
pub use search::{SearchClient, SearchService};
pub use types::{AppError, AppResult, SearchReply, SearchResponse, SearchResult};
