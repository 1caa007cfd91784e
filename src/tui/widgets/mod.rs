//! TUI Widgets
//!
//! Custom widgets for the OpenWords TUI.

mod results;

pub use results::{panel_text, render_results, wrapped_height};
