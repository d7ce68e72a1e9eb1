//! # pagelens — browser-assistant page analysis
//!
//! This crate distills web pages into structured insights and lets the
//! interesting parts be promoted into a tracked task list. It pairs a pure
//! analysis core with the thin service layers a browser assistant needs.
//!
//! ## Features
//!
//! - Heuristic page analysis: readable-body extraction, summary, key
//!   points, action items, and document metadata
//! - Deterministic, I/O-free analyzer that never fails on malformed markup
//! - Page fetching with a browser-like user agent
//! - Task tracking and page-capture history backed by LibSQL
//! - JSON API and embedded UI served with axum
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust
//! use pagelens::analyzer::analyze_page;
//!
//! let markup = "<html><head><title>Weekly Update</title></head>\
//!               <body><article><p>You should review the deploy checklist \
//!               before the release train leaves on Thursday.</p></article></body></html>";
//!
//! let insight = analyze_page(markup, Some("https://example.com/update"));
//! assert_eq!(insight.metadata.title.as_deref(), Some("Weekly Update"));
//! assert_eq!(insight.metadata.domain.as_deref(), Some("example.com"));
//! ```

mod error;

pub mod analyzer;
pub mod fetch;
pub mod server;
pub mod store;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
