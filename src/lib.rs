//! # Rolodex
//!
//! A company-directory search service backed by an Elasticsearch-compatible
//! full-text engine: structured search requests (free text, facet filters,
//! numeric ranges, sorting, pagination) are compiled into a single boolean
//! query, and raw engine hits are shaped back into stable, paginated API
//! responses. An offline pipeline loads CSV company records into the same
//! index.
//!
//! This crate is the core library — query construction, result shaping,
//! the engine client, and the ingestion pipeline. The companion
//! `rolodex-http` crate exposes the REST surface and `rolodex-server`
//! wraps both in a binary.
//!
//! ## Query construction
//!
//! ```rust
//! use rolodex::query;
//! use rolodex::types::SearchRequest;
//!
//! let req = SearchRequest {
//!     query: Some("cloud".into()),
//!     size_range: Some(vec!["Large (10001+)".into()]),
//!     ..SearchRequest::default()
//! };
//! let compiled = query::compile(&req);
//! let body = compiled.body(); // engine-ready JSON
//! assert_eq!(body["from"], 0);
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod query;
pub mod types;

pub use catalog::Catalog;
pub use engine::EngineClient;
pub use error::{Result, RolodexError};
pub use types::{
    Company, FilterOptions, SearchRequest, SearchResponse, SizeCategory, SortBy, Tag,
};
