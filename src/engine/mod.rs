//! Client for the external search engine (Elasticsearch-compatible wire
//! protocol). One long-lived handle is created at startup and shared by
//! all request handlers; the engine is the sole source of truth.

pub mod client;
pub mod schema;

use serde::Deserialize;
use serde_json::Value;

pub use client::EngineClient;

/// One raw search hit: the engine-assigned identifier plus the stored
/// document body. The identifier is never part of the body itself.
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source")]
    pub source: Value,
}

/// Parsed engine search response. `total` is the engine's exact reported
/// match count; `aggregations` and `suggest` are passed through raw for
/// the discovery adapters.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub total: u64,
    pub hits: Vec<Hit>,
    pub aggregations: Option<Value>,
    pub suggest: Option<Value>,
}

/// Outcome of a bulk indexing call.
#[derive(Debug, Clone, Copy)]
pub struct BulkSummary {
    pub items: usize,
    pub errors: bool,
}
