use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, RolodexError};

use super::{BulkSummary, Hit, SearchResults};

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    hits: RawHits,
    #[serde(default)]
    aggregations: Option<Value>,
    #[serde(default)]
    suggest: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawHits {
    total: RawTotal,
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct RawTotal {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct IndexedResponse {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    errors: bool,
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Thin HTTP wrapper over the engine's REST API. Cheap to clone (the
/// inner `reqwest::Client` is already reference-counted) and safe for
/// concurrent use across requests.
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: reqwest::Client,
    base_url: String,
}

impl EngineClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        EngineClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RolodexError::Engine(format!("{}: {}", status, body)))
    }

    /// Liveness probe against the engine root.
    pub async fn ping(&self) -> bool {
        match self.http.get(&self.base_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// Bounded startup wait: poll until the engine answers, up to
    /// `max_attempts` with a fixed delay between polls. Returns whether
    /// the engine became reachable; callers proceed in a degraded state
    /// when it did not.
    pub async fn wait_until_ready(&self, max_attempts: u32, delay: Duration) -> bool {
        for attempt in 1..=max_attempts {
            if self.ping().await {
                tracing::info!(url = %self.base_url, "Search engine reachable");
                return true;
            }
            tracing::debug!(attempt, max_attempts, "Engine not ready, retrying");
            tokio::time::sleep(delay).await;
        }
        false
    }

    pub async fn index_exists(&self, index: &str) -> Result<bool> {
        let resp = self.http.head(self.url(index)).send().await?;
        match resp.status().as_u16() {
            404 => Ok(false),
            s if (200..300).contains(&s) => Ok(true),
            _ => {
                Self::check(resp).await?;
                Ok(false)
            }
        }
    }

    pub async fn create_index(&self, index: &str, mapping: &Value) -> Result<()> {
        let resp = self.http.put(self.url(index)).json(mapping).send().await?;
        Self::check(resp).await?;
        tracing::info!(index, "Created index");
        Ok(())
    }

    /// Delete an index; deleting one that does not exist is a no-op.
    pub async fn delete_index(&self, index: &str) -> Result<()> {
        let resp = self.http.delete(self.url(index)).send().await?;
        if resp.status().as_u16() == 404 {
            return Ok(());
        }
        Self::check(resp).await?;
        tracing::info!(index, "Deleted index");
        Ok(())
    }

    pub async fn search(&self, index: &str, body: &Value) -> Result<SearchResults> {
        let resp = self
            .http
            .post(self.url(&format!("{}/_search", index)))
            .json(body)
            .send()
            .await?;
        let raw: RawSearchResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| RolodexError::Engine(format!("bad search response: {}", e)))?;
        Ok(SearchResults {
            total: raw.hits.total.value,
            hits: raw.hits.hits,
            aggregations: raw.aggregations,
            suggest: raw.suggest,
        })
    }

    pub async fn get_document(&self, index: &str, id: &str) -> Result<Hit> {
        let resp = self
            .http
            .get(self.url(&format!("{}/_doc/{}", index, id)))
            .send()
            .await?;
        if resp.status().as_u16() == 404 {
            return Err(RolodexError::DocumentNotFound {
                index: index.to_string(),
                id: id.to_string(),
            });
        }
        Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| RolodexError::Engine(format!("bad document response: {}", e)))
    }

    /// Index a document under an explicit identifier (overwrite-on-exists).
    pub async fn put_document(&self, index: &str, id: &str, body: &Value) -> Result<String> {
        let resp = self
            .http
            .put(self.url(&format!("{}/_doc/{}", index, id)))
            .json(body)
            .send()
            .await?;
        let indexed: IndexedResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| RolodexError::Engine(format!("bad index response: {}", e)))?;
        Ok(indexed.id)
    }

    /// Index a document and let the engine assign the identifier.
    pub async fn post_document(&self, index: &str, body: &Value) -> Result<String> {
        let resp = self
            .http
            .post(self.url(&format!("{}/_doc", index)))
            .json(body)
            .send()
            .await?;
        let indexed: IndexedResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| RolodexError::Engine(format!("bad index response: {}", e)))?;
        Ok(indexed.id)
    }

    /// Bulk-index a batch of documents with engine-assigned identifiers.
    pub async fn bulk_index(&self, index: &str, docs: &[Value]) -> Result<BulkSummary> {
        let mut payload = String::new();
        let action = serde_json::json!({"index": {"_index": index}});
        for doc in docs {
            payload.push_str(&action.to_string());
            payload.push('\n');
            payload.push_str(&doc.to_string());
            payload.push('\n');
        }
        let resp = self
            .http
            .post(self.url("_bulk"))
            .header("content-type", "application/x-ndjson")
            .body(payload)
            .send()
            .await?;
        let raw: BulkResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| RolodexError::Engine(format!("bad bulk response: {}", e)))?;
        Ok(BulkSummary {
            items: raw.items.len(),
            errors: raw.errors,
        })
    }

    pub async fn count(&self, index: &str) -> Result<u64> {
        let resp = self
            .http
            .get(self.url(&format!("{}/_count", index)))
            .send()
            .await?;
        let raw: CountResponse = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| RolodexError::Engine(format!("bad count response: {}", e)))?;
        Ok(raw.count)
    }
}
