//! The catalog service: the request-facing facade over the engine.
//!
//! Primary read/write paths (search, company get/save, tag creation) fail
//! loudly; the discovery paths in [`discover`] swallow errors and return
//! empty results instead.

pub mod discover;
pub mod results;

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::engine::schema::{COMPANIES_INDEX, TAGS_INDEX};
use crate::engine::EngineClient;
use crate::error::{Result, RolodexError};
use crate::query;
use crate::types::{Company, SearchRequest, SearchResponse, Tag};

use results::map_company_hit;

/// Shared, stateless service handle. Holds only the engine client; safe
/// to clone per request.
#[derive(Debug, Clone)]
pub struct Catalog {
    engine: Arc<EngineClient>,
}

impl Catalog {
    pub fn new(engine: Arc<EngineClient>) -> Self {
        Catalog { engine }
    }

    pub fn engine(&self) -> &EngineClient {
        &self.engine
    }

    /// Primary search path: compile the request, execute it, and shape the
    /// paginated response. Hit order is the engine's order; the mapper
    /// never re-sorts.
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse> {
        let compiled = query::compile(req);
        let found = self
            .engine
            .search(COMPANIES_INDEX, &compiled.body())
            .await?;
        results::assemble(req, found)
    }

    pub async fn get_company(&self, id: &str) -> Result<Company> {
        let hit = self.engine.get_document(COMPANIES_INDEX, id).await?;
        map_company_hit(hit)
    }

    /// Create or overwrite a company. With an id the document is
    /// re-indexed under that id; without one the engine assigns it.
    /// Timestamps are stamped server-side on every save.
    pub async fn save_company(&self, company: Company) -> Result<Company> {
        let now = Utc::now();
        let mut record = company;
        record.created_at = Some(now);
        record.updated_at = Some(now);

        let id = record.id.take();
        let body = serde_json::to_value(&record)?;
        let assigned = match id {
            Some(id) => self.engine.put_document(COMPANIES_INDEX, &id, &body).await?,
            None => self.engine.post_document(COMPANIES_INDEX, &body).await?,
        };
        record.id = Some(assigned);
        Ok(record)
    }

    /// List all tags. Best-effort: any failure (including a missing tags
    /// index) yields an empty list.
    pub async fn list_tags(&self) -> Vec<Tag> {
        let body = json!({"query": {"match_all": {}}, "size": 100});
        let found = match self.engine.search(TAGS_INDEX, &body).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(error = %e, "Tag listing failed, returning empty");
                return Vec::new();
            }
        };
        found
            .hits
            .into_iter()
            .filter_map(|hit| {
                let id = hit.id;
                match serde_json::from_value::<Tag>(hit.source) {
                    Ok(mut tag) => {
                        tag.id = Some(id);
                        Some(tag)
                    }
                    Err(e) => {
                        tracing::warn!(id, error = %e, "Skipping malformed tag document");
                        None
                    }
                }
            })
            .collect()
    }

    pub async fn create_tag(&self, tag: Tag) -> Result<Tag> {
        let mut record = tag;
        record.created_at = Some(Utc::now());
        record.id = None;
        let body = serde_json::to_value(&record)?;
        let assigned = self.engine.post_document(TAGS_INDEX, &body).await?;
        record.id = Some(assigned);
        Ok(record)
    }

    pub async fn company_tags(&self, id: &str) -> Result<Vec<String>> {
        let hit = self.engine.get_document(COMPANIES_INDEX, id).await?;
        tags_of(&hit.source, id)
    }

    /// Add a tag to a company's tag list. Adding an already-present tag is
    /// a no-op that leaves the document untouched.
    pub async fn add_tag(&self, id: &str, tag_name: &str) -> Result<Vec<String>> {
        self.update_tags(id, |tags| {
            if tags.iter().any(|t| t == tag_name) {
                false
            } else {
                tags.push(tag_name.to_string());
                true
            }
        })
        .await
    }

    /// Remove a tag from a company's tag list. Removing an absent tag is a
    /// no-op, not an error.
    pub async fn remove_tag(&self, id: &str, tag_name: &str) -> Result<Vec<String>> {
        self.update_tags(id, |tags| {
            let before = tags.len();
            tags.retain(|t| t != tag_name);
            tags.len() != before
        })
        .await
    }

    /// Read-modify-write on the raw stored document so unknown fields
    /// survive the round trip. No optimistic concurrency: concurrent
    /// updates to the same company race and the last write wins.
    async fn update_tags<F>(&self, id: &str, mutate: F) -> Result<Vec<String>>
    where
        F: FnOnce(&mut Vec<String>) -> bool,
    {
        let hit = self.engine.get_document(COMPANIES_INDEX, id).await?;
        let mut source = hit.source;
        let mut tags = tags_of(&source, id)?;

        if mutate(&mut tags) {
            let obj = source.as_object_mut().ok_or_else(|| {
                RolodexError::MalformedDocument(format!("company {} is not an object", id))
            })?;
            obj.insert("tags".to_string(), json!(tags));
            obj.insert("updated_at".to_string(), json!(Utc::now()));
            self.engine.put_document(COMPANIES_INDEX, id, &source).await?;
        }
        Ok(tags)
    }
}

fn tags_of(source: &serde_json::Value, id: &str) -> Result<Vec<String>> {
    match source.get("tags") {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            RolodexError::MalformedDocument(format!("company {} has malformed tags: {}", id, e))
        }),
    }
}
