//! Index mappings for the two engine collections. The companies mapping
//! pairs every faceted text field with a `.keyword` subfield and carries a
//! completion subfield on `name` for autocomplete.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::error::Result;

use super::EngineClient;

pub const COMPANIES_INDEX: &str = "companies";
pub const TAGS_INDEX: &str = "tags";

static COMPANIES_MAPPING: Lazy<Value> = Lazy::new(|| {
    json!({
        "mappings": {
            "properties": {
                "name": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "keyword": {"type": "keyword"},
                        "suggest": {
                            "type": "completion",
                            "analyzer": "standard"
                        }
                    }
                },
                "domain": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "keyword": {"type": "keyword"}
                    }
                },
                "year_founded": {"type": "float"},
                "industry": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "keyword": {"type": "keyword"}
                    }
                },
                "size_range": {"type": "keyword"},
                "size_category": {"type": "keyword"},
                "locality": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "keyword": {"type": "keyword"}
                    }
                },
                "country": {
                    "type": "text",
                    "analyzer": "standard",
                    "fields": {
                        "keyword": {"type": "keyword"}
                    }
                },
                "linkedin_url": {"type": "keyword"},
                "current_employee_estimate": {"type": "integer"},
                "total_employee_estimate": {"type": "integer"},
                "tags": {"type": "keyword"},
                "created_at": {"type": "date"},
                "updated_at": {"type": "date"}
            }
        },
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 0,
            "index.max_ngram_diff": 10,
            "analysis": {
                "analyzer": {
                    "ngram_analyzer": {
                        "tokenizer": "ngram_tokenizer"
                    }
                },
                "tokenizer": {
                    "ngram_tokenizer": {
                        "type": "ngram",
                        "min_gram": 2,
                        "max_gram": 10,
                        "token_chars": ["letter", "digit"]
                    }
                }
            }
        }
    })
});

static TAGS_MAPPING: Lazy<Value> = Lazy::new(|| {
    json!({
        "mappings": {
            "properties": {
                "name": {"type": "keyword"},
                "description": {"type": "text"},
                "is_shared": {"type": "boolean"},
                "created_by": {"type": "keyword"},
                "created_at": {"type": "date"}
            }
        }
    })
});

pub fn companies_mapping() -> &'static Value {
    &COMPANIES_MAPPING
}

pub fn tags_mapping() -> &'static Value {
    &TAGS_MAPPING
}

/// Startup bootstrap: create the companies index if it does not exist.
/// Never destructive.
pub async fn ensure_companies_index(engine: &EngineClient) -> Result<()> {
    if !engine.index_exists(COMPANIES_INDEX).await? {
        engine.create_index(COMPANIES_INDEX, companies_mapping()).await?;
    }
    Ok(())
}

/// Ingest bootstrap: drop and recreate both collections from scratch.
pub async fn recreate_all(engine: &EngineClient) -> Result<()> {
    engine.delete_index(COMPANIES_INDEX).await?;
    engine.delete_index(TAGS_INDEX).await?;
    engine.create_index(COMPANIES_INDEX, companies_mapping()).await?;
    engine.create_index(TAGS_INDEX, tags_mapping()).await?;
    Ok(())
}
