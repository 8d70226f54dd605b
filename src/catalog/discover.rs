//! Best-effort discovery adapters: filter-option catalog and autocomplete.
//!
//! These back non-critical UI affordances, so every failure here is
//! swallowed to an empty result — a deliberate asymmetry with the primary
//! search path, which fails loudly.

use serde_json::{json, Value};

use crate::engine::schema::COMPANIES_INDEX;
use crate::error::Result;
use crate::types::FilterOptions;

use super::Catalog;

/// Candidate cap for the city substring lookup.
const CITY_SUGGEST_LIMIT: usize = 5;
/// Candidate cap for name completion.
const NAME_SUGGEST_LIMIT: usize = 10;
/// Distinct values returned per facet field.
const FACET_LIMIT: usize = 100;

impl Catalog {
    /// Distinct values present in the corpus for each facet field, top
    /// `FACET_LIMIT` by frequency. Empty catalog on any failure.
    pub async fn filter_options(&self) -> FilterOptions {
        match self.try_filter_options().await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(error = %e, "Filter option discovery failed, returning empty");
                FilterOptions::default()
            }
        }
    }

    async fn try_filter_options(&self) -> Result<FilterOptions> {
        let body = json!({
            "size": 0,
            "aggs": {
                "industries": {"terms": {"field": "industry.keyword", "size": FACET_LIMIT}},
                "size_ranges": {"terms": {"field": "size_category", "size": FACET_LIMIT}},
                "countries": {"terms": {"field": "country.keyword", "size": FACET_LIMIT}},
                "localities": {"terms": {"field": "locality.keyword", "size": FACET_LIMIT}},
            }
        });
        let found = self.engine().search(COMPANIES_INDEX, &body).await?;
        let aggs = found.aggregations.unwrap_or_default();
        Ok(FilterOptions {
            industries: bucket_keys(&aggs, "industries"),
            size_ranges: bucket_keys(&aggs, "size_ranges"),
            countries: bucket_keys(&aggs, "countries"),
            localities: bucket_keys(&aggs, "localities"),
        })
    }

    /// Prefix completion over company names. Best-effort.
    pub async fn suggest_names(&self, prefix: &str) -> Vec<String> {
        let body = json!({
            "suggest": {
                "company_suggest": {
                    "prefix": prefix,
                    "completion": {
                        "field": "name.suggest",
                        "size": NAME_SUGGEST_LIMIT,
                    }
                }
            }
        });
        let suggest = match self.engine().search(COMPANIES_INDEX, &body).await {
            Ok(found) => found.suggest.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Name suggestion failed, returning empty");
                return Vec::new();
            }
        };
        suggest["company_suggest"][0]["options"]
            .as_array()
            .map(|options| {
                options
                    .iter()
                    .filter_map(|o| o["text"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Substring match against locality facet values, at most
    /// `CITY_SUGGEST_LIMIT` candidates. Best-effort.
    pub async fn suggest_cities(&self, fragment: &str) -> Vec<String> {
        let body = json!({
            "size": 0,
            "aggs": {
                "cities": {
                    "terms": {
                        "field": "locality.keyword",
                        "include": format!(".*{}.*", fragment),
                        "size": CITY_SUGGEST_LIMIT,
                    }
                }
            }
        });
        match self.engine().search(COMPANIES_INDEX, &body).await {
            Ok(found) => bucket_keys(&found.aggregations.unwrap_or_default(), "cities"),
            Err(e) => {
                tracing::warn!(error = %e, "City suggestion failed, returning empty");
                Vec::new()
            }
        }
    }
}

fn bucket_keys(aggs: &Value, name: &str) -> Vec<String> {
    aggs[name]["buckets"]
        .as_array()
        .map(|buckets| {
            buckets
                .iter()
                .filter_map(|b| b["key"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
