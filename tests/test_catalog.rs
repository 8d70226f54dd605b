use std::sync::Arc;

use rolodex::types::{SearchRequest, SizeCategory, SortBy, Tag};
use rolodex::{Catalog, Company, EngineClient, RolodexError};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> Catalog {
    Catalog::new(Arc::new(EngineClient::new(server.uri())))
}

fn company_source(name: &str, employees: u64, tags: &[&str]) -> serde_json::Value {
    json!({
        "name": name,
        "domain": "example.com",
        "year_founded": 1999.0,
        "industry": "internet",
        "size_range": "10001+",
        "size_category": SizeCategory::from_employee_count(Some(employees)).label(),
        "locality": "seattle, washington, united states",
        "country": "united states",
        "linkedin_url": "linkedin.com/company/example",
        "current_employee_estimate": employees,
        "total_employee_estimate": employees,
        "tags": tags,
    })
}

#[tokio::test]
async fn search_maps_hits_and_computes_pages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {
                "total": {"value": 21, "relation": "eq"},
                "hits": [
                    {"_id": "x1", "_score": 2.0, "_source": company_source("Acme", 500, &[])},
                ]
            }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let req = SearchRequest {
        query: Some("acme".into()),
        page: 1,
        size: 20,
        sort_by: SortBy::Relevance,
        ..SearchRequest::default()
    };
    let response = catalog.search(&req).await.unwrap();

    assert_eq!(response.total, 21);
    assert_eq!(response.total_pages, 2);
    assert_eq!(response.companies.len(), 1);
    assert_eq!(response.companies[0].id.as_deref(), Some("x1"));
    assert_eq!(response.companies[0].size_category, SizeCategory::Small);
}

#[tokio::test]
async fn search_fails_loudly_on_malformed_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{"_id": "bad", "_score": 1.0, "_source": {"name": 17}}]
            }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let err = catalog.search(&SearchRequest::default()).await.unwrap_err();
    assert!(matches!(err, RolodexError::MalformedDocument(_)));
}

#[tokio::test]
async fn save_company_without_id_lets_engine_assign_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies/_doc"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"_id": "assigned-1", "result": "created"})),
        )
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let company: Company = serde_json::from_value(company_source("Acme", 500, &[])).unwrap();
    let saved = catalog.save_company(company).await.unwrap();

    assert_eq!(saved.id.as_deref(), Some("assigned-1"));
    assert!(saved.created_at.is_some());
    assert!(saved.updated_at.is_some());

    // The stored body must not contain the identifier.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert!(body.get("id").is_none());
    assert!(body.get("created_at").is_some());
}

#[tokio::test]
async fn save_company_with_id_overwrites_in_place() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/companies/_doc/c9"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "c9", "result": "updated"})),
        )
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let mut company: Company = serde_json::from_value(company_source("Acme", 500, &[])).unwrap();
    company.id = Some("c9".into());
    let saved = catalog.save_company(company).await.unwrap();
    assert_eq!(saved.id.as_deref(), Some("c9"));
}

#[tokio::test]
async fn adding_a_new_tag_preserves_unknown_fields() {
    let server = MockServer::start().await;
    let mut source = company_source("Acme", 500, &["alpha"]);
    source["custom_score"] = json!(7);
    Mock::given(method("GET"))
        .and(path("/companies/_doc/c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "c1", "_source": source})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/companies/_doc/c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "c1", "result": "updated"})),
        )
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let tags = catalog.add_tag("c1", "beta").await.unwrap();
    assert_eq!(tags, vec!["alpha", "beta"]);

    let requests = server.received_requests().await.unwrap();
    let write = requests
        .iter()
        .find(|r| r.method.to_string().eq_ignore_ascii_case("put"))
        .expect("expected a write-back");
    let body: serde_json::Value = write.body_json().unwrap();
    assert_eq!(body["tags"], json!(["alpha", "beta"]));
    assert_eq!(body["custom_score"], json!(7));
    assert!(body.get("updated_at").is_some());
}

#[tokio::test]
async fn adding_an_existing_tag_is_a_no_op() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies/_doc/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"_id": "c1", "_source": company_source("Acme", 500, &["alpha"])}),
        ))
        .mount(&server)
        .await;
    // No PUT mock mounted: a write attempt would fail the call.

    let catalog = catalog_for(&server);
    let tags = catalog.add_tag("c1", "alpha").await.unwrap();
    assert_eq!(tags, vec!["alpha"]);
}

#[tokio::test]
async fn removing_an_absent_tag_is_a_no_op() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies/_doc/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"_id": "c1", "_source": company_source("Acme", 500, &["alpha"])}),
        ))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let tags = catalog.remove_tag("c1", "beta").await.unwrap();
    assert_eq!(tags, vec!["alpha"]);
}

#[tokio::test]
async fn removing_a_present_tag_writes_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies/_doc/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"_id": "c1", "_source": company_source("Acme", 500, &["alpha", "beta"])}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/companies/_doc/c1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"_id": "c1", "result": "updated"})),
        )
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let tags = catalog.remove_tag("c1", "alpha").await.unwrap();
    assert_eq!(tags, vec!["beta"]);
}

#[tokio::test]
async fn tag_listing_is_best_effort() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tags/_search"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"type": "index_not_found_exception"}
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    assert!(catalog.list_tags().await.is_empty());
}

#[tokio::test]
async fn tag_listing_attaches_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tags/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {
                "total": {"value": 1, "relation": "eq"},
                "hits": [{
                    "_id": "t1",
                    "_source": {
                        "name": "tech-leaders",
                        "description": "Leading technology companies",
                        "is_shared": true,
                    }
                }]
            }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let tags = catalog.list_tags().await;
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id.as_deref(), Some("t1"));
    assert_eq!(tags[0].name, "tech-leaders");
    assert!(tags[0].is_shared);
}

#[tokio::test]
async fn create_tag_fails_loudly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tags/_doc"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let tag = Tag {
        id: None,
        name: "watchlist".into(),
        description: None,
        is_shared: false,
        created_by: None,
        created_at: None,
    };
    assert!(catalog.create_tag(tag).await.is_err());
}

#[tokio::test]
async fn discovery_paths_swallow_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let options = catalog.filter_options().await;
    assert!(options.industries.is_empty());
    assert!(options.size_ranges.is_empty());
    assert!(catalog.suggest_names("ac").await.is_empty());
    assert!(catalog.suggest_cities("sea").await.is_empty());
}

#[tokio::test]
async fn filter_options_collect_facet_buckets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {"total": {"value": 8, "relation": "eq"}, "hits": []},
            "aggregations": {
                "industries": {"buckets": [
                    {"key": "internet", "doc_count": 3},
                    {"key": "computer software", "doc_count": 1},
                ]},
                "size_ranges": {"buckets": [{"key": "Large (10001+)", "doc_count": 8}]},
                "countries": {"buckets": [{"key": "united states", "doc_count": 6}]},
                "localities": {"buckets": [{"key": "seattle, washington, united states", "doc_count": 1}]},
            }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let options = catalog.filter_options().await;
    assert_eq!(options.industries, vec!["internet", "computer software"]);
    assert_eq!(options.size_ranges, vec!["Large (10001+)"]);
    assert_eq!(options.countries, vec!["united states"]);
    assert_eq!(options.localities.len(), 1);
}

#[tokio::test]
async fn name_suggestions_parse_completion_options() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/companies/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": {"total": {"value": 0, "relation": "eq"}, "hits": []},
            "suggest": {
                "company_suggest": [{
                    "text": "mi",
                    "offset": 0,
                    "length": 2,
                    "options": [
                        {"text": "Microsoft", "_id": "4", "_score": 1.0},
                        {"text": "Midway", "_id": "9", "_score": 0.5},
                    ]
                }]
            }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    assert_eq!(catalog.suggest_names("mi").await, vec!["Microsoft", "Midway"]);
}
