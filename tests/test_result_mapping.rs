use rolodex::catalog::results::{assemble, map_company_hit, total_pages};
use rolodex::engine::{Hit, SearchResults};
use rolodex::types::{SearchRequest, SizeCategory};
use rolodex::RolodexError;
use serde_json::json;

fn company_source(name: &str, employees: u64) -> serde_json::Value {
    json!({
        "name": name,
        "domain": format!("{}.example.com", name.to_lowercase()),
        "year_founded": 1999.0,
        "industry": "internet",
        "size_range": "10001+",
        "size_category": SizeCategory::from_employee_count(Some(employees)).label(),
        "locality": "seattle, washington, united states",
        "country": "united states",
        "linkedin_url": format!("linkedin.com/company/{}", name.to_lowercase()),
        "current_employee_estimate": employees,
        "total_employee_estimate": employees,
        "tags": ["tech-leaders"],
        "created_at": "2024-01-15T10:30:00Z",
        "updated_at": "2024-01-15T10:30:00Z",
    })
}

#[test]
fn hit_identifier_overrides_any_body_id() {
    let mut source = company_source("Acme", 50);
    source["id"] = json!("stale-id");
    let hit = Hit {
        id: "engine-42".into(),
        source,
    };
    let company = map_company_hit(hit).unwrap();
    assert_eq!(company.id.as_deref(), Some("engine-42"));
    assert_eq!(company.name, "Acme");
    assert_eq!(company.tags, vec!["tech-leaders"]);
}

#[test]
fn malformed_hit_aborts_the_whole_response() {
    let hits = vec![
        Hit {
            id: "1".into(),
            source: company_source("Acme", 50),
        },
        Hit {
            id: "2".into(),
            // Missing every required field.
            source: json!({"name": "Broken"}),
        },
    ];
    let found = SearchResults {
        total: 2,
        hits,
        aggregations: None,
        suggest: None,
    };
    let err = assemble(&SearchRequest::default(), found).unwrap_err();
    match err {
        RolodexError::MalformedDocument(msg) => assert!(msg.contains("company 2")),
        other => panic!("expected MalformedDocument, got {:?}", other),
    }
}

#[test]
fn mapper_preserves_engine_hit_order() {
    let names = ["Zebra", "Apple", "Midway"];
    let hits = names
        .iter()
        .enumerate()
        .map(|(i, name)| Hit {
            id: i.to_string(),
            source: company_source(name, 10),
        })
        .collect();
    let found = SearchResults {
        total: 3,
        hits,
        aggregations: None,
        suggest: None,
    };
    let response = assemble(&SearchRequest::default(), found).unwrap();
    let got: Vec<&str> = response.companies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(got, names);
}

#[test]
fn envelope_reflects_request_pagination() {
    let req = SearchRequest {
        page: 2,
        size: 10,
        ..SearchRequest::default()
    };
    let found = SearchResults {
        total: 35,
        hits: vec![],
        aggregations: None,
        suggest: None,
    };
    let response = assemble(&req, found).unwrap();
    assert_eq!(response.total, 35);
    assert_eq!(response.page, 2);
    assert_eq!(response.size, 10);
    assert_eq!(response.total_pages, 4);
}

#[test]
fn total_pages_is_zero_for_empty_corpus() {
    assert_eq!(total_pages(0, 20), 0);
    assert_eq!(total_pages(19, 20), 1);
    assert_eq!(total_pages(20, 20), 1);
    assert_eq!(total_pages(21, 20), 2);
}
