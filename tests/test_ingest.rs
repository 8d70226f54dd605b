use rolodex::engine::EngineClient;
use rolodex::ingest::{self, read_csv, sample_companies, IngestConfig};
use rolodex::types::SizeCategory;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSV_FIXTURE: &str = "\
Name , Domain ,Year Founded,Industry,Size Range,Locality,Country,Linkedin Url,Current Employee Estimate,Total Employee Estimate
Acme,acme.io,1999,internet,501-1000,portland,united states,linkedin.com/company/acme,500,750
BigCorp,bigcorp.com,1950,manufacturing,10001+,detroit,united states,linkedin.com/company/bigcorp,25000,40000
Fuzzy,fuzzy.dev,,software,,austin,united states,linkedin.com/company/fuzzy,,
";

#[test]
fn csv_headers_are_normalized() {
    let companies = read_csv(CSV_FIXTURE.as_bytes()).unwrap();
    assert_eq!(companies.len(), 3);
    assert_eq!(companies[0].name, "Acme");
    assert_eq!(companies[0].domain, "acme.io");
    assert_eq!(companies[0].linkedin_url, "linkedin.com/company/acme");
    assert_eq!(companies[0].current_employee_estimate, Some(500));
    assert_eq!(companies[0].total_employee_estimate, Some(750));
    assert_eq!(companies[0].year_founded, Some(1999.0));
}

#[test]
fn csv_rows_derive_size_category() {
    let companies = read_csv(CSV_FIXTURE.as_bytes()).unwrap();
    assert_eq!(companies[0].size_category, SizeCategory::Small);
    assert_eq!(companies[1].size_category, SizeCategory::Large);
    // Missing employee count: Unknown, never guessed from size_range.
    assert_eq!(companies[2].size_category, SizeCategory::Unknown);
    assert_eq!(companies[2].current_employee_estimate, None);
    assert_eq!(companies[2].year_founded, None);
}

#[test]
fn sample_dataset_shape() {
    let companies = sample_companies();
    assert_eq!(companies.len(), 8);
    assert!(companies
        .iter()
        .all(|c| c.size_category == SizeCategory::Large));
    assert!(companies.iter().any(|c| c.name == "IBM"));
}

async fn mount_ingest_engine(server: &MockServer) {
    for index in ["companies", "tags"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/{}", index)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
            .mount(server)
            .await;
        Mock::given(method("PUT"))
            .and(path(format!("/{}", index)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
            .mount(server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/tags/_doc"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"_id": "t1", "result": "created"})),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"took": 2, "errors": false, "items": []})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn pipeline_falls_back_to_sample_data() {
    let server = MockServer::start().await;
    mount_ingest_engine(&server).await;

    let engine = EngineClient::new(server.uri());
    let report = ingest::run(&engine, &IngestConfig::default()).await.unwrap();

    assert_eq!(report.records, 8);
    assert_eq!(report.batches, 1);
    assert_eq!(report.tags_seeded, 6);
}

#[tokio::test]
async fn pipeline_batches_csv_records() {
    let server = MockServer::start().await;
    mount_ingest_engine(&server).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CSV_FIXTURE.as_bytes()).unwrap();

    let engine = EngineClient::new(server.uri());
    let config = IngestConfig {
        csv_path: Some(file.path().to_path_buf()),
        batch_size: 2,
    };
    let report = ingest::run(&engine, &config).await.unwrap();

    assert_eq!(report.records, 3);
    assert_eq!(report.batches, 2);

    // Bulk payloads carry derived categories and no identifiers.
    let requests = server.received_requests().await.unwrap();
    let bulk = requests
        .iter()
        .find(|r| r.url.path() == "/_bulk")
        .expect("expected a bulk call");
    let payload = String::from_utf8(bulk.body.clone()).unwrap();
    assert!(payload.contains("\"size_category\":\"Small (<1000)\""));
    assert!(!payload.contains("\"_id\""));
}

#[tokio::test]
async fn pipeline_uses_sample_when_csv_is_missing() {
    let server = MockServer::start().await;
    mount_ingest_engine(&server).await;

    let engine = EngineClient::new(server.uri());
    let config = IngestConfig {
        csv_path: Some("/nonexistent/companies.csv".into()),
        batch_size: 100,
    };
    let report = ingest::run(&engine, &config).await.unwrap();
    assert_eq!(report.records, 8);
}
