//! Offline ingestion pipeline: recreate both collections from scratch and
//! bulk-load company records from a CSV file, falling back to a small
//! built-in sample dataset. Destructive by design — each run replaces the
//! corpus.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::json;

use crate::engine::schema::{self, TAGS_INDEX};
use crate::engine::EngineClient;
use crate::error::{Result, RolodexError};
use crate::types::{Company, SizeCategory};

pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// CSV source; `None` or a missing file loads the sample dataset.
    pub csv_path: Option<PathBuf>,
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            csv_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
    pub records: usize,
    pub batches: usize,
    pub tags_seeded: usize,
}

/// Run the full pipeline: recreate indices, load records, seed sample
/// tags, bulk-index in fixed-size batches with engine-assigned ids.
pub async fn run(engine: &EngineClient, config: &IngestConfig) -> Result<IngestReport> {
    schema::recreate_all(engine).await?;

    let companies = match &config.csv_path {
        Some(path) if path.exists() => {
            tracing::info!(path = %path.display(), "Loading companies from CSV");
            read_csv_file(path)?
        }
        Some(path) => {
            tracing::warn!(path = %path.display(), "CSV not found, using sample dataset");
            sample_companies()
        }
        None => {
            tracing::info!("No CSV configured, using sample dataset");
            sample_companies()
        }
    };

    let tags_seeded = seed_sample_tags(engine).await?;

    let batch_size = config.batch_size.max(1);
    let mut batches = 0usize;
    let now = Utc::now();
    for (n, chunk) in companies.chunks(batch_size).enumerate() {
        let docs: Vec<serde_json::Value> = chunk
            .iter()
            .map(|company| {
                let mut record = company.clone();
                record.id = None;
                record.size_category =
                    SizeCategory::from_employee_count(record.current_employee_estimate);
                record.created_at = Some(now);
                record.updated_at = Some(now);
                serde_json::to_value(&record)
            })
            .collect::<std::result::Result<_, _>>()?;
        let summary = engine.bulk_index(schema::COMPANIES_INDEX, &docs).await?;
        if summary.errors {
            tracing::warn!(batch = n + 1, "Some documents were rejected in batch");
        } else {
            tracing::info!(batch = n + 1, records = docs.len(), "Ingested batch");
        }
        batches += 1;
    }

    tracing::info!(
        records = companies.len(),
        batches,
        tags_seeded,
        "Ingestion complete"
    );
    Ok(IngestReport {
        records: companies.len(),
        batches,
        tags_seeded,
    })
}

pub fn read_csv_file(path: &Path) -> Result<Vec<Company>> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Parse company rows from CSV. Headers are normalized (trimmed,
/// lowercased, spaces to underscores); unknown columns are ignored and
/// unparsable numerics become null rather than failing the row.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Company>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers: HashMap<String, usize> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (normalize_header(h), i))
        .collect();

    let mut companies = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let text = |column: &str| -> String {
            headers
                .get(column)
                .and_then(|&i| record.get(i))
                .unwrap_or_default()
                .trim()
                .to_string()
        };
        let current = parse_u64(&text("current_employee_estimate"));
        companies.push(Company {
            id: None,
            name: text("name"),
            domain: text("domain"),
            year_founded: parse_f64(&text("year_founded")),
            industry: text("industry"),
            size_range: text("size_range"),
            size_category: SizeCategory::from_employee_count(current),
            locality: text("locality"),
            country: text("country"),
            linkedin_url: text("linkedin_url"),
            current_employee_estimate: current,
            total_employee_estimate: parse_u64(&text("total_employee_estimate")),
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        });
    }
    Ok(companies)
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn parse_u64(s: &str) -> Option<u64> {
    s.parse().ok()
}

fn parse_f64(s: &str) -> Option<f64> {
    s.parse().ok()
}

async fn seed_sample_tags(engine: &EngineClient) -> Result<usize> {
    let tags = sample_tags();
    let count = tags.len();
    for tag in tags {
        engine
            .post_document(TAGS_INDEX, &tag)
            .await
            .map_err(|e| RolodexError::Engine(format!("seeding tags: {}", e)))?;
    }
    Ok(count)
}

fn sample_tags() -> Vec<serde_json::Value> {
    let now = Utc::now();
    [
        ("tech-leaders", "Leading technology companies", true),
        ("california-startups", "Companies based in California", true),
        ("enterprise-clients", "Large enterprise companies", true),
        ("potential-partners", "Potential business partners", true),
        ("competitors", "Direct competitors", false),
        ("targets", "Target companies for acquisition", false),
    ]
    .into_iter()
    .map(|(name, description, is_shared)| {
        json!({
            "name": name,
            "description": description,
            "is_shared": is_shared,
            "created_at": now,
        })
    })
    .collect()
}

/// Built-in sample dataset used when no CSV is available.
pub fn sample_companies() -> Vec<Company> {
    let seed = |name: &str,
                domain: &str,
                year: f64,
                industry: &str,
                locality: &str,
                country: &str,
                slug: &str,
                current: u64,
                total: u64| Company {
        id: None,
        name: name.to_string(),
        domain: domain.to_string(),
        year_founded: Some(year),
        industry: industry.to_string(),
        size_range: "10001+".to_string(),
        size_category: SizeCategory::from_employee_count(Some(current)),
        locality: locality.to_string(),
        country: country.to_string(),
        linkedin_url: format!("linkedin.com/company/{}", slug),
        current_employee_estimate: Some(current),
        total_employee_estimate: Some(total),
        tags: Vec::new(),
        created_at: None,
        updated_at: None,
    };

    vec![
        seed(
            "IBM",
            "ibm.com",
            1911.0,
            "information technology and services",
            "new york, new york, united states",
            "united states",
            "ibm",
            274047,
            716906,
        ),
        seed(
            "Tata Consultancy Services",
            "tcs.com",
            1968.0,
            "information technology and services",
            "bombay, maharashtra, india",
            "india",
            "tata-consultancy-services",
            190771,
            341369,
        ),
        seed(
            "Accenture",
            "accenture.com",
            1989.0,
            "information technology and services",
            "dublin, dublin, ireland",
            "ireland",
            "accenture",
            190689,
            455768,
        ),
        seed(
            "Microsoft",
            "microsoft.com",
            1975.0,
            "computer software",
            "redmond, washington, united states",
            "united states",
            "microsoft",
            221000,
            221000,
        ),
        seed(
            "Google",
            "google.com",
            1998.0,
            "internet",
            "mountain view, california, united states",
            "united states",
            "google",
            190000,
            190000,
        ),
        seed(
            "Amazon",
            "amazon.com",
            1994.0,
            "internet",
            "seattle, washington, united states",
            "united states",
            "amazon",
            1500000,
            1500000,
        ),
        seed(
            "Apple",
            "apple.com",
            1976.0,
            "consumer electronics",
            "cupertino, california, united states",
            "united states",
            "apple",
            164000,
            164000,
        ),
        seed(
            "Meta",
            "meta.com",
            2004.0,
            "internet",
            "menlo park, california, united states",
            "united states",
            "meta",
            87000,
            87000,
        ),
    ]
}
