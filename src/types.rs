use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named employee-count bucket, derived from `current_employee_estimate`
/// at ingest time and re-derived when translating size filters at query
/// time. The bucket labels are part of the API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    #[default]
    Unknown,
}

impl SizeCategory {
    /// Inclusive lower bound of the Medium bucket.
    pub const MEDIUM_MIN: u64 = 1_000;
    /// Inclusive lower bound of the Large bucket.
    pub const LARGE_MIN: u64 = 10_001;

    /// Bucket an employee count. `None` is always Unknown; the boundaries
    /// are closed: 999 is Small, 1000 and 10000 are Medium, 10001 is Large.
    pub fn from_employee_count(count: Option<u64>) -> Self {
        match count {
            None => SizeCategory::Unknown,
            Some(c) if c >= Self::LARGE_MIN => SizeCategory::Large,
            Some(c) if c >= Self::MEDIUM_MIN => SizeCategory::Medium,
            Some(_) => SizeCategory::Small,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeCategory::Small => "Small (<1000)",
            SizeCategory::Medium => "Medium (1000-10000)",
            SizeCategory::Large => "Large (10001+)",
            SizeCategory::Unknown => "Unknown",
        }
    }

    /// Parse a bucket label. Anything unrecognized maps to Unknown, which
    /// filter translation skips.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Small (<1000)" => SizeCategory::Small,
            "Medium (1000-10000)" => SizeCategory::Medium,
            "Large (10001+)" => SizeCategory::Large,
            _ => SizeCategory::Unknown,
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SizeCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SizeCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SizeCategory::from_label(&s))
    }
}

/// A company document as stored in the engine and returned by the API.
///
/// The `id` is engine-assigned and lives outside the stored document body;
/// it is attached to the struct only on the API-facing side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub year_founded: Option<f64>,
    pub industry: String,
    pub size_range: String,
    #[serde(default)]
    pub size_category: SizeCategory,
    pub locality: String,
    pub country: String,
    pub linkedin_url: String,
    #[serde(default)]
    pub current_employee_estimate: Option<u64>,
    #[serde(default)]
    pub total_employee_estimate: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Free-standing tag entity. Companies reference tags by name string only;
/// deleting a Tag does not touch any company's tag list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sort mode for search results. Exactly one applies; choosing `Name` or
/// `Size` fully overrides relevance scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Relevance,
    Name,
    Size,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Name => "name",
            SortBy::Size => "size",
        }
    }
}

impl Serialize for SortBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Unrecognized values fall back to relevance rather than rejecting the
// request.
impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "name" => SortBy::Name,
            "size" => SortBy::Size,
            _ => SortBy::Relevance,
        })
    }
}

fn default_page() -> usize {
    1
}

fn default_size() -> usize {
    20
}

/// Structured search request: free text plus multi-valued facet filters,
/// a numeric year range, pagination, and a sort mode. Absent fields are
/// simply omitted from the compiled query, never rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub industry: Option<Vec<String>>,
    #[serde(default)]
    pub size_range: Option<Vec<String>>,
    #[serde(default)]
    pub country: Option<Vec<String>>,
    #[serde(default)]
    pub locality: Option<Vec<String>>,
    #[serde(default)]
    pub year_founded_from: Option<i32>,
    #[serde(default)]
    pub year_founded_to: Option<i32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// Paginated search envelope. `total_pages = ceil(total / size)`, zero
/// when there are no hits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub companies: Vec<Company>,
    pub total: u64,
    pub page: usize,
    pub size: usize,
    pub total_pages: u64,
}

/// Facet value catalog for filter-option discovery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub industries: Vec<String>,
    pub size_ranges: Vec<String>,
    pub countries: Vec<String>,
    pub localities: Vec<String>,
}
