use crate::query::ast::{Bounds, BoostedField, CompiledQuery, QueryNode, SortSpec};
use crate::types::{SearchRequest, SizeCategory, SortBy};

/// Fields covered by free-text search, with their boost weights.
pub const TEXT_FIELDS: [BoostedField; 5] = [
    BoostedField::new("name", 3),
    BoostedField::new("domain", 2),
    BoostedField::new("industry", 2),
    BoostedField::new("locality", 2),
    BoostedField::new("country", 2),
];

/// Compile a search request into a single boolean query. Pure data
/// transformation: empty or absent fields are omitted, never rejected,
/// and compilation itself cannot fail.
pub fn compile(req: &SearchRequest) -> CompiledQuery {
    let mut must = Vec::new();
    let mut filter = Vec::new();

    if let Some(text) = req.query.as_deref() {
        let text = text.trim();
        if !text.is_empty() {
            must.push(QueryNode::MultiMatch {
                query: text.to_string(),
                fields: TEXT_FIELDS.to_vec(),
            });
        }
    }

    if let Some(node) = terms_filter("industry.keyword", &req.industry) {
        filter.push(node);
    }

    if let Some(buckets) = &req.size_range {
        let ranges: Vec<QueryNode> = buckets
            .iter()
            .filter_map(|label| bucket_filter(SizeCategory::from_label(label)))
            .collect();
        if !ranges.is_empty() {
            filter.push(QueryNode::AnyOf(ranges));
        }
    }

    if let Some(node) = terms_filter("country.keyword", &req.country) {
        filter.push(node);
    }

    if let Some(node) = terms_filter("locality.keyword", &req.locality) {
        filter.push(node);
    }

    if req.year_founded_from.is_some() || req.year_founded_to.is_some() {
        filter.push(QueryNode::Range {
            field: "year_founded".to_string(),
            bounds: Bounds {
                gte: req.year_founded_from.map(i64::from),
                lte: req.year_founded_to.map(i64::from),
                lt: None,
            },
        });
    }

    // Tags are indexed as plain keywords, no subfield.
    if let Some(node) = terms_filter("tags", &req.tags) {
        filter.push(node);
    }

    CompiledQuery {
        query: QueryNode::Bool { must, filter },
        sort: match req.sort_by {
            SortBy::Relevance => SortSpec::Relevance,
            SortBy::Name => SortSpec::NameAsc,
            SortBy::Size => SortSpec::SizeDesc,
        },
        from: req.page.saturating_sub(1) * req.size,
        size: req.size,
    }
}

fn terms_filter(field: &str, values: &Option<Vec<String>>) -> Option<QueryNode> {
    match values {
        Some(vals) if !vals.is_empty() => Some(QueryNode::Terms {
            field: field.to_string(),
            values: vals.clone(),
        }),
        _ => None,
    }
}

/// Translate a named size bucket back into a numeric range on
/// `current_employee_estimate`, using the same boundaries as
/// [`SizeCategory::from_employee_count`]. Unknown buckets produce no
/// filter.
fn bucket_filter(bucket: SizeCategory) -> Option<QueryNode> {
    let bounds = match bucket {
        SizeCategory::Large => Bounds {
            gte: Some(SizeCategory::LARGE_MIN as i64),
            ..Bounds::default()
        },
        SizeCategory::Medium => Bounds {
            gte: Some(SizeCategory::MEDIUM_MIN as i64),
            lte: Some(SizeCategory::LARGE_MIN as i64 - 1),
            ..Bounds::default()
        },
        SizeCategory::Small => Bounds {
            lt: Some(SizeCategory::MEDIUM_MIN as i64),
            ..Bounds::default()
        },
        SizeCategory::Unknown => return None,
    };
    Some(QueryNode::Range {
        field: "current_employee_estimate".to_string(),
        bounds,
    })
}
