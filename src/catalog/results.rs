//! Result shaping: raw engine hits to typed [`Company`] records plus the
//! pagination envelope.

use crate::engine::{Hit, SearchResults};
use crate::error::{Result, RolodexError};
use crate::types::{Company, SearchRequest, SearchResponse};

/// Deserialize one hit strictly into a [`Company`] and attach the
/// engine-assigned identifier. A schema-incompatible document is an error
/// for the whole request; there is no partial mapping.
pub fn map_company_hit(hit: Hit) -> Result<Company> {
    let mut company: Company = serde_json::from_value(hit.source).map_err(|e| {
        RolodexError::MalformedDocument(format!("company {}: {}", hit.id, e))
    })?;
    company.id = Some(hit.id);
    Ok(company)
}

/// `ceil(total / size)`, zero when there are no hits.
pub fn total_pages(total: u64, size: usize) -> u64 {
    if total == 0 || size == 0 {
        return 0;
    }
    total.div_ceil(size as u64)
}

/// Assemble the paginated response in the engine's hit order.
pub fn assemble(req: &SearchRequest, found: SearchResults) -> Result<SearchResponse> {
    let companies = found
        .hits
        .into_iter()
        .map(map_company_hit)
        .collect::<Result<Vec<_>>>()?;
    Ok(SearchResponse {
        companies,
        total: found.total,
        page: req.page,
        size: req.size,
        total_pages: total_pages(found.total, req.size),
    })
}
