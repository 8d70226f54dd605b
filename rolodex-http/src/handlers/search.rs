use std::sync::Arc;

use axum::{extract::State, Json};

use rolodex::types::{SearchRequest, SearchResponse};
use rolodex::RolodexError;

use super::AppState;

/// Primary search path. Compilation cannot fail; execution and mapping
/// failures surface as internal errors carrying the underlying message.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, RolodexError> {
    let response = state.catalog.search(&req).await?;
    Ok(Json(response))
}
