use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use rolodex::types::FilterOptions;
use rolodex::RolodexError;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: String,
}

/// Name autocomplete; query must be at least 2 characters.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<serde_json::Value>, RolodexError> {
    if params.q.len() < 2 {
        return Err(RolodexError::InvalidRequest(
            "query must be at least 2 characters".to_string(),
        ));
    }
    let suggestions = state.catalog.suggest_names(&params.q).await;
    Ok(Json(serde_json::json!({"suggestions": suggestions})))
}

/// City autocomplete; query must be non-empty.
pub async fn suggest_cities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<serde_json::Value>, RolodexError> {
    if params.q.is_empty() {
        return Err(RolodexError::InvalidRequest(
            "query must be at least 1 character".to_string(),
        ));
    }
    let suggestions = state.catalog.suggest_cities(&params.q).await;
    Ok(Json(serde_json::json!({"suggestions": suggestions})))
}

pub async fn filter_options(State(state): State<Arc<AppState>>) -> Json<FilterOptions> {
    Json(state.catalog.filter_options().await)
}
