use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use rolodex::types::Company;
use rolodex::RolodexError;

use super::AppState;

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Company>, RolodexError> {
    let company = state.catalog.get_company(&id).await?;
    Ok(Json(company))
}

/// Create or update a company: omitting the id creates (engine assigns
/// one), supplying it overwrites.
pub async fn save_company(
    State(state): State<Arc<AppState>>,
    Json(company): Json<Company>,
) -> Result<Json<Company>, RolodexError> {
    let saved = state.catalog.save_company(company).await?;
    Ok(Json(saved))
}

#[derive(Debug, Deserialize)]
pub struct TagNameParam {
    pub tag_name: String,
}

pub async fn add_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(param): Query<TagNameParam>,
) -> Result<Json<serde_json::Value>, RolodexError> {
    let tags = state.catalog.add_tag(&id, &param.tag_name).await?;
    Ok(Json(serde_json::json!({
        "message": "Tag added successfully",
        "tags": tags,
    })))
}

pub async fn remove_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(param): Query<TagNameParam>,
) -> Result<Json<serde_json::Value>, RolodexError> {
    let tags = state.catalog.remove_tag(&id, &param.tag_name).await?;
    Ok(Json(serde_json::json!({
        "message": "Tag removed successfully",
        "tags": tags,
    })))
}

pub async fn get_company_tags(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, RolodexError> {
    let tags = state.catalog.company_tags(&id).await?;
    Ok(Json(serde_json::json!({"tags": tags})))
}
