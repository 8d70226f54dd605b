use std::sync::Arc;

use axum::{extract::State, Json};

use rolodex::types::Tag;
use rolodex::RolodexError;

use super::AppState;

/// Best-effort listing: failures yield an empty list, not an error.
pub async fn list_tags(State(state): State<Arc<AppState>>) -> Json<Vec<Tag>> {
    Json(state.catalog.list_tags().await)
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    Json(tag): Json<Tag>,
) -> Result<Json<Tag>, RolodexError> {
    let created = state.catalog.create_tag(tag).await?;
    Ok(Json(created))
}
