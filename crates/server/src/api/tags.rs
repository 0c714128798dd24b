//! Topic and language routes.

use std::sync::Arc;

use anyhow::Context;
use axum::{Json, Router, extract::State, routing::get};
use leettrack_api_types::TagResponse;

use super::auth::SignedIn;
use super::error::AppError;
use super::state::AppState;
use crate::repository::TagRecord;

/// Routes for the shared topic and language lists.
pub fn create_tag_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/languages", get(list_languages))
}

fn into_response(tags: Vec<TagRecord>) -> Json<Vec<TagResponse>> {
    Json(
        tags.into_iter()
            .map(|tag| TagResponse {
                id: tag.id,
                name: tag.name,
            })
            .collect(),
    )
}

/// Every topic, alphabetically.
async fn list_topics(
    _: SignedIn,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let topics = state
        .tags
        .list_topics()
        .await
        .context("failed to fetch topics")?;
    Ok(into_response(topics))
}

/// Every language, alphabetically.
async fn list_languages(
    _: SignedIn,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TagResponse>>, AppError> {
    let languages = state
        .tags
        .list_languages()
        .await
        .context("failed to fetch languages")?;
    Ok(into_response(languages))
}
